//! The block cipher capability.

use crate::block::{Block, BLOCK_SIZE};
use crate::error::Error;

/// A keyed 128-bit block cipher.
///
/// Implementations transform exactly one block per call and operate in place,
/// which keeps the contract safe when a caller wants output and input to share
/// storage. Key material lives inside the implementation and must be wiped by
/// [`BlockCipher::clear`].
pub trait BlockCipher {
    /// Size of a block in bytes.
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// The key length, in bytes, accepted by [`BlockCipher::set_key`].
    fn key_size(&self) -> usize;

    /// Installs a new key.
    ///
    /// Returns [`Error::InvalidKeyLength`] without touching the current key
    /// when `key` has an unsupported length.
    fn set_key(&mut self, key: &[u8]) -> Result<(), Error>;

    /// Encrypts one block in place.
    fn encrypt_block(&self, block: &mut Block);

    /// Decrypts one block in place.
    fn decrypt_block(&self, block: &mut Block);

    /// Erases all key material held by the cipher.
    fn clear(&mut self);

    /// Returns the encryption of `input`, leaving it untouched.
    fn encrypt_block_to(&self, input: &Block) -> Block {
        let mut block = *input;
        self.encrypt_block(&mut block);
        block
    }

    /// Returns the decryption of `input`, leaving it untouched.
    fn decrypt_block_to(&self, input: &Block) -> Block {
        let mut block = *input;
        self.decrypt_block(&mut block);
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::xor_in_place;

    /// XOR "cipher" used to exercise the provided methods.
    struct XorCipher {
        key: Block,
    }

    impl BlockCipher for XorCipher {
        fn key_size(&self) -> usize {
            BLOCK_SIZE
        }

        fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
            if key.len() != BLOCK_SIZE {
                return Err(Error::InvalidKeyLength(key.len()));
            }
            self.key.copy_from_slice(key);
            Ok(())
        }

        fn encrypt_block(&self, block: &mut Block) {
            xor_in_place(block, &self.key);
        }

        fn decrypt_block(&self, block: &mut Block) {
            xor_in_place(block, &self.key);
        }

        fn clear(&mut self) {
            self.key = [0u8; BLOCK_SIZE];
        }
    }

    #[test]
    fn provided_methods_leave_input_untouched() {
        let mut cipher = XorCipher { key: [0u8; 16] };
        cipher.set_key(&[0x0f; 16]).expect("16-byte key");
        let input = [0xf0u8; 16];
        let ct = cipher.encrypt_block_to(&input);
        assert_eq!(input, [0xf0u8; 16]);
        assert_eq!(ct, [0xffu8; 16]);
        assert_eq!(cipher.decrypt_block_to(&ct), input);
        assert_eq!(cipher.block_size(), 16);
    }

    #[test]
    fn rejected_key_keeps_previous_key() {
        let mut cipher = XorCipher { key: [0u8; 16] };
        cipher.set_key(&[7u8; 16]).expect("16-byte key");
        assert_eq!(cipher.set_key(&[1u8; 15]), Err(Error::InvalidKeyLength(15)));
        assert_eq!(cipher.key, [7u8; 16]);
    }
}
