//! AES that keeps the key and the last round key(s).

use cipher_core::{Block, BlockCipher, Error};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::onthefly::{
    decrypt_128, decrypt_256, encrypt_128, encrypt_256, last_round_key_128, last_window_256,
};

/// AES-128 holding the key plus the final round key (32 bytes).
///
/// Decryption walks the schedule backwards from the cached final round key.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct AesSmall128 {
    schedule: Block,
    reverse: Block,
}

impl AesSmall128 {
    /// Key length in bytes.
    pub const KEY_SIZE: usize = 16;

    /// Creates an unkeyed instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance keyed with `key`.
    pub fn with_key(key: &[u8]) -> Result<Self, Error> {
        let mut cipher = Self::new();
        cipher.set_key(key)?;
        Ok(cipher)
    }
}

impl BlockCipher for AesSmall128 {
    fn key_size(&self) -> usize {
        Self::KEY_SIZE
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        if key.len() != Self::KEY_SIZE {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        self.schedule.copy_from_slice(key);
        self.reverse = last_round_key_128(&self.schedule);
        Ok(())
    }

    fn encrypt_block(&self, block: &mut Block) {
        encrypt_128(block, &self.schedule);
    }

    fn decrypt_block(&self, block: &mut Block) {
        decrypt_128(block, &self.reverse);
    }

    fn clear(&mut self) {
        self.zeroize();
    }
}

/// AES-256 holding the key plus the final key-schedule window (64 bytes).
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct AesSmall256 {
    schedule: [Block; 2],
    reverse: [Block; 2],
}

impl AesSmall256 {
    /// Key length in bytes.
    pub const KEY_SIZE: usize = 32;

    /// Creates an unkeyed instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance keyed with `key`.
    pub fn with_key(key: &[u8]) -> Result<Self, Error> {
        let mut cipher = Self::new();
        cipher.set_key(key)?;
        Ok(cipher)
    }
}

impl BlockCipher for AesSmall256 {
    fn key_size(&self) -> usize {
        Self::KEY_SIZE
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        if key.len() != Self::KEY_SIZE {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        let (lo, hi) = key.split_at(16);
        self.schedule[0].copy_from_slice(lo);
        self.schedule[1].copy_from_slice(hi);
        self.reverse = last_window_256(&self.schedule);
        Ok(())
    }

    fn encrypt_block(&self, block: &mut Block) {
        encrypt_256(block, &self.schedule);
    }

    fn decrypt_block(&self, block: &mut Block) {
        decrypt_256(block, &self.reverse);
    }

    fn clear(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aes128, Aes256, AesTiny128, AesTiny256};
    use hex_literal::hex;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn all_128_tiers_agree(key in any::<[u8; 16]>(), block in any::<[u8; 16]>()) {
            let small = AesSmall128::with_key(&key).unwrap();
            let tiny = AesTiny128::with_key(&key).unwrap();
            let full = Aes128::with_key(&key).unwrap();
            let ct = small.encrypt_block_to(&block);
            prop_assert_eq!(ct, tiny.encrypt_block_to(&block));
            prop_assert_eq!(ct, full.encrypt_block_to(&block));
            prop_assert_eq!(small.decrypt_block_to(&ct), block);
        }

        #[test]
        fn all_256_tiers_agree(key in any::<[u8; 32]>(), block in any::<[u8; 16]>()) {
            let small = AesSmall256::with_key(&key).unwrap();
            let tiny = AesTiny256::with_key(&key).unwrap();
            let full = Aes256::with_key(&key).unwrap();
            let ct = small.encrypt_block_to(&block);
            prop_assert_eq!(ct, tiny.encrypt_block_to(&block));
            prop_assert_eq!(ct, full.encrypt_block_to(&block));
            prop_assert_eq!(small.decrypt_block_to(&ct), block);
        }
    }

    #[test]
    fn cached_reverse_is_final_round_key() {
        let key = hex!("2b7e151628aed2a6abf7158809cf4f3c");
        let small = AesSmall128::with_key(&key).unwrap();
        assert_eq!(small.reverse, hex!("d014f9a8c9ee2589e13f0cc8b6630ca6"));

        let key = hex!("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
        let small = AesSmall256::with_key(&key).unwrap();
        assert_eq!(small.reverse[0], hex!("fe4890d1e6188d0b046df344706c631e"));
    }

    #[test]
    fn failed_set_key_keeps_both_caches() {
        let mut small = AesSmall256::with_key(&[3u8; 32]).unwrap();
        let reverse = small.reverse;
        assert!(small.set_key(&[0u8; 31]).is_err());
        assert_eq!(small.schedule, [[3u8; 16]; 2]);
        assert_eq!(small.reverse, reverse);
    }

    #[test]
    fn clear_erases_key_and_reverse_schedule() {
        let mut small = AesSmall128::with_key(&[0x77; 16]).unwrap();
        small.clear();
        assert_eq!(small.schedule, [0u8; 16]);
        assert_eq!(small.reverse, [0u8; 16]);
    }
}
