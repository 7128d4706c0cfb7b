//! AES with fully expanded encryption and decryption schedules.

use cipher_core::{Block, BlockCipher, Error};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::{decrypt_block, encrypt_block, invert_schedule};
use crate::key::expand_key;

macro_rules! full_aes {
    ($(#[$meta:meta])* $name:ident, key: $key_len:literal, round_keys: $rk:literal) => {
        $(#[$meta])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            schedule: [Block; $rk],
            inverse: [Block; $rk],
        }

        impl $name {
            /// Key length in bytes.
            pub const KEY_SIZE: usize = $key_len;
            /// Number of cipher rounds.
            pub const ROUNDS: usize = $rk - 1;

            /// Creates an instance holding an all-zero schedule; call
            /// [`BlockCipher::set_key`] before use.
            pub fn new() -> Self {
                Self {
                    schedule: [[0u8; 16]; $rk],
                    inverse: [[0u8; 16]; $rk],
                }
            }

            /// Creates an instance keyed with `key`.
            pub fn with_key(key: &[u8]) -> Result<Self, Error> {
                let mut cipher = Self::new();
                cipher.set_key(key)?;
                Ok(cipher)
            }

            #[cfg(test)]
            pub(crate) fn round_key(&self, round: usize) -> &Block {
                &self.schedule[round]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl BlockCipher for $name {
            fn key_size(&self) -> usize {
                Self::KEY_SIZE
            }

            fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
                if key.len() != Self::KEY_SIZE {
                    return Err(Error::InvalidKeyLength(key.len()));
                }
                self.schedule = expand_key::<$rk>(key);
                self.inverse = invert_schedule(&self.schedule);
                Ok(())
            }

            fn encrypt_block(&self, block: &mut Block) {
                encrypt_block(block, &self.schedule);
            }

            fn decrypt_block(&self, block: &mut Block) {
                decrypt_block(block, &self.inverse);
            }

            fn clear(&mut self) {
                self.zeroize();
            }
        }
    };
}

full_aes!(
    /// AES-128 with the 11 round keys held for both directions (352 bytes).
    Aes128, key: 16, round_keys: 11
);
full_aes!(
    /// AES-192 with the 13 round keys held for both directions (416 bytes).
    Aes192, key: 24, round_keys: 13
);
full_aes!(
    /// AES-256 with the 15 round keys held for both directions (480 bytes).
    Aes256, key: 32, round_keys: 15
);
