//! AES that keeps nothing but the key.

use cipher_core::{Block, BlockCipher, Error};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::onthefly::{
    decrypt_128, decrypt_256, encrypt_128, encrypt_256, last_round_key_128, last_window_256,
};

/// AES-128 holding only the 16-byte key.
///
/// Decryption replays the whole key schedule forward before every block.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct AesTiny128 {
    schedule: Block,
}

impl AesTiny128 {
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

impl BlockCipher for AesTiny128 {
    fn key_size(&self) -> usize {
        Self::KEY_SIZE
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        if key.len() != Self::KEY_SIZE {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        self.schedule.copy_from_slice(key);
        Ok(())
    }

    fn encrypt_block(&self, block: &mut Block) {
        encrypt_128(block, &self.schedule);
    }

    fn decrypt_block(&self, block: &mut Block) {
        let mut last = last_round_key_128(&self.schedule);
        decrypt_128(block, &last);
        last.zeroize();
    }

    fn clear(&mut self) {
        self.zeroize();
    }
}

/// AES-256 holding only the 32-byte key.
///
/// Decryption replays the whole key schedule forward before every block.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct AesTiny256 {
    schedule: [Block; 2],
}

impl AesTiny256 {
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

impl BlockCipher for AesTiny256 {
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
        Ok(())
    }

    fn encrypt_block(&self, block: &mut Block) {
        encrypt_256(block, &self.schedule);
    }

    fn decrypt_block(&self, block: &mut Block) {
        let mut last = last_window_256(&self.schedule);
        decrypt_256(block, &last);
        last.zeroize();
    }

    fn clear(&mut self) {
        self.zeroize();
    }
}
