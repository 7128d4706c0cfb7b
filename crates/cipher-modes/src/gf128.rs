//! Doubling in GF(2^128) modulo x^128 + x^7 + x^2 + x + 1.
//!
//! CMAC/EAX and XTS disagree on bit order, so there is one routine for each.

use cipher_core::Block;

const REDUCTION: u8 = 0x87;

/// Doubles a block read as a big-endian integer (CMAC and EAX subkeys).
pub fn dbl_be(block: &mut Block) {
    let carry = block[0] >> 7;
    for i in 0..15 {
        block[i] = (block[i] << 1) | (block[i + 1] >> 7);
    }
    block[15] = (block[15] << 1) ^ (REDUCTION & 0u8.wrapping_sub(carry));
}

/// Doubles an XTS tweak held as four little-endian words, least significant
/// word first.
pub fn dbl_xts(words: &mut [u32; 4]) {
    let carry = words[3] >> 31;
    words[3] = (words[3] << 1) | (words[2] >> 31);
    words[2] = (words[2] << 1) | (words[1] >> 31);
    words[1] = (words[1] << 1) | (words[0] >> 31);
    words[0] = (words[0] << 1) ^ (u32::from(REDUCTION) & 0u32.wrapping_sub(carry));
}

/// Splits a block into little-endian words.
pub fn words_from_block(block: &Block) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Inverse of [`words_from_block`].
pub fn block_from_words(words: &[u32; 4]) -> Block {
    let mut block = [0u8; 16];
    for (chunk, word) in block.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    block
}
