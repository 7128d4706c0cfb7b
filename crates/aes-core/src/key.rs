//! AES key-schedule recurrence.
//!
//! Every tier uses the same recurrence: the full variants unroll it once into
//! a table, the small and tiny variants step it forwards or backwards one
//! round key at a time.

use cipher_core::Block;
use zeroize::Zeroize;

use crate::sbox::sbox;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

/// Largest schedule in words (AES-256: 15 round keys).
const MAX_WORDS: usize = 60;

/// RotWord, SubWord and the round constant for the 1-based `iteration`.
#[inline]
pub(crate) fn schedule_core(word: [u8; 4], iteration: usize) -> [u8; 4] {
    [
        sbox(word[1]) ^ RCON[iteration - 1],
        sbox(word[2]),
        sbox(word[3]),
        sbox(word[0]),
    ]
}

#[inline]
pub(crate) fn sub_word(word: [u8; 4]) -> [u8; 4] {
    [sbox(word[0]), sbox(word[1]), sbox(word[2]), sbox(word[3])]
}

#[inline]
fn word(key: &Block, idx: usize) -> [u8; 4] {
    let o = idx * 4;
    [key[o], key[o + 1], key[o + 2], key[o + 3]]
}

#[inline]
fn xor_word(key: &mut Block, idx: usize, value: [u8; 4]) {
    for (k, v) in key[idx * 4..idx * 4 + 4].iter_mut().zip(value) {
        *k ^= v;
    }
}

/// Mixes `head` into word 0, then chains words 1..4 onto their predecessor.
fn fold_forward(key: &mut Block, head: [u8; 4]) {
    xor_word(key, 0, head);
    for idx in 1..4 {
        let prev = word(key, idx - 1);
        xor_word(key, idx, prev);
    }
}

/// Undoes the chaining of words 1..4; word 0 is left for the caller.
fn unfold_tail(key: &mut Block) {
    for idx in (1..4).rev() {
        let prev = word(key, idx - 1);
        xor_word(key, idx, prev);
    }
}

/// AES-128: turns round key `iteration - 1` into round key `iteration`.
pub(crate) fn next_round_key_128(key: &mut Block, iteration: usize) {
    let head = schedule_core(word(key, 3), iteration);
    fold_forward(key, head);
}

/// AES-128: turns round key `iteration` back into round key `iteration - 1`.
pub(crate) fn prev_round_key_128(key: &mut Block, iteration: usize) {
    unfold_tail(key);
    let head = schedule_core(word(key, 3), iteration);
    xor_word(key, 0, head);
}

/// AES-256: advances the two-round-key window by one iteration, turning
/// round keys `(2i-2, 2i-1)` into `(2i, 2i+1)`.
pub(crate) fn next_window_256(window: &mut [Block; 2], iteration: usize) {
    let head = schedule_core(word(&window[1], 3), iteration);
    fold_forward(&mut window[0], head);
    let head = sub_word(word(&window[0], 3));
    fold_forward(&mut window[1], head);
}

/// AES-256: inverse of [`next_window_256`] for the same `iteration`.
pub(crate) fn prev_window_256(window: &mut [Block; 2], iteration: usize) {
    unfold_tail(&mut window[1]);
    let head = sub_word(word(&window[0], 3));
    xor_word(&mut window[1], 0, head);
    unfold_tail(&mut window[0]);
    let head = schedule_core(word(&window[1], 3), iteration);
    xor_word(&mut window[0], 0, head);
}

/// Expands a 16, 24 or 32 byte key into `RK` round keys.
///
/// The caller guarantees `key.len()` matches `RK` (16/11, 24/13, 32/15).
pub(crate) fn expand_key<const RK: usize>(key: &[u8]) -> [Block; RK] {
    let nk = key.len() / 4;
    let total = RK * 4;
    let mut w = [[0u8; 4]; MAX_WORDS];
    for (dst, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
        dst.copy_from_slice(chunk);
    }

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = schedule_core(temp, i / nk);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        for (j, t) in temp.iter().enumerate() {
            w[i][j] = w[i - nk][j] ^ t;
        }
    }

    let mut round_keys = [[0u8; 16]; RK];
    for (round, rk) in round_keys.iter_mut().enumerate() {
        for (col, chunk) in rk.chunks_exact_mut(4).enumerate() {
            chunk.copy_from_slice(&w[round * 4 + col]);
        }
    }
    w.zeroize();
    round_keys
}
