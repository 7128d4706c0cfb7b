//! Block transforms that regenerate round keys while they run.
//!
//! Shared by the tiny and small variants. Each function works on a local
//! copy of the retained key window and wipes it before returning.

use cipher_core::Block;
use zeroize::Zeroize;

use crate::key::{next_round_key_128, next_window_256, prev_round_key_128, prev_window_256};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows_and_sub_bytes, mix_columns,
    sub_bytes_and_shift_rows,
};

const ROUNDS_128: usize = 10;
const ROUNDS_256: usize = 14;
const ITERATIONS_256: usize = ROUNDS_256 / 2;

/// Runs the AES-128 recurrence from round key 0 to round key 10.
pub(crate) fn last_round_key_128(first: &Block) -> Block {
    let mut key = *first;
    for iteration in 1..=ROUNDS_128 {
        next_round_key_128(&mut key, iteration);
    }
    key
}

/// Runs the AES-256 recurrence until the window starts with round key 14.
pub(crate) fn last_window_256(first: &[Block; 2]) -> [Block; 2] {
    let mut window = *first;
    for iteration in 1..=ITERATIONS_256 {
        next_window_256(&mut window, iteration);
    }
    window
}

/// AES-128 encryption starting from round key 0.
pub(crate) fn encrypt_128(state: &mut Block, first: &Block) {
    let mut key = *first;
    add_round_key(state, &key);
    for round in 1..=ROUNDS_128 {
        next_round_key_128(&mut key, round);
        sub_bytes_and_shift_rows(state);
        if round != ROUNDS_128 {
            mix_columns(state);
        }
        add_round_key(state, &key);
    }
    key.zeroize();
}

/// AES-128 decryption starting from round key 10.
pub(crate) fn decrypt_128(state: &mut Block, last: &Block) {
    let mut key = *last;
    add_round_key(state, &key);
    inv_shift_rows_and_sub_bytes(state);
    for round in (1..ROUNDS_128).rev() {
        prev_round_key_128(&mut key, round + 1);
        add_round_key(state, &key);
        inv_mix_columns(state);
        inv_shift_rows_and_sub_bytes(state);
    }
    prev_round_key_128(&mut key, 1);
    add_round_key(state, &key);
    key.zeroize();
}

/// AES-256 encryption starting from the window `(rk0, rk1)`.
pub(crate) fn encrypt_256(state: &mut Block, first: &[Block; 2]) {
    let mut window = *first;
    add_round_key(state, &window[0]);
    for round in 1..ROUNDS_256 {
        sub_bytes_and_shift_rows(state);
        mix_columns(state);
        if round % 2 == 1 {
            add_round_key(state, &window[1]);
        } else {
            next_window_256(&mut window, round / 2);
            add_round_key(state, &window[0]);
        }
    }
    next_window_256(&mut window, ITERATIONS_256);
    sub_bytes_and_shift_rows(state);
    add_round_key(state, &window[0]);
    window.zeroize();
}

/// AES-256 decryption starting from the window `(rk14, rk15)`.
pub(crate) fn decrypt_256(state: &mut Block, last: &[Block; 2]) {
    let mut window = *last;
    add_round_key(state, &window[0]);
    inv_shift_rows_and_sub_bytes(state);
    for round in (1..ROUNDS_256).rev() {
        if round % 2 == 1 {
            prev_window_256(&mut window, (round + 1) / 2);
            add_round_key(state, &window[1]);
        } else {
            add_round_key(state, &window[0]);
        }
        inv_mix_columns(state);
        inv_shift_rows_and_sub_bytes(state);
    }
    add_round_key(state, &window[0]);
    window.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aes128, Aes256};
    use hex_literal::hex;
    use rand::RngCore;

    #[test]
    fn regenerated_last_keys_match_full_schedule() {
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let mut key = [0u8; 32];
            rng.fill_bytes(&mut key);

            let full128 = Aes128::with_key(&key[..16]).expect("16-byte key");
            let mut first = [0u8; 16];
            first.copy_from_slice(&key[..16]);
            assert_eq!(&last_round_key_128(&first), full128.round_key(10));

            let full256 = Aes256::with_key(&key).expect("32-byte key");
            let mut window = [[0u8; 16]; 2];
            window[0].copy_from_slice(&key[..16]);
            window[1].copy_from_slice(&key[16..]);
            assert_eq!(&last_window_256(&window)[0], full256.round_key(14));
        }
    }

    #[test]
    fn aes128_transforms_match_fips197() {
        let first = hex!("000102030405060708090a0b0c0d0e0f");
        let mut block = hex!("00112233445566778899aabbccddeeff");
        encrypt_128(&mut block, &first);
        assert_eq!(block, hex!("69c4e0d86a7b0430d8cdb78070b4c55a"));
        decrypt_128(&mut block, &last_round_key_128(&first));
        assert_eq!(block, hex!("00112233445566778899aabbccddeeff"));
    }

    #[test]
    fn aes256_transforms_match_fips197() {
        let first = [
            hex!("000102030405060708090a0b0c0d0e0f"),
            hex!("101112131415161718191a1b1c1d1e1f"),
        ];
        let mut block = hex!("00112233445566778899aabbccddeeff");
        encrypt_256(&mut block, &first);
        assert_eq!(block, hex!("8ea2b7ca516745bfeafc49904b496089"));
        decrypt_256(&mut block, &last_window_256(&first));
        assert_eq!(block, hex!("00112233445566778899aabbccddeeff"));
    }
}
