//! Block encryption and decryption over a precomputed schedule.

use cipher_core::Block;

use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows_and_sub_bytes, mix_columns,
    sub_bytes_and_shift_rows,
};

/// Encrypts one block with the forward schedule (`rounds + 1` round keys).
pub(crate) fn encrypt_block(state: &mut Block, schedule: &[Block]) {
    let rounds = schedule.len() - 1;

    add_round_key(state, &schedule[0]);
    for round_key in &schedule[1..rounds] {
        sub_bytes_and_shift_rows(state);
        mix_columns(state);
        add_round_key(state, round_key);
    }
    sub_bytes_and_shift_rows(state);
    add_round_key(state, &schedule[rounds]);
}

/// Decrypts one block with an equivalent-inverse schedule built by
/// [`invert_schedule`].
pub(crate) fn decrypt_block(state: &mut Block, inverse: &[Block]) {
    let rounds = inverse.len() - 1;

    add_round_key(state, &inverse[0]);
    for round_key in &inverse[1..rounds] {
        inv_shift_rows_and_sub_bytes(state);
        inv_mix_columns(state);
        add_round_key(state, round_key);
    }
    inv_shift_rows_and_sub_bytes(state);
    add_round_key(state, &inverse[rounds]);
}

/// Reverses the forward schedule and applies InvMixColumns to the interior
/// round keys, so decryption can reuse the forward round structure.
pub(crate) fn invert_schedule<const RK: usize>(schedule: &[Block; RK]) -> [Block; RK] {
    let mut inverse = *schedule;
    inverse.reverse();
    for round_key in &mut inverse[1..RK - 1] {
        inv_mix_columns(round_key);
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::expand_key;
    use hex_literal::hex;
    use rand::RngCore;

    const NIST_PLAIN: Block = hex!("00112233445566778899aabbccddeeff");

    #[test]
    fn encrypt_matches_nist_vector() {
        let rks = expand_key::<11>(&hex!("000102030405060708090a0b0c0d0e0f"));
        let mut block = NIST_PLAIN;
        encrypt_block(&mut block, &rks);
        assert_eq!(block, hex!("69c4e0d86a7b0430d8cdb78070b4c55a"));
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let rks = expand_key::<11>(&hex!("000102030405060708090a0b0c0d0e0f"));
        let inverse = invert_schedule(&rks);
        let mut block = hex!("69c4e0d86a7b0430d8cdb78070b4c55a");
        decrypt_block(&mut block, &inverse);
        assert_eq!(block, NIST_PLAIN);
    }

    #[test]
    fn inverse_schedule_keeps_outer_keys() {
        let rks = expand_key::<15>(&[0x5a; 32]);
        let inverse = invert_schedule(&rks);
        assert_eq!(inverse[0], rks[14]);
        assert_eq!(inverse[14], rks[0]);
        assert_ne!(inverse[1], rks[13]);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 24];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let rks = expand_key::<13>(&key_bytes);
            let inverse = invert_schedule(&rks);
            let mut state = block;
            encrypt_block(&mut state, &rks);
            decrypt_block(&mut state, &inverse);
            assert_eq!(state, block);
        }
    }
}
