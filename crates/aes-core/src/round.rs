//! AES round transformations shared by every variant.

use cipher_core::{xor_in_place, Block};

use crate::sbox::{inv_sbox, sbox};

/// Source index for each output byte of ShiftRows (column-major state).
const SHIFT_ROWS: [usize; 16] = [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11];

/// Source index for each output byte of InvShiftRows.
const INV_SHIFT_ROWS: [usize; 16] = [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3];

/// Applies SubBytes and ShiftRows in a single pass.
#[inline]
pub(crate) fn sub_bytes_and_shift_rows(state: &mut Block) {
    let input = *state;
    for (out, &src) in state.iter_mut().zip(SHIFT_ROWS.iter()) {
        *out = sbox(input[src]);
    }
}

/// Applies InvShiftRows and InvSubBytes in a single pass.
#[inline]
pub(crate) fn inv_shift_rows_and_sub_bytes(state: &mut Block) {
    let input = *state;
    for (out, &src) in state.iter_mut().zip(INV_SHIFT_ROWS.iter()) {
        *out = inv_sbox(input[src]);
    }
}

#[inline]
fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ (0x1b & 0u8.wrapping_sub(byte >> 7))
}

fn mix_single_column(col: &mut [u8]) {
    let (a0, a1, a2, a3) = (col[0], col[1], col[2], col[3]);
    let all = a0 ^ a1 ^ a2 ^ a3;
    col[0] = a0 ^ all ^ xtime(a0 ^ a1);
    col[1] = a1 ^ all ^ xtime(a1 ^ a2);
    col[2] = a2 ^ all ^ xtime(a2 ^ a3);
    col[3] = a3 ^ all ^ xtime(a3 ^ a0);
}

/// MixColumns over all four columns.
#[inline]
pub(crate) fn mix_columns(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        mix_single_column(col);
    }
}

/// Inverse MixColumns over all four columns.
///
/// Multiplying by the inverse matrix factors into a cheap preprocessing step
/// followed by the forward MixColumns.
#[inline]
pub(crate) fn inv_mix_columns(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let u = xtime(xtime(col[0] ^ col[2]));
        let v = xtime(xtime(col[1] ^ col[3]));
        col[0] ^= u;
        col[1] ^= v;
        col[2] ^= u;
        col[3] ^= v;
        mix_single_column(col);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub(crate) fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn mix_columns_matches_known_columns() {
        // Test columns from the FIPS-197 / Wikipedia MixColumns examples.
        let mut state = hex!("db135345 f20a225c 01010101 c6c6c6c6");
        mix_columns(&mut state);
        assert_eq!(state, hex!("8e4da1bc 9fdc589d 01010101 c6c6c6c6"));
    }

    #[test]
    fn inv_mix_columns_undoes_mix_columns() {
        let original: Block = core::array::from_fn(|i| (i as u8).wrapping_mul(37));
        let mut state = original;
        mix_columns(&mut state);
        inv_mix_columns(&mut state);
        assert_eq!(state, original);
    }

    #[test]
    fn shift_rows_round_trip() {
        let original: Block = core::array::from_fn(|i| i as u8);
        let mut state = original;
        sub_bytes_and_shift_rows(&mut state);
        assert_eq!(state[1], sbox(5));
        assert_eq!(state[13], sbox(1));
        inv_shift_rows_and_sub_bytes(&mut state);
        assert_eq!(state, original);
    }

    #[test]
    fn fips197_first_round_of_appendix_b() {
        // Round 1 of the FIPS-197 Appendix B cipher example.
        let mut state = hex!("193de3bea0f4e22b9ac68d2ae9f84808");
        sub_bytes_and_shift_rows(&mut state);
        assert_eq!(state, hex!("d4bf5d30e0b452aeb84111f11e2798e5"));
        mix_columns(&mut state);
        assert_eq!(state, hex!("046681e5e0cb199a48f8d37a2806264c"));
        add_round_key(&mut state, &hex!("a0fafe1788542cb123a339392a6c7605"));
        assert_eq!(state, hex!("a49c7ff2689f352b6b5bea43026a5049"));
    }
}
