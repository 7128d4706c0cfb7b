//! Block representation helpers.

/// Size in bytes of every block handled by this library.
pub const BLOCK_SIZE: usize = 16;

/// A single 128-bit cipher block.
pub type Block = [u8; BLOCK_SIZE];

/// XORs `rhs` into `dst`, byte by byte over the shorter of the two slices.
#[inline]
pub fn xor_in_place(dst: &mut [u8], rhs: &[u8]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
