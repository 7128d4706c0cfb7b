//! OMAC1 (CMAC) with optional one-block domain tags, as EAX uses it.

use cipher_core::{xor_in_place, Block, BlockCipher, BLOCK_SIZE};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::gf128::dbl_be;

/// Incremental OMAC over a caller-held 16-byte accumulator.
///
/// The accumulator lives outside so one `Omac` can drive several
/// computations one after another (EAX runs three). The cipher is passed in
/// on every call rather than stored.
///
/// A tagged computation `OMAC^t(M)` is `CMAC(K, [t]_16 || M)`: the
/// accumulator starts as the full block `0..0 t`, which is encrypted as soon
/// as more data arrives.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Omac {
    subkey: Block,
    posn: usize,
}

impl Omac {
    /// Creates an instance with no subkey; call an `init_*` method first.
    pub fn new() -> Self {
        Self::default()
    }

    fn derive_subkey<C: BlockCipher + ?Sized>(&mut self, cipher: &C) {
        self.subkey = [0u8; BLOCK_SIZE];
        cipher.encrypt_block(&mut self.subkey);
        dbl_be(&mut self.subkey);
    }

    /// Derives the subkey from `cipher` and starts `OMAC^tag`.
    pub fn init_first<C: BlockCipher + ?Sized>(&mut self, cipher: &C, mac: &mut Block, tag: u8) {
        self.derive_subkey(cipher);
        self.init_next(mac, tag);
    }

    /// Starts `OMAC^tag` with the subkey derived by an earlier `init_*` call.
    pub fn init_next(&mut self, mac: &mut Block, tag: u8) {
        *mac = [0u8; BLOCK_SIZE];
        mac[BLOCK_SIZE - 1] = tag;
        self.posn = BLOCK_SIZE;
    }

    /// Derives the subkey from `cipher` and starts an untagged CMAC.
    pub fn init_plain<C: BlockCipher + ?Sized>(&mut self, cipher: &C, mac: &mut Block) {
        self.derive_subkey(cipher);
        *mac = [0u8; BLOCK_SIZE];
        self.posn = 0;
    }

    /// Absorbs `data`.
    pub fn update<C: BlockCipher + ?Sized>(&mut self, cipher: &C, mac: &mut Block, data: &[u8]) {
        let mut rest = data;
        while !rest.is_empty() {
            if self.posn == BLOCK_SIZE {
                cipher.encrypt_block(mac);
                self.posn = 0;
            }
            let take = (BLOCK_SIZE - self.posn).min(rest.len());
            xor_in_place(&mut mac[self.posn..self.posn + take], &rest[..take]);
            self.posn += take;
            rest = &rest[take..];
        }
    }

    /// Pads the final block and leaves the MAC value in `mac`.
    pub fn finalize<C: BlockCipher + ?Sized>(&mut self, cipher: &C, mac: &mut Block) {
        if self.posn == BLOCK_SIZE {
            xor_in_place(mac, &self.subkey);
        } else {
            let mut pad = self.subkey;
            dbl_be(&mut pad);
            mac[self.posn] ^= 0x80;
            xor_in_place(mac, &pad);
            pad.zeroize();
        }
        cipher.encrypt_block(mac);
    }

    /// Erases the subkey.
    pub fn clear(&mut self) {
        self.zeroize();
    }
}
