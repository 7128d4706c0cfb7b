//! XTS tweakable sector encryption (IEEE 1619).

use cipher_core::{xor_in_place, Block, BlockCipher, Error, BLOCK_SIZE};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::gf128::{block_from_words, dbl_xts, words_from_block};

/// Sector size used until [`Xts::set_sector_size`] is called.
pub const DEFAULT_SECTOR_SIZE: usize = 512;

/// Largest accepted sector size.
pub const MAX_SECTOR_SIZE: usize = 4096;

/// Length of a tweak (sector identifier) in bytes.
pub const TWEAK_SIZE: usize = BLOCK_SIZE;

/// Tweak and geometry shared by the one- and two-key variants. The ciphers
/// are passed in by the owning wrapper.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct Sector {
    tweak: [u32; 4],
    size: usize,
}

impl Sector {
    fn new() -> Self {
        Self {
            tweak: [0u32; 4],
            size: DEFAULT_SECTOR_SIZE,
        }
    }

    fn set_size(&mut self, size: usize) -> Result<(), Error> {
        if size == 0 || size % BLOCK_SIZE != 0 || size > MAX_SECTOR_SIZE {
            return Err(Error::InvalidSectorSize(size));
        }
        self.size = size;
        Ok(())
    }

    fn set_tweak<C: BlockCipher + ?Sized>(
        &mut self,
        cipher: &C,
        tweak: &[u8],
    ) -> Result<(), Error> {
        if tweak.len() > TWEAK_SIZE {
            return Err(Error::InvalidTweakLength(tweak.len()));
        }
        let mut block = [0u8; TWEAK_SIZE];
        block[..tweak.len()].copy_from_slice(tweak);
        self.load_tweak(cipher, block);
        Ok(())
    }

    fn load_tweak<C: BlockCipher + ?Sized>(&mut self, cipher: &C, mut block: Block) {
        cipher.encrypt_block(&mut block);
        self.tweak = words_from_block(&block);
        block.zeroize();
    }

    fn process<C: BlockCipher + ?Sized>(
        &self,
        cipher: &C,
        buf: &mut [u8],
        encrypt: bool,
    ) -> Result<(), Error> {
        if buf.len() != self.size {
            return Err(Error::BufferLength {
                expected: self.size,
                actual: buf.len(),
            });
        }

        let mut tweak = self.tweak;
        let mut block = [0u8; BLOCK_SIZE];
        for chunk in buf.chunks_exact_mut(BLOCK_SIZE) {
            let mut t = block_from_words(&tweak);
            block.copy_from_slice(chunk);
            xor_in_place(&mut block, &t);
            if encrypt {
                cipher.encrypt_block(&mut block);
            } else {
                cipher.decrypt_block(&mut block);
            }
            xor_in_place(&mut block, &t);
            chunk.copy_from_slice(&block);
            t.zeroize();
            dbl_xts(&mut tweak);
        }
        tweak.zeroize();
        block.zeroize();
        Ok(())
    }
}

fn copy_checked(output: &mut [u8], input: &[u8]) -> Result<(), Error> {
    if output.len() != input.len() {
        return Err(Error::BufferLength {
            expected: input.len(),
            actual: output.len(),
        });
    }
    output.copy_from_slice(input);
    Ok(())
}

fn sector_key(sector: u64) -> Block {
    let mut block = [0u8; TWEAK_SIZE];
    block[..8].copy_from_slice(&sector.to_le_bytes());
    block
}

/// Two-key XTS: `C1` encrypts data, `C2` encrypts the tweak.
///
/// The key is `data key || tweak key`, the IEEE 1619 Key1/Key2 order.
///
/// ```
/// use aes_core::Aes128;
/// use cipher_modes::Xts;
///
/// let mut xts = Xts::<Aes128>::new();
/// xts.set_key(&[0x24; 32]).unwrap();
/// xts.set_sector_size(32).unwrap();
/// xts.set_sector_number(7);
///
/// let mut sector = [0xabu8; 32];
/// xts.encrypt_sector_in_place(&mut sector).unwrap();
/// xts.decrypt_sector_in_place(&mut sector).unwrap();
/// assert_eq!(sector, [0xabu8; 32]);
/// ```
pub struct Xts<C1: BlockCipher, C2: BlockCipher = C1> {
    data_cipher: C1,
    tweak_cipher: C2,
    sector: Sector,
}

impl<C1: BlockCipher + Default, C2: BlockCipher + Default> Xts<C1, C2> {
    /// Creates an instance around two unkeyed ciphers.
    pub fn new() -> Self {
        Self::with_ciphers(C1::default(), C2::default())
    }
}

impl<C1: BlockCipher + Default, C2: BlockCipher + Default> Default for Xts<C1, C2> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C1: BlockCipher, C2: BlockCipher> Xts<C1, C2> {
    /// Wraps existing data and tweak ciphers.
    pub fn with_ciphers(data_cipher: C1, tweak_cipher: C2) -> Self {
        Self {
            data_cipher,
            tweak_cipher,
            sector: Sector::new(),
        }
    }

    /// Combined key length: data key plus tweak key.
    pub fn key_size(&self) -> usize {
        self.data_cipher.key_size() + self.tweak_cipher.key_size()
    }

    /// Tweak length in bytes.
    pub fn tweak_size(&self) -> usize {
        TWEAK_SIZE
    }

    /// Current sector size in bytes.
    pub fn sector_size(&self) -> usize {
        self.sector.size
    }

    /// Sets the sector size: a non-zero multiple of 16, at most
    /// [`MAX_SECTOR_SIZE`].
    pub fn set_sector_size(&mut self, size: usize) -> Result<(), Error> {
        self.sector.set_size(size)
    }

    /// Splits `key` into the data key and the tweak key.
    ///
    /// Odd lengths are rejected before any split is attempted. Both halves
    /// are installed on copies first, so a rejected half leaves both ciphers
    /// on their previous keys.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), Error>
    where
        C1: Clone,
        C2: Clone,
    {
        if key.len() % 2 != 0 || key.len() != self.key_size() {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        let (data_key, tweak_key) = key.split_at(self.data_cipher.key_size());
        let mut data_cipher = self.data_cipher.clone();
        data_cipher.set_key(data_key)?;
        let mut tweak_cipher = self.tweak_cipher.clone();
        tweak_cipher.set_key(tweak_key)?;
        self.data_cipher = data_cipher;
        self.tweak_cipher = tweak_cipher;
        Ok(())
    }

    /// Encrypts a sector identifier of up to 16 bytes (zero padded) to form
    /// the tweak for the next sector operations.
    pub fn set_tweak(&mut self, tweak: &[u8]) -> Result<(), Error> {
        self.sector.set_tweak(&self.tweak_cipher, tweak)
    }

    /// Uses a data-unit sequence number, little-endian, as the tweak.
    pub fn set_sector_number(&mut self, sector: u64) {
        self.sector.load_tweak(&self.tweak_cipher, sector_key(sector));
    }

    /// Encrypts one sector from `input` into `output`.
    pub fn encrypt_sector(&self, output: &mut [u8], input: &[u8]) -> Result<(), Error> {
        copy_checked(output, input)?;
        self.encrypt_sector_in_place(output)
    }

    /// Encrypts one sector in place.
    pub fn encrypt_sector_in_place(&self, buf: &mut [u8]) -> Result<(), Error> {
        self.sector.process(&self.data_cipher, buf, true)
    }

    /// Decrypts one sector from `input` into `output`.
    pub fn decrypt_sector(&self, output: &mut [u8], input: &[u8]) -> Result<(), Error> {
        copy_checked(output, input)?;
        self.decrypt_sector_in_place(output)
    }

    /// Decrypts one sector in place.
    pub fn decrypt_sector_in_place(&self, buf: &mut [u8]) -> Result<(), Error> {
        self.sector.process(&self.data_cipher, buf, false)
    }

    /// Erases both keys and the tweak. The sector size is kept.
    pub fn clear(&mut self) {
        self.data_cipher.clear();
        self.tweak_cipher.clear();
        self.sector.tweak.zeroize();
    }
}

/// XTS with one cipher and one key serving both the tweak and the data.
pub struct XtsSingleKey<C: BlockCipher> {
    cipher: C,
    sector: Sector,
}

impl<C: BlockCipher + Default> XtsSingleKey<C> {
    /// Creates an instance around an unkeyed cipher.
    pub fn new() -> Self {
        Self::with_cipher(C::default())
    }
}

impl<C: BlockCipher + Default> Default for XtsSingleKey<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BlockCipher> XtsSingleKey<C> {
    /// Wraps an existing cipher.
    pub fn with_cipher(cipher: C) -> Self {
        Self {
            cipher,
            sector: Sector::new(),
        }
    }

    /// Key length, as reported by the cipher.
    pub fn key_size(&self) -> usize {
        self.cipher.key_size()
    }

    /// Tweak length in bytes.
    pub fn tweak_size(&self) -> usize {
        TWEAK_SIZE
    }

    /// Current sector size in bytes.
    pub fn sector_size(&self) -> usize {
        self.sector.size
    }

    /// See [`Xts::set_sector_size`].
    pub fn set_sector_size(&mut self, size: usize) -> Result<(), Error> {
        self.sector.set_size(size)
    }

    /// Keys the single cipher.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        self.cipher.set_key(key)
    }

    /// See [`Xts::set_tweak`].
    pub fn set_tweak(&mut self, tweak: &[u8]) -> Result<(), Error> {
        self.sector.set_tweak(&self.cipher, tweak)
    }

    /// See [`Xts::set_sector_number`].
    pub fn set_sector_number(&mut self, sector: u64) {
        self.sector.load_tweak(&self.cipher, sector_key(sector));
    }

    /// Encrypts one sector from `input` into `output`.
    pub fn encrypt_sector(&self, output: &mut [u8], input: &[u8]) -> Result<(), Error> {
        copy_checked(output, input)?;
        self.encrypt_sector_in_place(output)
    }

    /// Encrypts one sector in place.
    pub fn encrypt_sector_in_place(&self, buf: &mut [u8]) -> Result<(), Error> {
        self.sector.process(&self.cipher, buf, true)
    }

    /// Decrypts one sector from `input` into `output`.
    pub fn decrypt_sector(&self, output: &mut [u8], input: &[u8]) -> Result<(), Error> {
        copy_checked(output, input)?;
        self.decrypt_sector_in_place(output)
    }

    /// Decrypts one sector in place.
    pub fn decrypt_sector_in_place(&self, buf: &mut [u8]) -> Result<(), Error> {
        self.sector.process(&self.cipher, buf, false)
    }

    /// Erases the key and the tweak. The sector size is kept.
    pub fn clear(&mut self) {
        self.cipher.clear();
        self.sector.tweak.zeroize();
    }
}
