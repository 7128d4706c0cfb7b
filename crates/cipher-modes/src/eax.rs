//! EAX authenticated encryption (Bellare, Rogaway, Wagner).

use cipher_core::{xor_in_place, Block, BlockCipher, Error, BLOCK_SIZE};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::omac::Omac;

/// OMAC domain tags.
const NONCE_TAG: u8 = 0;
const HEADER_TAG: u8 = 1;
const CIPHERTEXT_TAG: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    AwaitingIv,
    AuthData,
    Payload,
    Closed,
}

#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
struct State {
    counter: Block,
    stream: Block,
    tag: Block,
    hash: Block,
    enc_posn: usize,
}

/// EAX mode over a 128-bit block cipher.
///
/// Drive it as `set_key`, `set_iv`, any number of `add_auth_data`, any number
/// of `encrypt`/`decrypt`, then `compute_tag` or `check_tag`. Each phase
/// rejects calls that belong to an earlier one.
///
/// ```
/// use aes_core::Aes128;
/// use cipher_modes::Eax;
///
/// let mut eax = Eax::<Aes128>::new();
/// eax.set_key(&[0x11; 16]).unwrap();
/// eax.set_iv(b"unique nonce").unwrap();
/// eax.add_auth_data(b"header").unwrap();
/// let mut buf = *b"attack at dawn";
/// eax.encrypt_in_place(&mut buf).unwrap();
/// let mut tag = [0u8; 16];
/// eax.compute_tag(&mut tag).unwrap();
///
/// eax.set_iv(b"unique nonce").unwrap();
/// eax.add_auth_data(b"header").unwrap();
/// eax.decrypt_in_place(&mut buf).unwrap();
/// assert!(eax.check_tag(&tag));
/// assert_eq!(&buf, b"attack at dawn");
/// ```
pub struct Eax<C: BlockCipher> {
    cipher: C,
    omac: Omac,
    state: State,
    phase: Phase,
}

impl<C: BlockCipher + Default> Eax<C> {
    /// Creates an instance around an unkeyed cipher.
    pub fn new() -> Self {
        Self::with_cipher(C::default())
    }
}

impl<C: BlockCipher + Default> Default for Eax<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BlockCipher> Eax<C> {
    /// Wraps an existing cipher, which may already be keyed.
    pub fn with_cipher(cipher: C) -> Self {
        Self {
            cipher,
            omac: Omac::new(),
            state: State::default(),
            phase: Phase::AwaitingIv,
        }
    }

    /// The underlying block cipher.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Key length in bytes, as reported by the cipher.
    pub fn key_size(&self) -> usize {
        self.cipher.key_size()
    }

    /// Recommended nonce length; any non-empty length is accepted.
    pub fn iv_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Full tag length.
    pub fn tag_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Keys the cipher and discards any session in progress.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        self.cipher.set_key(key)?;
        self.state.zeroize();
        self.phase = Phase::AwaitingIv;
        Ok(())
    }

    /// Starts a new message under `iv`.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<(), Error> {
        if iv.is_empty() {
            return Err(Error::InvalidIvLength(0));
        }

        let state = &mut self.state;
        self.omac.init_first(&self.cipher, &mut state.counter, NONCE_TAG);
        self.omac.update(&self.cipher, &mut state.counter, iv);
        self.omac.finalize(&self.cipher, &mut state.counter);

        // N = OMAC^0(iv) seeds both the counter and the tag.
        state.tag = state.counter;
        state.stream.zeroize();
        state.enc_posn = BLOCK_SIZE;
        self.omac.init_next(&mut state.hash, HEADER_TAG);
        self.phase = Phase::AuthData;
        Ok(())
    }

    /// Authenticates `data` without encrypting it.
    pub fn add_auth_data(&mut self, data: &[u8]) -> Result<(), Error> {
        match self.phase {
            Phase::AuthData => {
                self.omac.update(&self.cipher, &mut self.state.hash, data);
                Ok(())
            }
            Phase::AwaitingIv => Err(Error::IvNotSet),
            Phase::Payload | Phase::Closed => Err(Error::AuthDataAfterPayload),
        }
    }

    /// Encrypts `input` into `output`; both must have the same length.
    pub fn encrypt(&mut self, output: &mut [u8], input: &[u8]) -> Result<(), Error> {
        check_lengths(output, input)?;
        output.copy_from_slice(input);
        self.encrypt_in_place(output)
    }

    /// Encrypts `buf` in place.
    pub fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.begin_payload()?;
        self.apply_keystream(buf);
        self.omac.update(&self.cipher, &mut self.state.hash, buf);
        Ok(())
    }

    /// Decrypts `input` into `output`; both must have the same length.
    ///
    /// The plaintext must not be used until [`Eax::check_tag`] succeeds.
    pub fn decrypt(&mut self, output: &mut [u8], input: &[u8]) -> Result<(), Error> {
        check_lengths(output, input)?;
        output.copy_from_slice(input);
        self.decrypt_in_place(output)
    }

    /// Decrypts `buf` in place.
    pub fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.begin_payload()?;
        self.omac.update(&self.cipher, &mut self.state.hash, buf);
        self.apply_keystream(buf);
        Ok(())
    }

    /// Writes the first `tag.len()` bytes (1 to 16) of the tag.
    ///
    /// Ends the message; calling it again before the next `set_iv` yields the
    /// same tag.
    pub fn compute_tag(&mut self, tag: &mut [u8]) -> Result<(), Error> {
        if tag.is_empty() || tag.len() > BLOCK_SIZE {
            return Err(Error::InvalidTagLength(tag.len()));
        }
        self.close_tag()?;
        tag.copy_from_slice(&self.state.tag[..tag.len()]);
        Ok(())
    }

    /// Compares `tag` against the computed tag prefix in constant time.
    ///
    /// Returns `false` for an empty or over-long tag and when no message is
    /// in progress.
    pub fn check_tag(&mut self, tag: &[u8]) -> bool {
        if tag.is_empty() || tag.len() > BLOCK_SIZE || self.close_tag().is_err() {
            return false;
        }
        self.state.tag[..tag.len()].ct_eq(tag).into()
    }

    /// Erases the key, the OMAC subkey and every session buffer.
    pub fn clear(&mut self) {
        self.cipher.clear();
        self.omac.clear();
        self.state.zeroize();
        self.phase = Phase::AwaitingIv;
    }

    fn begin_payload(&mut self) -> Result<(), Error> {
        match self.phase {
            Phase::AwaitingIv => Err(Error::IvNotSet),
            Phase::AuthData => {
                self.close_auth_data();
                Ok(())
            }
            Phase::Payload => Ok(()),
            Phase::Closed => Err(Error::TagAlreadyComputed),
        }
    }

    fn close_auth_data(&mut self) {
        let state = &mut self.state;
        self.omac.finalize(&self.cipher, &mut state.hash);
        xor_in_place(&mut state.tag, &state.hash);
        self.omac.init_next(&mut state.hash, CIPHERTEXT_TAG);
        self.phase = Phase::Payload;
    }

    fn close_tag(&mut self) -> Result<(), Error> {
        match self.phase {
            Phase::AwaitingIv => return Err(Error::IvNotSet),
            Phase::AuthData => self.close_auth_data(),
            Phase::Payload => {}
            Phase::Closed => return Ok(()),
        }
        let state = &mut self.state;
        self.omac.finalize(&self.cipher, &mut state.hash);
        xor_in_place(&mut state.tag, &state.hash);
        self.phase = Phase::Closed;
        Ok(())
    }

    /// CTR mode; the counter is a 128-bit big-endian integer.
    fn apply_keystream(&mut self, buf: &mut [u8]) {
        let state = &mut self.state;
        let mut rest = buf;
        while !rest.is_empty() {
            if state.enc_posn == BLOCK_SIZE {
                state.stream = state.counter;
                self.cipher.encrypt_block(&mut state.stream);
                state.enc_posn = 0;

                // Walk all 16 bytes so the carry chain takes the same time
                // whatever the counter value.
                let mut carry = 1u16;
                for byte in state.counter.iter_mut().rev() {
                    carry += u16::from(*byte);
                    *byte = carry as u8;
                    carry >>= 8;
                }
            }
            let take = (BLOCK_SIZE - state.enc_posn).min(rest.len());
            let (head, tail) = rest.split_at_mut(take);
            xor_in_place(head, &state.stream[state.enc_posn..state.enc_posn + take]);
            state.enc_posn += take;
            rest = tail;
        }
    }
}

fn check_lengths(output: &[u8], input: &[u8]) -> Result<(), Error> {
    if output.len() != input.len() {
        return Err(Error::BufferLength {
            expected: input.len(),
            actual: output.len(),
        });
    }
    Ok(())
}
