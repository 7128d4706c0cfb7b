//! Configuration errors reported by ciphers and modes.

use thiserror::Error;

/// Errors reported at the call that detected them.
///
/// A failed tag check is not an error: tag checks return `false` and the
/// caller rejects the ciphertext.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The key length is not accepted by the cipher or mode.
    #[error("unsupported key length: {0} bytes")]
    InvalidKeyLength(usize),

    /// The nonce length is not accepted.
    #[error("unsupported IV length: {0} bytes")]
    InvalidIvLength(usize),

    /// The tweak is longer than one block.
    #[error("unsupported tweak length: {0} bytes")]
    InvalidTweakLength(usize),

    /// The sector size is zero, not a block multiple, or above the maximum.
    #[error("unsupported sector size: {0} bytes")]
    InvalidSectorSize(usize),

    /// The requested tag length is zero or longer than the full tag.
    #[error("unsupported tag length: {0} bytes")]
    InvalidTagLength(usize),

    /// An input or output buffer does not have the required length.
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength {
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// An operation needing a nonce ran before one was set.
    #[error("no IV has been set")]
    IvNotSet,

    /// Associated data was supplied after payload processing started.
    #[error("associated data must precede the payload")]
    AuthDataAfterPayload,

    /// Payload was supplied after the tag was produced.
    #[error("tag already computed; set a new IV first")]
    TagAlreadyComputed,
}
