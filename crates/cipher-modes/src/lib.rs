//! Block cipher modes for embedded targets.
//!
//! - [`Eax`]: authenticated encryption with associated data, built from a
//!   block cipher and [`Omac`].
//! - [`Xts`] and [`XtsSingleKey`]: tweakable sector encryption for storage.
//!
//! Both modes are generic over [`BlockCipher`] and never look past that
//! trait, so any AES tier (or another 128-bit cipher) can sit underneath.
//! Nothing here allocates; all working state lives in fixed-size arrays that
//! are wiped by `clear` and on drop.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod eax;
pub mod gf128;
mod omac;
mod xts;

pub use crate::eax::Eax;
pub use crate::omac::Omac;
pub use crate::xts::{Xts, XtsSingleKey, DEFAULT_SECTOR_SIZE, MAX_SECTOR_SIZE, TWEAK_SIZE};
pub use cipher_core::{Block, BlockCipher, Error, BLOCK_SIZE};
