//! Software AES for memory-constrained targets.
//!
//! Three tiers implement the same [`BlockCipher`] capability and produce
//! identical output for identical keys:
//! - [`Aes128`], [`Aes192`], [`Aes256`] keep the full forward schedule plus a
//!   cached equivalent-inverse schedule. Fastest, largest.
//! - [`AesSmall128`], [`AesSmall256`] keep the first and the last round key(s)
//!   and regenerate everything else on the fly, forwards for encryption and
//!   backwards for decryption.
//! - [`AesTiny128`], [`AesTiny256`] keep only the key itself. Decryption first
//!   replays the schedule forward to reach the last round key.
//!
//! The implementation follows FIPS-197 and favours small code and small
//! state over speed. It is not hardened against cache-timing attacks on the
//! S-box lookups.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod full;
mod key;
mod onthefly;
mod round;
mod sbox;
mod small;
mod tiny;

pub use crate::full::{Aes128, Aes192, Aes256};
pub use crate::small::{AesSmall128, AesSmall256};
pub use crate::tiny::{AesTiny128, AesTiny256};
pub use cipher_core::{Block, BlockCipher, Error};
