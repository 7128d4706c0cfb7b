//! Block cipher capability shared by the AES implementations and the cipher modes.
//!
//! The modes in `cipher-modes` only ever talk to a cipher through
//! [`BlockCipher`], so any implementation of it (software AES at one of its
//! memory tiers, or a platform-backed cipher) can be dropped underneath EAX or
//! XTS without either side knowing about the other.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::BlockCipher;
pub use crate::error::Error;
