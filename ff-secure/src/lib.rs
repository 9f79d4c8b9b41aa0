//! Crypto envelope for FF requests.
//!
//! The payload of an encrypted request is sealed with AES-256-GCM under a key
//! stretched from a pre-shared secret with PBKDF2-HMAC-SHA256. The salt, IV
//! and tag travel in the first datagram's outer options.

#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod cipher;
pub mod consts;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod key;
pub mod types;

pub use error::{CryptoError, CryptoErrorKind};
pub use key::PreSharedKey;
pub use types::{EnvelopeParams, SealedPayload};

pub use envelope::{open, seal, seal_optional};
pub use kdf::derive_key;
