#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

//! Linkable spontaneous anonymous group (bLSAG) signatures over secp256k1.
//!
//! A signature proves that one member of a [`Ring`] signed a message
//! without revealing which one. Every signature carries a [`KeyImage`]
//! that only depends on the signer's private key, so two signatures made
//! with the same key can be linked while the signer stays anonymous.

mod engine;
mod hasher;
pub mod keypair;
pub mod ring;
pub mod rng;
pub mod signature;

pub use engine::LsagEngine;
pub use hasher::hash_to_point;
pub use keypair::Keypair;
pub use ring::Ring;
pub use signature::{link, KeyImage, RingSignature};

use thiserror::Error;

/// Largest ring accepted by constructors and decoders.
pub const MAX_RING_SIZE: usize = 1 << 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    #[error("ring has {0} members, at least 2 are required")]
    RingTooSmall(usize),
    #[error("ring has {0} members, at most {} are allowed", MAX_RING_SIZE)]
    RingTooLarge(usize),
    #[error("public key at index {0} appears more than once in the ring")]
    DuplicateKey(usize),
    #[error("signer index {index} is out of range for a ring of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("signer private key does not match the ring member at the signer index")]
    InvalidSignerKey,
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
