#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

//! Groth16 proofs over BLS12-381.
//!
//! The verifier side ([`verify`], [`verify_bytes`], [`verify_batch`]) only
//! needs a [`VerifyingKey`]. The circuit-specific [`setup`] and [`prove`]
//! exist to produce genuine artifacts.

pub mod circuit;
mod codec;
pub mod keys;
pub mod proof;
pub mod prover;
pub mod setup;
pub mod verifier;

pub use circuit::{Assignment, ConstraintSystem, LinearCombination, Variable};
pub use codec::{public_inputs_from_bytes, public_inputs_to_bytes};
pub use keys::{PreparedVerifyingKey, ProvingKey, VerifyingKey};
pub use proof::Proof;
pub use prover::prove;
pub use setup::setup;
pub use verifier::{verify, verify_batch, verify_bytes};

pub use bls::Scalar;

use sypher_interpolate::InterpolationError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SnarkError {
    #[error("verifying key expects {expected} public inputs, got {actual}")]
    PublicInputArityMismatch { expected: usize, actual: usize },
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("assignment does not satisfy constraint {0}")]
    Unsatisfied(usize),
    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}
