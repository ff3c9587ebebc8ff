use crate::keys::PreparedVerifyingKey;
use crate::proof::Proof;
use crate::SnarkError;

use bls::{multi_miller_loop, G1Affine, G1Projective, G2Prepared, Scalar};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn check_arity(pvk: &PreparedVerifyingKey, public_inputs: &[Scalar]) -> Result<(), SnarkError> {
    if pvk.ic.is_empty() {
        return Err(SnarkError::MalformedInput("verifying key has no IC points".to_owned()));
    }
    let expected = pvk.num_public_inputs();
    if public_inputs.len() != expected {
        return Err(SnarkError::PublicInputArityMismatch {
            expected,
            actual: public_inputs.len(),
        });
    }
    Ok(())
}

/// Checks `e(A, B) · e(L, -γ) · e(C, -δ) == e(α, β)` where
/// `L = ic_0 + Σ x_i · ic_{i+1}`.
///
/// Only an input count that does not match the key is an error, an invalid
/// proof simply returns `Ok(false)`.
pub fn verify(
    proof: &Proof,
    pvk: &PreparedVerifyingKey,
    public_inputs: &[Scalar],
) -> Result<bool, SnarkError> {
    check_arity(pvk, public_inputs)?;
    if proof.has_identity_component() {
        log::debug!("groth16 proof rejected: identity component");
        return Ok(false);
    }

    let accumulated = pvk.ic[1..]
        .iter()
        .zip(public_inputs)
        .fold(G1Projective::from(pvk.ic[0]), |acc, (ic, x)| acc + ic * x);
    let accumulated = G1Affine::from(accumulated);

    let b_prepared = G2Prepared::from(proof.b);
    let result = multi_miller_loop(&[
        (&proof.a, &b_prepared),
        (&accumulated, &pvk.neg_gamma_g2),
        (&proof.c, &pvk.neg_delta_g2),
    ])
    .final_exponentiation();

    let valid = result == pvk.alpha_g1_beta_g2;
    if !valid {
        log::debug!("groth16 proof rejected: pairing check failed");
    }
    Ok(valid)
}

/// Verifies an untrusted proof encoding. Bytes that do not decode to a
/// proof are treated like an invalid proof.
pub fn verify_bytes(
    proof_bytes: &[u8],
    pvk: &PreparedVerifyingKey,
    public_inputs: &[Scalar],
) -> Result<bool, SnarkError> {
    check_arity(pvk, public_inputs)?;
    match Proof::from_bytes(proof_bytes) {
        Ok(proof) => verify(&proof, pvk, public_inputs),
        Err(e) => {
            log::debug!("groth16 proof rejected: {}", e);
            Ok(false)
        }
    }
}

/// Independent verification of several proofs against the same key.
pub fn verify_batch(
    pvk: &PreparedVerifyingKey,
    items: &[(Proof, Vec<Scalar>)],
) -> Vec<Result<bool, SnarkError>> {
    #[cfg(feature = "parallel")]
    let iter = items.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = items.iter();

    iter.map(|(proof, inputs)| verify(proof, pvk, inputs))
        .collect()
}
