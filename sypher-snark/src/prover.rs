use crate::circuit::{Assignment, ConstraintSystem};
use crate::keys::ProvingKey;
use crate::proof::Proof;
use crate::setup::domain;
use crate::SnarkError;

use bls::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use rand_core::{CryptoRng, RngCore};
use sypher_interpolate::Polynomial;
use zeroize::Zeroize;

fn msm_g1(points: &[G1Affine], scalars: &[Scalar]) -> G1Projective {
    points
        .iter()
        .zip(scalars)
        .fold(G1Projective::identity(), |acc, (p, s)| acc + p * s)
}

fn msm_g2(points: &[G2Affine], scalars: &[Scalar]) -> G2Projective {
    points
        .iter()
        .zip(scalars)
        .fold(G2Projective::identity(), |acc, (p, s)| acc + p * s)
}

fn row_values(matrix: &[Vec<Scalar>], z: &[Scalar]) -> Vec<Scalar> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(z)
                .fold(Scalar::zero(), |acc, (coeff, value)| acc + coeff * value)
        })
        .collect()
}

/// Quotient `h = (U·V − W) / t` of the witness polynomials.
fn quotient(cs: &ConstraintSystem, z: &[Scalar]) -> Result<Vec<Scalar>, SnarkError> {
    let domain = domain(cs.constraints().len());
    let [a, b, c] = cs.matrices();
    let u = Polynomial::interpolate(&domain, &row_values(&a, z))?;
    let v = Polynomial::interpolate(&domain, &row_values(&b, z))?;
    let w = Polynomial::interpolate(&domain, &row_values(&c, z))?;

    let (h, remainder) = (&(&u * &v) - &w).div_rem(&Polynomial::vanishing(&domain))?;
    if !remainder.is_zero() {
        return Err(SnarkError::InvalidAssignment(
            "witness polynomials are not divisible by the vanishing polynomial".to_owned(),
        ));
    }
    Ok(h.into_coeffs())
}

/// Creates a zero-knowledge proof that `assignment` satisfies `cs`.
pub fn prove<R: RngCore + CryptoRng>(
    rng: &mut R,
    pk: &ProvingKey,
    cs: &ConstraintSystem,
    assignment: &Assignment,
) -> Result<Proof, SnarkError> {
    let num_constraints = cs.constraints().len();
    if pk.a_query.len() != cs.num_variables()
        || pk.l_query.len() != cs.num_private()
        || pk.h_query.len() + 1 != num_constraints
    {
        return Err(SnarkError::InvalidAssignment(
            "proving key was generated for another circuit".to_owned(),
        ));
    }
    let z = cs.witness(assignment)?;
    let mut h = quotient(cs, &z)?;

    let mut r = Scalar::random(&mut *rng);
    let mut s = Scalar::random(&mut *rng);
    let vk = &pk.vk;
    let delta_g1 = G1Projective::from(pk.delta_g1);

    let a = G1Projective::from(vk.alpha_g1) + msm_g1(&pk.a_query, &z) + delta_g1 * r;
    let b = G2Projective::from(vk.beta_g2) + msm_g2(&pk.b_g2_query, &z) + vk.delta_g2 * s;
    let b_g1 = G1Projective::from(pk.beta_g1) + msm_g1(&pk.b_g1_query, &z) + delta_g1 * s;

    let private = &z[1 + cs.num_public()..];
    let c = msm_g1(&pk.l_query, private) + msm_g1(&pk.h_query, &h) + a * s + b_g1 * r
        - delta_g1 * (r * s);

    r.zeroize();
    s.zeroize();
    h.zeroize();

    Ok(Proof {
        a: G1Affine::from(a),
        b: G2Affine::from(b),
        c: G1Affine::from(c),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::circuit::test::{cubic_assignment, cubic_circuit};
    use crate::setup::setup;
    use rand_core::OsRng;

    #[test]
    fn quotient_has_expected_degree() {
        let cs = cubic_circuit();
        let z = cs.witness(&cubic_assignment(4)).unwrap();
        let h = quotient(&cs, &z).unwrap();
        assert!(h.len() < cs.constraints().len());
    }

    #[test]
    fn unsatisfied_witness_is_rejected() {
        let cs = cubic_circuit();
        let (pk, _) = setup(&mut OsRng, &cs).unwrap();
        let mut assignment = cubic_assignment(3);
        assignment.private[1] = Scalar::from(10u64);
        assert_eq!(
            prove(&mut OsRng, &pk, &cs, &assignment),
            Err(SnarkError::Unsatisfied(0))
        );
    }

    #[test]
    fn proving_key_must_match_circuit() {
        let cs = cubic_circuit();
        let (pk, _) = setup(&mut OsRng, &cs).unwrap();

        let mut other = ConstraintSystem::new();
        let x = other.alloc_private();
        other.enforce(x, x, x);
        let assignment = Assignment {
            public: vec![],
            private: vec![Scalar::one()],
        };
        assert!(matches!(
            prove(&mut OsRng, &pk, &other, &assignment),
            Err(SnarkError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn proofs_are_randomized() {
        let cs = cubic_circuit();
        let (pk, _) = setup(&mut OsRng, &cs).unwrap();
        let assignment = cubic_assignment(3);
        let first = prove(&mut OsRng, &pk, &cs, &assignment).unwrap();
        let second = prove(&mut OsRng, &pk, &cs, &assignment).unwrap();
        assert_ne!(first, second);
        assert!(!first.has_identity_component());
    }
}
