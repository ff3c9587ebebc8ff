use crate::circuit::ConstraintSystem;
use crate::keys::{ProvingKey, VerifyingKey};
use crate::SnarkError;

use bls::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use rand_core::{CryptoRng, RngCore};
use sypher_interpolate::{InterpolationError, Polynomial};
use zeroize::Zeroize;

/// Evaluation points of the QAP, `ω_j = j` for `j = 1..=m`.
pub(crate) fn domain(num_constraints: usize) -> Vec<Scalar> {
    (1..=num_constraints as u64).map(Scalar::from).collect()
}

pub(crate) fn invert(scalar: &Scalar) -> Result<Scalar, SnarkError> {
    Option::from(scalar.invert())
        .ok_or(SnarkError::Interpolation(InterpolationError::TriedToInvertZero))
}

fn nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    loop {
        let scalar = Scalar::random(&mut *rng);
        if scalar != Scalar::zero() {
            return scalar;
        }
    }
}

/// `L_j(τ)` for every Lagrange basis polynomial of the domain.
fn lagrange_basis_at(domain: &[Scalar], tau: Scalar) -> Result<Vec<Scalar>, SnarkError> {
    let mut unit = vec![Scalar::zero(); domain.len()];
    let mut basis = Vec::with_capacity(domain.len());
    for j in 0..domain.len() {
        unit[j] = Scalar::one();
        basis.push(Polynomial::interpolate(domain, &unit)?.evaluate(tau));
        unit[j] = Scalar::zero();
    }
    Ok(basis)
}

/// `Σ_j M[j][i] · L_j(τ)` for every variable `i`.
fn columns_at(matrix: &[Vec<Scalar>], basis: &[Scalar], num_variables: usize) -> Vec<Scalar> {
    let mut evals = vec![Scalar::zero(); num_variables];
    for (row, l_j) in matrix.iter().zip(basis) {
        for (eval, coeff) in evals.iter_mut().zip(row) {
            *eval += coeff * l_j;
        }
    }
    evals
}

fn g1(scalar: &Scalar) -> G1Affine {
    G1Affine::from(G1Projective::generator() * scalar)
}

fn g2(scalar: &Scalar) -> G2Affine {
    G2Affine::from(G2Projective::generator() * scalar)
}

/// Circuit-specific trusted setup. The toxic waste is zeroized before
/// returning.
pub fn setup<R: RngCore + CryptoRng>(
    rng: &mut R,
    cs: &ConstraintSystem,
) -> Result<(ProvingKey, VerifyingKey), SnarkError> {
    let num_constraints = cs.constraints().len();
    if num_constraints == 0 {
        return Err(SnarkError::MalformedInput("circuit has no constraints".to_owned()));
    }
    let domain = domain(num_constraints);
    let vanishing = Polynomial::vanishing(&domain);

    let mut tau = loop {
        let tau = nonzero_scalar(rng);
        if vanishing.evaluate(tau) != Scalar::zero() {
            break tau;
        }
    };
    let mut alpha = nonzero_scalar(rng);
    let mut beta = nonzero_scalar(rng);
    let mut gamma = nonzero_scalar(rng);
    let mut delta = nonzero_scalar(rng);
    let gamma_inverse = invert(&gamma)?;
    let delta_inverse = invert(&delta)?;

    let basis = lagrange_basis_at(&domain, tau)?;
    let [a, b, c] = cs.matrices();
    let n = cs.num_variables();
    let u = columns_at(&a, &basis, n);
    let v = columns_at(&b, &basis, n);
    let w = columns_at(&c, &basis, n);

    let combined = (0..n)
        .map(|i| beta * u[i] + alpha * v[i] + w[i])
        .collect::<Vec<Scalar>>();
    let num_committed = 1 + cs.num_public();
    let ic = combined[..num_committed]
        .iter()
        .map(|x| g1(&(x * gamma_inverse)))
        .collect();
    let l_query = combined[num_committed..]
        .iter()
        .map(|x| g1(&(x * delta_inverse)))
        .collect();

    let t_over_delta = vanishing.evaluate(tau) * delta_inverse;
    let mut power = Scalar::one();
    let mut h_query = Vec::with_capacity(num_constraints - 1);
    for _ in 0..num_constraints - 1 {
        h_query.push(g1(&(power * t_over_delta)));
        power *= tau;
    }

    let vk = VerifyingKey {
        alpha_g1: g1(&alpha),
        beta_g2: g2(&beta),
        gamma_g2: g2(&gamma),
        delta_g2: g2(&delta),
        ic,
    };
    let pk = ProvingKey {
        vk: vk.clone(),
        beta_g1: g1(&beta),
        delta_g1: g1(&delta),
        a_query: u.iter().map(g1).collect(),
        b_g1_query: v.iter().map(g1).collect(),
        b_g2_query: v.iter().map(g2).collect(),
        l_query,
        h_query,
    };

    tau.zeroize();
    alpha.zeroize();
    beta.zeroize();
    gamma.zeroize();
    delta.zeroize();
    power.zeroize();

    log::debug!(
        "groth16 setup done: {} constraints, {} public inputs",
        num_constraints,
        cs.num_public()
    );
    Ok((pk, vk))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::circuit::test::cubic_circuit;
    use rand_core::OsRng;

    #[test]
    fn basis_sums_to_one() {
        let domain = domain(4);
        let tau = Scalar::from(123u64);
        let basis = lagrange_basis_at(&domain, tau).unwrap();
        let sum = basis.iter().fold(Scalar::zero(), |acc, l| acc + l);
        assert_eq!(sum, Scalar::one());

        // on the domain the basis is the unit vector
        let basis = lagrange_basis_at(&domain, domain[2]).unwrap();
        let unit = [0u64, 0, 1, 0].map(Scalar::from);
        assert_eq!(basis, unit.to_vec());
    }

    #[test]
    fn key_shapes() {
        let cs = cubic_circuit();
        let (pk, vk) = setup(&mut OsRng, &cs).unwrap();
        assert_eq!(vk.ic.len(), 2);
        assert_eq!(vk.num_public_inputs(), 1);
        assert_eq!(pk.a_query.len(), cs.num_variables());
        assert_eq!(pk.b_g2_query.len(), cs.num_variables());
        assert_eq!(pk.l_query.len(), cs.num_private());
        assert_eq!(pk.h_query.len(), cs.constraints().len() - 1);
        assert_eq!(pk.verifying_key(), &vk);
    }

    #[test]
    fn empty_circuit() {
        let cs = ConstraintSystem::new();
        assert!(matches!(setup(&mut OsRng, &cs), Err(SnarkError::MalformedInput(_))));
    }
}
