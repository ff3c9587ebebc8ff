use crate::codec::{invalid_data, malformed, read_g1, read_g2};
use crate::SnarkError;

use bls::{pairing, G1Affine, G2Affine, G2Prepared, Gt};
use borsh::{BorshDeserialize, BorshSerialize};

use std::io::Write;

/// Upper bound on the number of input commitments accepted by the decoder.
pub const MAX_PUBLIC_INPUTS: usize = 1 << 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    pub alpha_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub gamma_g2: G2Affine,
    pub delta_g2: G2Affine,
    /// `ic[0]` belongs to the constant one, `ic[i + 1]` to public input `i`.
    pub ic: Vec<G1Affine>,
}

impl VerifyingKey {
    pub fn num_public_inputs(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }

    pub fn prepare(&self) -> PreparedVerifyingKey {
        PreparedVerifyingKey {
            alpha_g1_beta_g2: pairing(&self.alpha_g1, &self.beta_g2),
            neg_gamma_g2: G2Prepared::from(-self.gamma_g2),
            neg_delta_g2: G2Prepared::from(-self.delta_g2),
            ic: self.ic.clone(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(48 + 3 * 96 + 4 + 48 * self.ic.len());
        out.extend_from_slice(&self.alpha_g1.to_compressed());
        out.extend_from_slice(&self.beta_g2.to_compressed());
        out.extend_from_slice(&self.gamma_g2.to_compressed());
        out.extend_from_slice(&self.delta_g2.to_compressed());
        out.extend_from_slice(&(self.ic.len() as u32).to_le_bytes());
        for point in &self.ic {
            out.extend_from_slice(&point.to_compressed());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnarkError> {
        Self::try_from_slice(bytes).map_err(malformed)
    }
}

impl BorshSerialize for VerifyingKey {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

impl BorshDeserialize for VerifyingKey {
    fn deserialize(buf: &mut &[u8]) -> std::io::Result<Self> {
        let alpha_g1 = read_g1(buf)?;
        let beta_g2 = read_g2(buf)?;
        let gamma_g2 = read_g2(buf)?;
        let delta_g2 = read_g2(buf)?;
        let ic_len = u32::deserialize(buf)? as usize;
        if ic_len == 0 || ic_len > MAX_PUBLIC_INPUTS + 1 {
            return Err(invalid_data("invalid number of input commitments"));
        }
        let ic = (0..ic_len)
            .map(|_| read_g1(buf))
            .collect::<std::io::Result<Vec<G1Affine>>>()?;
        Ok(Self {
            alpha_g1,
            beta_g2,
            gamma_g2,
            delta_g2,
            ic,
        })
    }
}

/// Verifying key with `e(α, β)` precomputed and `-γ`, `-δ` prepared for the
/// Miller loop. Built once and shared read-only.
#[derive(Debug)]
pub struct PreparedVerifyingKey {
    pub(crate) alpha_g1_beta_g2: Gt,
    pub(crate) neg_gamma_g2: G2Prepared,
    pub(crate) neg_delta_g2: G2Prepared,
    pub(crate) ic: Vec<G1Affine>,
}

impl PreparedVerifyingKey {
    pub fn num_public_inputs(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }
}

/// Proving key of a single circuit. Queries are indexed by the variable
/// layout `(1, public…, private…)`.
#[derive(Clone, Debug)]
pub struct ProvingKey {
    pub(crate) vk: VerifyingKey,
    pub(crate) beta_g1: G1Affine,
    pub(crate) delta_g1: G1Affine,
    pub(crate) a_query: Vec<G1Affine>,
    pub(crate) b_g1_query: Vec<G1Affine>,
    pub(crate) b_g2_query: Vec<G2Affine>,
    /// `(β·u_i(τ) + α·v_i(τ) + w_i(τ)) / δ` for private variables only.
    pub(crate) l_query: Vec<G1Affine>,
    /// `τ^k · t(τ) / δ`.
    pub(crate) h_query: Vec<G1Affine>,
}

impl ProvingKey {
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.vk
    }
}
