use crate::codec::{malformed, read_g1, read_g2, G1_LEN, G2_LEN};
use crate::SnarkError;

use bls::{G1Affine, G2Affine};
use borsh::{BorshDeserialize, BorshSerialize};

use std::io::Write;

pub const PROOF_LEN: usize = 2 * G1_LEN + G2_LEN;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

impl Proof {
    pub fn has_identity_component(&self) -> bool {
        bool::from(self.a.is_identity() | self.b.is_identity() | self.c.is_identity())
    }

    /// Compressed `a ‖ b ‖ c`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PROOF_LEN);
        out.extend_from_slice(&self.a.to_compressed());
        out.extend_from_slice(&self.b.to_compressed());
        out.extend_from_slice(&self.c.to_compressed());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnarkError> {
        Self::try_from_slice(bytes).map_err(malformed)
    }
}

impl BorshSerialize for Proof {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

impl BorshDeserialize for Proof {
    fn deserialize(buf: &mut &[u8]) -> std::io::Result<Self> {
        let a = read_g1(buf)?;
        let b = read_g2(buf)?;
        let c = read_g1(buf)?;
        Ok(Self { a, b, c })
    }
}
