use crate::RingError;

use k256::elliptic_curve::Field;
use k256::{AffinePoint, ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// A secp256k1 key pair with `public = private * G`.
pub struct Keypair {
    public: AffinePoint,
    private: Scalar,
}

impl Keypair {
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let private = Scalar::random(rng);
        Self {
            public: (ProjectivePoint::GENERATOR * private).to_affine(),
            private,
        }
    }

    pub fn from_private(private: Scalar) -> Result<Self, RingError> {
        if private == Scalar::ZERO {
            return Err(RingError::InvalidSignerKey);
        }
        Ok(Self {
            public: (ProjectivePoint::GENERATOR * private).to_affine(),
            private,
        })
    }

    pub fn public(&self) -> AffinePoint {
        self.public
    }

    pub fn private(&self) -> &Scalar {
        &self.private
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.private.zeroize();
    }
}
