use crate::rng::CryptoCoreRng;
use crate::{Ring, RingError, RingSignature};

use k256::Scalar;
use rand::rngs::OsRng;

use std::marker::PhantomData;

/// Stateless signing service. A fresh generator of type `R` is created for
/// every call, so one engine can be shared freely between threads.
#[derive(Debug)]
pub struct LsagEngine<R = OsRng> {
    _rng: PhantomData<fn() -> R>,
}

impl<R: CryptoCoreRng> LsagEngine<R> {
    pub fn new() -> Self {
        Self { _rng: PhantomData }
    }

    pub fn sign(
        &self,
        message: &[u8],
        ring: &Ring,
        signer_index: usize,
        private: &Scalar,
    ) -> Result<RingSignature, RingError> {
        let mut rng = R::default();
        RingSignature::sign(&mut rng, message, ring, signer_index, private)
    }

    pub fn verify(&self, message: &[u8], signature: &RingSignature) -> bool {
        signature.verify(message)
    }

    /// Decodes an untrusted signature and verifies it, any decoding error
    /// counts as an invalid signature.
    pub fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> bool {
        match RingSignature::from_bytes(signature) {
            Ok(decoded) => decoded.verify(message),
            Err(e) => {
                log::debug!("ring signature rejected: {}", e);
                false
            }
        }
    }
}

impl<R: CryptoCoreRng> Default for LsagEngine<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for LsagEngine<R> {
    fn clone(&self) -> Self {
        Self { _rng: PhantomData }
    }
}
