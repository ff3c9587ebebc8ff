use rand::rngs::{OsRng, StdRng};
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Generators that can be created on demand from OS entropy, so every
/// signing call owns its randomness and nothing is shared across threads.
pub trait RngDefault {
    fn default() -> Self;
}

impl RngDefault for OsRng {
    fn default() -> Self {
        OsRng
    }
}

impl RngDefault for StdRng {
    fn default() -> Self {
        StdRng::from_entropy()
    }
}

/// Source of signing nonces accepted by [`crate::LsagEngine`].
pub trait CryptoCoreRng: RngCore + CryptoRng + RngDefault {}

impl<T: RngCore + CryptoRng + RngDefault> CryptoCoreRng for T {}
