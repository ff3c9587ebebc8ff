use sypher_ring::RingError;
use sypher_snark::SnarkError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("signer key does not match the ring member at the signer index")]
    InvalidSignerKey,
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("verifying key expects {expected} public inputs, got {actual}")]
    PublicInputArityMismatch { expected: usize, actual: usize },
    #[error("proof rejected by the verifier")]
    ProofRejected,
    #[error("a proven statement is required for this transaction")]
    ProofRequired,
    #[error("key image has already been spent")]
    KeyImageSpent,
    #[error("ring signature does not verify over the transaction payload")]
    InvalidSignature,
    #[error("submission failed: {0}")]
    Submission(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<RingError> for AuthorizationError {
    fn from(err: RingError) -> Self {
        match err {
            RingError::InvalidSignerKey | RingError::IndexOutOfRange { .. } => {
                Self::InvalidSignerKey
            }
            other => Self::MalformedInput(other.to_string()),
        }
    }
}

impl From<SnarkError> for AuthorizationError {
    fn from(err: SnarkError) -> Self {
        match err {
            SnarkError::PublicInputArityMismatch { expected, actual } => {
                Self::PublicInputArityMismatch { expected, actual }
            }
            other => Self::MalformedInput(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for AuthorizationError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wrapped_errors() {
        assert_eq!(
            AuthorizationError::from(RingError::IndexOutOfRange { index: 3, len: 3 }),
            AuthorizationError::InvalidSignerKey
        );
        assert!(matches!(
            AuthorizationError::from(RingError::DuplicateKey(1)),
            AuthorizationError::MalformedInput(_)
        ));
        assert_eq!(
            AuthorizationError::from(SnarkError::PublicInputArityMismatch {
                expected: 2,
                actual: 1
            }),
            AuthorizationError::PublicInputArityMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(matches!(
            AuthorizationError::from(SnarkError::MalformedInput("x".to_owned())),
            AuthorizationError::MalformedInput(_)
        ));
    }
}
