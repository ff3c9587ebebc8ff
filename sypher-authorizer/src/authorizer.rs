use crate::ledger::Submission;
use crate::payload::TransactionPayload;
use crate::settings::AuthorizerSettings;
use crate::AuthorizationError;

use k256::Scalar;
use sypher_ring::rng::CryptoCoreRng;
use sypher_ring::{KeyImage, Keypair, LsagEngine, Ring, RingError, RingSignature};
use sypher_snark::{PreparedVerifyingKey, SnarkError};

use std::sync::Arc;

/// Produces ring signatures over canonical payload bytes.
pub trait RingSigner: Send + Sync {
    fn sign(
        &self,
        message: &[u8],
        ring: &Ring,
        signer_index: usize,
        private: &Scalar,
    ) -> Result<RingSignature, RingError>;
}

impl<R: CryptoCoreRng> RingSigner for LsagEngine<R> {
    fn sign(
        &self,
        message: &[u8],
        ring: &Ring,
        signer_index: usize,
        private: &Scalar,
    ) -> Result<RingSignature, RingError> {
        LsagEngine::sign(self, message, ring, signer_index, private)
    }
}

/// Decides whether a proven statement holds.
pub trait StatementVerifier: Send + Sync {
    fn verify(&self, statement: &ProvenStatement) -> Result<bool, SnarkError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Groth16Verifier;

impl StatementVerifier for Groth16Verifier {
    fn verify(&self, statement: &ProvenStatement) -> Result<bool, SnarkError> {
        sypher_snark::verify_bytes(
            &statement.proof,
            &statement.verifying_key,
            &statement.public_inputs,
        )
    }
}

/// An untrusted proof together with the trusted key and the public inputs
/// it has to be checked against.
#[derive(Clone, Debug)]
pub struct ProvenStatement {
    pub proof: Vec<u8>,
    pub verifying_key: Arc<PreparedVerifyingKey>,
    pub public_inputs: Vec<sypher_snark::Scalar>,
}

pub struct RingAuthorization {
    pub ring: Ring,
    pub signer_index: usize,
    pub signer: Keypair,
}

impl RingAuthorization {
    /// Builds the ring from SEC1 encoded member keys, compressed or not.
    pub fn from_sec1<T: AsRef<[u8]>>(
        encoded_ring: &[T],
        signer_index: usize,
        signer: Keypair,
    ) -> Result<Self, AuthorizationError> {
        let ring = Ring::from_sec1(encoded_ring)?;
        Ok(Self {
            ring,
            signer_index,
            signer,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizedTransaction {
    payload: TransactionPayload,
    signature: RingSignature,
}

impl AuthorizedTransaction {
    pub fn from_parts(payload: TransactionPayload, signature: RingSignature) -> Self {
        Self { payload, signature }
    }

    /// Decodes a submission pair, without checking the signature.
    pub fn from_submission(submission: &Submission) -> Result<Self, AuthorizationError> {
        let payload = TransactionPayload::from_bytes(&submission.payload)?;
        let signature = RingSignature::from_bytes(&submission.signature)?;
        Ok(Self { payload, signature })
    }

    pub fn payload(&self) -> &TransactionPayload {
        &self.payload
    }

    pub fn signature(&self) -> &RingSignature {
        &self.signature
    }

    pub fn key_image(&self) -> &KeyImage {
        self.signature.key_image()
    }

    pub fn verify(&self) -> bool {
        self.payload.is_consistent() && self.signature.verify(self.payload.canonical_bytes())
    }

    pub fn submission(&self) -> Submission {
        Submission {
            payload: self.payload.canonical_bytes().to_vec(),
            signature: self.signature.to_bytes(),
        }
    }
}

/// Runs proof verification and ring signing for one payload. Holds no
/// state besides its collaborators and settings.
pub struct TransactionAuthorizer<S = LsagEngine, V = Groth16Verifier> {
    signer: S,
    verifier: V,
    settings: AuthorizerSettings,
}

impl TransactionAuthorizer {
    pub fn with_settings(settings: AuthorizerSettings) -> Self {
        Self::new(LsagEngine::new(), Groth16Verifier, settings)
    }
}

impl<S: RingSigner, V: StatementVerifier> TransactionAuthorizer<S, V> {
    pub fn new(signer: S, verifier: V, settings: AuthorizerSettings) -> Self {
        Self {
            signer,
            verifier,
            settings,
        }
    }

    pub fn settings(&self) -> &AuthorizerSettings {
        &self.settings
    }

    pub fn authorize(
        &self,
        payload: TransactionPayload,
        statement: Option<ProvenStatement>,
        authorization: RingAuthorization,
    ) -> Result<AuthorizedTransaction, AuthorizationError> {
        payload.validate(self.settings.max_memo_len)?;
        if !payload.is_consistent() {
            return Err(AuthorizationError::MalformedInput(
                "payload bytes do not match its fields".to_owned(),
            ));
        }

        let ring_len = authorization.ring.len();
        if !self.settings.allows_ring_size(ring_len) {
            return Err(AuthorizationError::MalformedInput(format!(
                "ring of {} is outside the allowed sizes {}..={}",
                ring_len, self.settings.min_ring_size, self.settings.max_ring_size
            )));
        }
        let signer_public = authorization.signer.public();
        if authorization.ring.get(authorization.signer_index) != Some(&signer_public) {
            return Err(AuthorizationError::InvalidSignerKey);
        }

        match statement {
            Some(statement) => {
                if !self.verifier.verify(&statement)? {
                    log::debug!("authorization stopped: proof rejected");
                    return Err(AuthorizationError::ProofRejected);
                }
                log::debug!("proof accepted");
            }
            None if self.settings.require_proof => {
                return Err(AuthorizationError::ProofRequired);
            }
            None => {}
        }

        let signature = self.signer.sign(
            payload.canonical_bytes(),
            &authorization.ring,
            authorization.signer_index,
            authorization.signer.private(),
        )?;
        log::info!(
            "authorized transfer of {} with a ring of {}",
            payload.amount(),
            ring_len
        );
        Ok(AuthorizedTransaction { payload, signature })
    }
}
