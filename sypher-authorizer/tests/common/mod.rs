#![allow(dead_code)]

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::Scalar;
use rand_core::OsRng;
use sypher_authorizer::{
    AccountId, LedgerSubmitter, ProvenStatement, RingAuthorization, RingSigner, Submission,
    SubmissionError, TransactionId, TransactionPayload,
};
use sypher_ring::{Keypair, LsagEngine, Ring, RingError, RingSignature};
use sypher_snark::{prove, setup, Assignment, ConstraintSystem};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_logger() {
    let _ = env_logger::try_init();
}

pub fn account_a() -> AccountId {
    AccountId::new(0, 0, 1001)
}

pub fn account_b() -> AccountId {
    AccountId::new(0, 0, 1002)
}

pub fn transfer(amount: u64, nonce: u64) -> TransactionPayload {
    TransactionPayload::new(account_a(), account_b(), amount, nonce, "sypher transfer").unwrap()
}

/// Ring members arrive as SEC1 bytes, every other one uncompressed.
pub fn ring_authorization(signer: Keypair, size: usize, index: usize) -> RingAuthorization {
    let mut keys = (0..size)
        .map(|_| Keypair::random(&mut OsRng).public())
        .collect::<Vec<_>>();
    keys[index] = signer.public();
    let encoded = keys
        .iter()
        .enumerate()
        .map(|(i, key)| key.to_encoded_point(i % 2 == 0).as_bytes().to_vec())
        .collect::<Vec<_>>();
    RingAuthorization::from_sec1(&encoded, index, signer).unwrap()
}

/// Knowledge of a square root: `x * x = y` with `y` public.
pub fn square_root_statement(x: u64) -> ProvenStatement {
    let mut cs = ConstraintSystem::new();
    let y = cs.alloc_public();
    let root = cs.alloc_private();
    cs.enforce(root, root, y);

    let (pk, vk) = setup(&mut OsRng, &cs).unwrap();
    let x = sypher_snark::Scalar::from(x);
    let assignment = Assignment {
        public: vec![x * x],
        private: vec![x],
    };
    let proof = prove(&mut OsRng, &pk, &cs, &assignment).unwrap();
    ProvenStatement {
        proof: proof.to_bytes(),
        verifying_key: Arc::new(vk.prepare()),
        public_inputs: assignment.public,
    }
}

/// Ring signer double that counts how often signing was reached.
#[derive(Default)]
pub struct CountingSigner {
    inner: LsagEngine,
    calls: AtomicUsize,
}

impl CountingSigner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RingSigner for &CountingSigner {
    fn sign(
        &self,
        message: &[u8],
        ring: &Ring,
        signer_index: usize,
        private: &Scalar,
    ) -> Result<RingSignature, RingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sign(message, ring, signer_index, private)
    }
}

#[derive(Default)]
pub struct RecordingSubmitter {
    pub submissions: Mutex<Vec<Submission>>,
    pub fail: bool,
}

impl RecordingSubmitter {
    pub fn failing() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

impl LedgerSubmitter for RecordingSubmitter {
    fn submit(&self, submission: &Submission) -> Result<TransactionId, SubmissionError> {
        if self.fail {
            return Err(SubmissionError::Unavailable("node offline".to_owned()));
        }
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(submission.clone());
        Ok(TransactionId(format!("0.0.1001@{}", submissions.len())))
    }
}
