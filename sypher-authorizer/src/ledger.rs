use crate::authorizer::AuthorizedTransaction;
use crate::AuthorizationError;

use borsh::{BorshDeserialize, BorshSerialize};
use sypher_ring::KeyImage;
use thiserror::Error;

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// What the ledger client receives: `{payload bytes, signature bytes}`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Submission {
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("ledger rejected the transaction: {0}")]
    Rejected(String),
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

pub trait LedgerSubmitter: Send + Sync {
    fn submit(&self, submission: &Submission) -> Result<TransactionId, SubmissionError>;
}

/// Set of spent key images. `check_and_insert` must be atomic: of two
/// concurrent calls with the same image exactly one returns `true`.
pub trait KeyImageRegistry: Send + Sync {
    /// Returns `true` if the image was not spent before and is now.
    fn check_and_insert(&self, key_image: &KeyImage) -> bool;
    fn contains(&self, key_image: &KeyImage) -> bool;
}

#[derive(Debug, Default)]
pub struct InMemoryKeyImageRegistry {
    spent: Mutex<HashSet<[u8; 33]>>,
}

impl InMemoryKeyImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyImageRegistry for InMemoryKeyImageRegistry {
    fn check_and_insert(&self, key_image: &KeyImage) -> bool {
        self.spent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key_image.to_bytes())
    }

    fn contains(&self, key_image: &KeyImage) -> bool {
        self.spent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key_image.to_bytes())
    }
}

/// Checks an authorized transaction, claims its key image and hands it to
/// the ledger. A claimed image stays spent even if the submission fails.
pub fn dispatch<K, L>(
    authorized: &AuthorizedTransaction,
    registry: &K,
    submitter: &L,
) -> Result<TransactionId, AuthorizationError>
where
    K: KeyImageRegistry + ?Sized,
    L: LedgerSubmitter + ?Sized,
{
    if !authorized.verify() {
        return Err(AuthorizationError::InvalidSignature);
    }
    if !registry.check_and_insert(authorized.key_image()) {
        log::warn!("double spend attempt with an already used key image");
        return Err(AuthorizationError::KeyImageSpent);
    }
    let id = submitter
        .submit(&authorized.submission())
        .map_err(|e| AuthorizationError::Submission(e.to_string()))?;
    log::info!("transaction {} submitted", id);
    Ok(id)
}
