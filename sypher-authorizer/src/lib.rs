#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

//! Authorizes ledger value transfers: an optional Groth16 statement is
//! verified first, then the canonical payload is ring-signed. The result is
//! handed to an external ledger client through [`LedgerSubmitter`].

pub mod authorizer;
mod error;
pub mod ledger;
pub mod payload;
pub mod settings;

pub use authorizer::{
    AuthorizedTransaction, Groth16Verifier, ProvenStatement, RingAuthorization, RingSigner,
    StatementVerifier, TransactionAuthorizer,
};
pub use error::AuthorizationError;
pub use ledger::{
    dispatch, InMemoryKeyImageRegistry, KeyImageRegistry, LedgerSubmitter, Submission,
    SubmissionError, TransactionId,
};
pub use payload::{AccountId, TransactionPayload};
pub use settings::AuthorizerSettings;
