use crate::AuthorizationError;

use borsh::{BorshDeserialize, BorshSerialize};

use std::fmt;
use std::io::{Error as IoError, ErrorKind, Write};
use std::str::FromStr;

/// Prefix of every canonical payload encoding.
pub const DOMAIN_TAG: &[u8; 18] = b"sypher/transfer/v1";

/// Hedera memo limit.
pub const DEFAULT_MAX_MEMO_LEN: usize = 100;

/// Ledger account `shard.realm.num`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct AccountId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl AccountId {
    pub fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl FromStr for AccountId {
    type Err = AuthorizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || AuthorizationError::MalformedInput(format!("invalid account id {:?}", s));
        let parts = s
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| malformed()))
            .collect::<Result<Vec<u64>, AuthorizationError>>()?;
        match parts.as_slice() {
            [shard, realm, num] => Ok(Self::new(*shard, *realm, *num)),
            _ => Err(malformed()),
        }
    }
}

/// Everything after the domain tag, in encoding order.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
struct TransferFields {
    sender: AccountId,
    recipient: AccountId,
    amount: u64,
    nonce: u64,
    memo: String,
}

/// A value transfer. The canonical encoding is computed once on
/// construction and is what gets signed and submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionPayload {
    fields: TransferFields,
    pub(crate) canonical: Vec<u8>,
}

impl TransactionPayload {
    pub fn new(
        sender: AccountId,
        recipient: AccountId,
        amount: u64,
        nonce: u64,
        memo: impl Into<String>,
    ) -> Result<Self, AuthorizationError> {
        let mut payload = Self {
            fields: TransferFields {
                sender,
                recipient,
                amount,
                nonce,
                memo: memo.into(),
            },
            canonical: Vec::new(),
        };
        payload.check_transfer()?;
        payload.canonical = payload.encode()?;
        Ok(payload)
    }

    /// Decodes a canonical encoding received from elsewhere.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AuthorizationError> {
        let payload = Self::try_from_slice(bytes)
            .map_err(|e| AuthorizationError::MalformedInput(e.to_string()))?;
        payload.check_transfer()?;
        Ok(payload)
    }

    pub fn sender(&self) -> AccountId {
        self.fields.sender
    }

    pub fn recipient(&self) -> AccountId {
        self.fields.recipient
    }

    pub fn amount(&self) -> u64 {
        self.fields.amount
    }

    pub fn nonce(&self) -> u64 {
        self.fields.nonce
    }

    pub fn memo(&self) -> &str {
        &self.fields.memo
    }

    /// The bytes fixed at construction.
    pub fn canonical_bytes(&self) -> &[u8] {
        &self.canonical
    }

    /// Re-derives the canonical encoding from the fields.
    pub fn encode(&self) -> Result<Vec<u8>, AuthorizationError> {
        let mut out = DOMAIN_TAG.to_vec();
        self.fields
            .serialize(&mut out)
            .map_err(|e| AuthorizationError::MalformedInput(e.to_string()))?;
        Ok(out)
    }

    /// Whether the fixed bytes still match the fields.
    pub fn is_consistent(&self) -> bool {
        matches!(self.encode(), Ok(bytes) if bytes == self.canonical)
    }

    pub fn validate(&self, max_memo_len: usize) -> Result<(), AuthorizationError> {
        self.check_transfer()?;
        let memo_len = self.fields.memo.len();
        if memo_len > max_memo_len {
            return Err(AuthorizationError::MalformedInput(format!(
                "memo is {} bytes long, at most {} are allowed",
                memo_len, max_memo_len
            )));
        }
        Ok(())
    }

    fn check_transfer(&self) -> Result<(), AuthorizationError> {
        if self.fields.sender == self.fields.recipient {
            return Err(AuthorizationError::MalformedInput(
                "sender and recipient are the same account".to_owned(),
            ));
        }
        if self.fields.amount == 0 {
            return Err(AuthorizationError::MalformedInput(
                "transfer amount must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

impl BorshSerialize for TransactionPayload {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.canonical)
    }
}

impl BorshDeserialize for TransactionPayload {
    fn deserialize(buf: &mut &[u8]) -> std::io::Result<Self> {
        let start = *buf;
        if buf.len() < DOMAIN_TAG.len() || &buf[..DOMAIN_TAG.len()] != DOMAIN_TAG {
            return Err(IoError::new(ErrorKind::InvalidData, "missing transfer domain tag"));
        }
        *buf = &buf[DOMAIN_TAG.len()..];
        let fields = TransferFields::deserialize(buf)?;
        let consumed = start.len() - buf.len();
        Ok(Self {
            fields,
            canonical: start[..consumed].to_vec(),
        })
    }
}
