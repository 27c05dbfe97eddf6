use alloy_primitives::{TxHash, U256};
use std::fmt;

/// Opaque identifier of one in-flight transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHandle(TxHash);

impl TransactionHandle {
    pub const fn new(tx_hash: TxHash) -> Self {
        Self(tx_hash)
    }

    pub const fn tx_hash(&self) -> TxHash {
        self.0
    }
}

impl From<TxHash> for TransactionHandle {
    fn from(tx_hash: TxHash) -> Self {
        Self(tx_hash)
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Details of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Handle that was confirmed
    pub handle: TransactionHandle,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: Option<U256>,
}

impl Confirmation {
    /// Confirmation with no receipt details.
    pub const fn new(handle: TransactionHandle) -> Self {
        Self {
            handle,
            block_number: None,
            gas_used: None,
        }
    }
}

/// Terminal status of a watched transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    Success(Confirmation),
    Failure(String),
}

impl TransactionOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
