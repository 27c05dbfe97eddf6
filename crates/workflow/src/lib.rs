//! Approve → deposit transaction workflow.
//!
//! This crate sequences the two transactions needed to deposit an ERC20 token
//! into a contract: an allowance approval for the deposit contract, then the
//! deposit itself. Submission and confirmation are delegated to a
//! [`TransactionSubmitter`] and a [`TransactionWatcher`]; the
//! [`TransactionWorkflowController`] owns the phase and decides every
//! transition.

pub mod amount;
pub mod controller;
pub mod error;
pub mod outcome;
pub mod phase;
pub mod plan;
pub mod request;

pub use amount::{parse_amount, DEFAULT_DECIMALS};
pub use controller::TransactionWorkflowController;
pub use error::{AmountError, PlanError, SubmissionError};
pub use outcome::{Confirmation, TransactionHandle, TransactionOutcome};
pub use phase::WorkflowPhase;
pub use plan::{DepositPlan, WalletContext};
pub use request::{CallArgument, ContractCall, TransactionRequest};

use std::future::Future;

/// Trait for sending transactions to a wallet or provider.
pub trait TransactionSubmitter: Send + Sync {
    /// Submit a transaction.
    ///
    /// Returns the handle of the pending transaction, or an error if the
    /// request was refused before anything was broadcast.
    fn submit(
        &self,
        request: TransactionRequest,
    ) -> impl Future<Output = Result<TransactionHandle, SubmissionError>> + Send;
}

/// Trait for observing the terminal status of submitted transactions.
pub trait TransactionWatcher: Send + Sync {
    /// Wait for the outcome of `handle`.
    ///
    /// Resolves exactly once per handle, after the transaction succeeded or
    /// failed.
    fn await_outcome(
        &self,
        handle: TransactionHandle,
    ) -> impl Future<Output = TransactionOutcome> + Send;
}
