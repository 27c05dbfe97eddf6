use thiserror::Error;

/// Errors converting a decimal amount into base units.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Amount is zero")]
    Zero,

    #[error("Amount must not be negative: {0}")]
    Negative(String),

    #[error("Invalid amount {amount:?}: {reason}")]
    Invalid { amount: String, reason: String },
}

/// Errors building a deposit plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Token address is zero")]
    ZeroToken,

    #[error("Deposit contract address is zero")]
    ZeroDepositContract,

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Synchronous failure to submit a transaction.
///
/// The controller rolls back to the phase it was in before the attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The wallet owner declined the request
    #[error("Request rejected by wallet: {0}")]
    Rejected(String),

    /// Provider or network could not be reached
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The request was refused as invalid
    #[error("Malformed request: {0}")]
    Malformed(String),
}
