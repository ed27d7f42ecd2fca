use thiserror::Error;

/// Failures raised at the ledger boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("Row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("Row {row}: unknown category '{value}' (expected Income, Expense, Investment or Savings)")]
    InvalidCategory { row: usize, value: String },
    #[error("Invalid amount: '{value}'")]
    InvalidAmount { value: String },
}
