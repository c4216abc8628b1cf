//! Transaction error types.

use thiserror::Error;

/// Result type for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;

/// Errors that can occur during transaction control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// `ROLLBACK` or `COMMIT` issued with no open transaction level.
    #[error("no transaction")]
    NoTransaction,
}
