use thiserror::Error;

/// Reasons an entry is rejected before it reaches the ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("entry name must not be empty")]
    EmptyName,
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),
    #[error("invalid date `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Stored ledger is corrupt: {0}")]
    CorruptBlob(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}
