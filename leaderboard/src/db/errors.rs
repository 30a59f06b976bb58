//! Player store error types.

use std::time::Duration;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Operation did not complete in time and was cancelled
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// The store rejected an insert because the name is taken
    #[error("Player name already taken: {0}")]
    DuplicateName(String),

    /// Store cannot serve requests
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
