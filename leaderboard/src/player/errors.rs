//! Tournament error types.

use thiserror::Error;

use super::models::PlayerId;
use crate::db::StoreError;

/// Malformed input rejected before any store access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Player name is empty or whitespace only
    #[error("Player name must not be empty.")]
    EmptyName,

    /// Player name holds a control character (NUL included)
    #[error("Player name must not contain control characters.")]
    ControlCharacterInName,

    /// Score below zero
    #[error("Player score must be a positive integer, got {0}.")]
    NegativeScore(i64),

    /// Player id is not a well-formed identifier
    #[error("Invalid id format: {0}")]
    InvalidId(String),
}

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Malformed input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A player with this name is already registered
    #[error("Player '{name}' already exists.")]
    Conflict { name: String },

    /// No player with this id
    #[error("Player with id '{0}' not found.")]
    NotFound(PlayerId),

    /// Failure reported by the player store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl TournamentError {
    /// Get a client-safe error message that doesn't leak store internals
    ///
    /// Store errors are replaced by a generic message; domain errors are
    /// safe to expose as-is.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Store(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
