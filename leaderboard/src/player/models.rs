//! Player data models and request payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::errors::ValidationError;

/// Opaque player identifier, assigned by the store when the player is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PlayerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ValidationError::InvalidId(e.to_string()))
    }
}

/// A registered player as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Never negative
    pub score: i64,
}

/// A player together with its computed rank. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub score: i64,
    /// 1-based; players with equal scores share a rank
    pub rank: u32,
}

impl RankedPlayer {
    pub fn new(player: Player, rank: u32) -> Self {
        Self {
            id: player.id,
            name: player.name,
            score: player.score,
            rank,
        }
    }
}

/// Check that a player name is usable
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    // PostgreSQL TEXT cannot hold NUL
    if name.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacterInName);
    }
    Ok(())
}

/// Check that a score is not negative
pub fn validate_score(score: i64) -> Result<(), ValidationError> {
    if score < 0 {
        return Err(ValidationError::NegativeScore(score));
    }
    Ok(())
}

/// Request to register a new player
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePlayerRequest {
    pub name: String,
}

impl CreatePlayerRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Response returned after a player is registered
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePlayerResponse {
    pub id: PlayerId,
}

/// Request to overwrite a player's score
///
/// The id is kept as a raw string so that a malformed id is reported as a
/// validation failure rather than a body decoding failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdatePlayerRequest {
    pub id: String,
    pub score: i64,
}

impl UpdatePlayerRequest {
    /// Validate the request and split it into a typed id and score
    ///
    /// # Errors
    ///
    /// * `ValidationError::InvalidId` - id is not a well-formed identifier
    /// * `ValidationError::NegativeScore` - score is below zero
    pub fn into_parts(self) -> Result<(PlayerId, i64), ValidationError> {
        let id = self.id.parse()?;
        validate_score(self.score)?;
        Ok((id, self.score))
    }
}
