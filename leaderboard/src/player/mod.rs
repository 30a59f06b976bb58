//! Player lifecycle and leaderboard ranking.
//!
//! This module provides the tournament domain:
//! - Player registration with unique names
//! - Score updates
//! - Ranking with shared ranks on ties
//! - Clearing the whole tournament
//!
//! ## Example
//!
//! ```
//! use leaderboard::db::InMemoryPlayerStore;
//! use leaderboard::player::TournamentService;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TournamentService::with_log_reporter(Arc::new(InMemoryPlayerStore::new()));
//!
//! let id = service.create_player("freddy").await?;
//! service.update_player_score(id, 150).await?;
//!
//! let freddy = service.get_player_by_id(id).await?;
//! assert_eq!(freddy.rank, 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod models;
pub mod ranking;
pub mod reporter;
pub mod service;

pub use errors::{TournamentError, TournamentResult, ValidationError};
pub use models::{
    CreatePlayerRequest, CreatePlayerResponse, Player, PlayerId, RankedPlayer,
    UpdatePlayerRequest,
};
pub use ranking::{rank_all, rank_of};
pub use reporter::{
    LogReporter, NoopReporter, RecordingReporter, ReportedEvent, TournamentReporter,
};
pub use service::TournamentService;
