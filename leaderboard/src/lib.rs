//! # Leaderboard
//!
//! Tournament leaderboard: registers players, records their scores and
//! ranks them.
//!
//! ## Core Modules
//!
//! - [`player`]: Player model, ranking, and the [`TournamentService`]
//! - [`db`]: The [`PlayerStore`] abstraction with PostgreSQL and in-memory stores
//!
//! ## Ranking
//!
//! Players are listed by descending score. Equal scores share a rank and
//! the next lower score takes the next rank:
//!
//! ```
//! use leaderboard::player::{Player, PlayerId, rank_all};
//!
//! let players = [150, 80, 10, 10, 5, 0]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, score)| Player { id: PlayerId::new(), name: format!("p{i}"), score })
//!     .collect();
//!
//! let ranks: Vec<u32> = rank_all(players).iter().map(|p| p.rank).collect();
//! assert_eq!(ranks, vec![1, 2, 3, 3, 4, 5]);
//! ```

/// Player store and database plumbing.
pub mod db;

/// Tournament domain logic.
pub mod player;

pub use db::{InMemoryPlayerStore, PgPlayerStore, PlayerStore, StoreError};
pub use player::{
    Player, PlayerId, RankedPlayer, TournamentError, TournamentResult, TournamentService,
};
