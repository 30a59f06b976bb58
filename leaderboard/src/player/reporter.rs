//! Reporting of completed tournament operations.
//!
//! The service emits one report per successful operation through a
//! [`TournamentReporter`]. Production code uses [`LogReporter`], which
//! writes through the `log` facade; tests can inspect what happened with
//! [`RecordingReporter`].

use std::sync::{Mutex, PoisonError};

use super::models::{PlayerId, RankedPlayer};

/// Sink for tournament events
pub trait TournamentReporter: Send + Sync {
    fn player_created(&self, id: &PlayerId, name: &str);

    fn score_updated(&self, id: &PlayerId, score: i64);

    /// `deleted` is zero when the tournament was already empty
    fn tournament_cleared(&self, deleted: u64);

    fn player_fetched(&self, player: &RankedPlayer);

    /// Called with the full leaderboard, possibly empty
    fn players_listed(&self, players: &[RankedPlayer]);
}

/// Reporter writing one `info` record per operation
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl TournamentReporter for LogReporter {
    fn player_created(&self, id: &PlayerId, name: &str) {
        log::info!("Player created: {id} ({name})");
    }

    fn score_updated(&self, id: &PlayerId, score: i64) {
        log::info!("Player {id} updated with score {score}");
    }

    fn tournament_cleared(&self, deleted: u64) {
        log::info!("{deleted} players deleted");
    }

    fn player_fetched(&self, player: &RankedPlayer) {
        log::info!("Player found: {player:?}");
    }

    fn players_listed(&self, players: &[RankedPlayer]) {
        if players.is_empty() {
            log::info!("No player found");
        } else {
            log::info!("Players sorted by rank: {players:?}");
        }
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl TournamentReporter for NoopReporter {
    fn player_created(&self, _id: &PlayerId, _name: &str) {}
    fn score_updated(&self, _id: &PlayerId, _score: i64) {}
    fn tournament_cleared(&self, _deleted: u64) {}
    fn player_fetched(&self, _player: &RankedPlayer) {}
    fn players_listed(&self, _players: &[RankedPlayer]) {}
}

/// An event captured by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportedEvent {
    PlayerCreated { id: PlayerId, name: String },
    ScoreUpdated { id: PlayerId, score: i64 },
    TournamentCleared { deleted: u64 },
    PlayerFetched(RankedPlayer),
    PlayersListed(Vec<RankedPlayer>),
}

/// Reporter keeping every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportedEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<ReportedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop every recorded event
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, event: ReportedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl TournamentReporter for RecordingReporter {
    fn player_created(&self, id: &PlayerId, name: &str) {
        self.record(ReportedEvent::PlayerCreated {
            id: *id,
            name: name.to_string(),
        });
    }

    fn score_updated(&self, id: &PlayerId, score: i64) {
        self.record(ReportedEvent::ScoreUpdated { id: *id, score });
    }

    fn tournament_cleared(&self, deleted: u64) {
        self.record(ReportedEvent::TournamentCleared { deleted });
    }

    fn player_fetched(&self, player: &RankedPlayer) {
        self.record(ReportedEvent::PlayerFetched(player.clone()));
    }

    fn players_listed(&self, players: &[RankedPlayer]) {
        self.record(ReportedEvent::PlayersListed(players.to_vec()));
    }
}
