//! Tournament service: player registration, score updates and rankings.

use std::sync::Arc;

use super::{
    errors::{TournamentError, TournamentResult},
    models::{PlayerId, RankedPlayer, validate_name, validate_score},
    ranking::{rank_all, rank_from_higher_count},
    reporter::{LogReporter, TournamentReporter},
};
use crate::db::{PlayerStore, StoreError};

/// Tournament service
///
/// Holds no state of its own; every call goes to the player store.
/// Store failures are passed through untouched, without retries.
#[derive(Clone)]
pub struct TournamentService {
    store: Arc<dyn PlayerStore>,
    reporter: Arc<dyn TournamentReporter>,
}

impl TournamentService {
    /// Create a new tournament service
    ///
    /// # Arguments
    ///
    /// * `store` - Player store backing the tournament
    /// * `reporter` - Sink for completed operations
    pub fn new(store: Arc<dyn PlayerStore>, reporter: Arc<dyn TournamentReporter>) -> Self {
        Self { store, reporter }
    }

    /// Create a service reporting through the `log` facade
    pub fn with_log_reporter(store: Arc<dyn PlayerStore>) -> Self {
        Self::new(store, Arc::new(LogReporter))
    }

    /// Register a new player with a score of zero
    ///
    /// # Returns
    ///
    /// * `TournamentResult<PlayerId>` - Id assigned by the store
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - Name is empty
    /// * `TournamentError::Conflict` - Name already registered
    /// * `TournamentError::Store` - Store failure
    ///
    /// The existence check and the insert are two store calls. Two
    /// concurrent registrations of the same name can both pass the check;
    /// the store then decides. Stores that enforce unique names report
    /// `StoreError::DuplicateName`, which surfaces as a conflict too.
    pub async fn create_player(&self, name: &str) -> TournamentResult<PlayerId> {
        validate_name(name)?;

        if self.store.exists_by_name(name).await? {
            return Err(TournamentError::Conflict {
                name: name.to_string(),
            });
        }

        let id = match self.store.insert(name).await {
            Ok(id) => id,
            Err(StoreError::DuplicateName(name)) => {
                return Err(TournamentError::Conflict { name });
            }
            Err(e) => return Err(e.into()),
        };

        self.reporter.player_created(&id, name);
        Ok(id)
    }

    /// Overwrite a player's score
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - Score is negative
    /// * `TournamentError::NotFound` - No player with this id
    /// * `TournamentError::Store` - Store failure
    pub async fn update_player_score(&self, id: PlayerId, score: i64) -> TournamentResult<()> {
        validate_score(score)?;

        if !self.store.update_score(id, score).await? {
            return Err(TournamentError::NotFound(id));
        }

        self.reporter.score_updated(&id, score);
        Ok(())
    }

    /// Remove every player
    ///
    /// # Returns
    ///
    /// * `TournamentResult<u64>` - Number of players deleted, zero if the
    ///   tournament was already empty
    pub async fn clear_tournament(&self) -> TournamentResult<u64> {
        let deleted = self.store.delete_all().await?;
        self.reporter.tournament_cleared(deleted);
        Ok(deleted)
    }

    /// Fetch one player with its current rank
    ///
    /// The rank is computed by the store from the number of distinct
    /// scores above the player, which gives the same value as the
    /// player's position in [`list_players_by_rank`](Self::list_players_by_rank).
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - No player with this id
    /// * `TournamentError::Store` - Store failure
    pub async fn get_player_by_id(&self, id: PlayerId) -> TournamentResult<RankedPlayer> {
        let player = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TournamentError::NotFound(id))?;

        let higher = self
            .store
            .count_distinct_scores_greater_than(player.score)
            .await?;
        let ranked = RankedPlayer::new(player, rank_from_higher_count(higher));

        self.reporter.player_fetched(&ranked);
        Ok(ranked)
    }

    /// Full leaderboard, highest score first
    ///
    /// An empty tournament yields an empty list.
    pub async fn list_players_by_rank(&self) -> TournamentResult<Vec<RankedPlayer>> {
        let players = self.store.find_all().await?;
        let ranked = rank_all(players);

        self.reporter.players_listed(&ranked);
        Ok(ranked)
    }

    /// Check that the store is reachable
    pub async fn health_check(&self) -> TournamentResult<()> {
        self.store.health_check().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryPlayerStore;
    use crate::player::reporter::{RecordingReporter, ReportedEvent};

    fn service() -> (TournamentService, Arc<InMemoryPlayerStore>, Arc<RecordingReporter>) {
        let store = Arc::new(InMemoryPlayerStore::new());
        let reporter = Arc::new(RecordingReporter::new());
        let service = TournamentService::new(store.clone(), reporter.clone());
        (service, store, reporter)
    }

    #[tokio::test]
    async fn test_create_player_starts_at_zero() {
        let (service, _, reporter) = service();

        let id = service.create_player("freddy").await.unwrap();
        let player = service.get_player_by_id(id).await.unwrap();

        assert_eq!(player.name, "freddy");
        assert_eq!(player.score, 0);
        assert_eq!(player.rank, 1);
        assert_eq!(
            reporter.events()[0],
            ReportedEvent::PlayerCreated {
                id,
                name: "freddy".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_create_player_rejects_empty_name_without_store_access() {
        let (service, store, reporter) = service();
        store.set_available(false);

        let err = service.create_player("").await.unwrap_err();
        assert!(matches!(err, TournamentError::Validation(_)));
        assert!(reporter.events().is_empty());
    }

    #[tokio::test]
    async fn test_negative_score_never_reaches_store() {
        let (service, store, _) = service();
        let id = service.create_player("paul").await.unwrap();
        store.set_available(false);

        let err = service.update_player_score(id, -5).await.unwrap_err();
        assert!(matches!(err, TournamentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (service, store, reporter) = service();
        store.set_available(false);

        let err = service.list_players_by_rank().await.unwrap_err();
        assert!(matches!(err, TournamentError::Store(_)));
        assert_eq!(err.client_message(), "Internal server error");
        assert!(service.health_check().await.is_err());
        assert!(reporter.events().is_empty());
    }
}
