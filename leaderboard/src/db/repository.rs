//! Player store abstraction and its PostgreSQL implementation.
//!
//! The tournament service only talks to [`PlayerStore`], so the backing
//! store can be swapped (see [`InMemoryPlayerStore`](super::InMemoryPlayerStore)).

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::time::Duration;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::timeouts::{DEFAULT_QUERY_TIMEOUT, with_timeout};
use crate::player::{Player, PlayerId};

/// Trait for player store operations
///
/// Single operations are atomic; nothing is guaranteed across calls.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Insert a player with a score of zero and return its new id
    ///
    /// Stores able to enforce unique names return
    /// `StoreError::DuplicateName` when the name is taken.
    async fn insert(&self, name: &str) -> StoreResult<PlayerId>;

    /// Whether a player with this exact name exists
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;

    /// Find player by ID
    async fn find_by_id(&self, id: PlayerId) -> StoreResult<Option<Player>>;

    /// Set the score of a player; `false` when no player has this id
    async fn update_score(&self, id: PlayerId, score: i64) -> StoreResult<bool>;

    /// Number of distinct score values strictly greater than `score`
    async fn count_distinct_scores_greater_than(&self, score: i64) -> StoreResult<u64>;

    /// Every player, in registration order
    async fn find_all(&self) -> StoreResult<Vec<Player>>;

    /// Delete every player and return how many were removed
    async fn delete_all(&self) -> StoreResult<u64>;

    /// Check the store can serve requests
    async fn health_check(&self) -> StoreResult<()>;
}

/// PostgreSQL implementation of `PlayerStore`
///
/// Relies on the `players` table created by
/// [`Database::migrate`](super::Database::migrate), whose `UNIQUE`
/// constraint on `name` closes the check-then-insert race.
pub struct PgPlayerStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_query_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_query_timeout(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

fn player_from_row(row: &PgRow) -> Result<Player, sqlx::Error> {
    Ok(Player {
        id: PlayerId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        score: row.try_get("score")?,
    })
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn insert(&self, name: &str) -> StoreResult<PlayerId> {
        let id = PlayerId::new();

        let result = with_timeout(
            self.query_timeout,
            sqlx::query("INSERT INTO players (id, name, score) VALUES ($1, $2, 0)")
                .bind(id.as_uuid())
                .bind(name)
                .execute(&self.pool),
        )
        .await;

        match result {
            Ok(_) => Ok(id),
            Err(StoreError::Database(sqlx::Error::Database(e))) if e.is_unique_violation() => {
                Err(StoreError::DuplicateName(name.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        with_timeout(
            self.query_timeout,
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM players WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn find_by_id(&self, id: PlayerId) -> StoreResult<Option<Player>> {
        let row = with_timeout(
            self.query_timeout,
            sqlx::query("SELECT id, name, score FROM players WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.as_ref().map(player_from_row).transpose()?)
    }

    async fn update_score(&self, id: PlayerId, score: i64) -> StoreResult<bool> {
        let result = with_timeout(
            self.query_timeout,
            sqlx::query("UPDATE players SET score = $2 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(score)
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_distinct_scores_greater_than(&self, score: i64) -> StoreResult<u64> {
        let count = with_timeout(
            self.query_timeout,
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(DISTINCT score) FROM players WHERE score > $1",
            )
            .bind(score)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(count_to_u64(count))
    }

    async fn find_all(&self) -> StoreResult<Vec<Player>> {
        let rows = with_timeout(
            self.query_timeout,
            sqlx::query("SELECT id, name, score FROM players ORDER BY registration_seq")
                .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .iter()
            .map(player_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = with_timeout(
            self.query_timeout,
            sqlx::query("DELETE FROM players").execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> StoreResult<()> {
        with_timeout(
            self.query_timeout,
            sqlx::query("SELECT 1").execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}
