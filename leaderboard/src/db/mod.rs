//! Database module providing PostgreSQL connection pooling and the player store.
//!
//! This module manages the database connection pool using sqlx, creates the
//! `players` table and exposes the [`PlayerStore`] trait with its
//! PostgreSQL and in-memory implementations.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod config;
pub mod errors;
pub mod memory;
pub mod repository;
pub mod timeouts;

pub use config::{DatabaseConfig, DatabaseConfigError};
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryPlayerStore;
pub use repository::{PgPlayerStore, PlayerStore};

const CREATE_PLAYERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS players (
        id UUID PRIMARY KEY,
        registration_seq BIGINT GENERATED ALWAYS AS IDENTITY,
        name TEXT NOT NULL UNIQUE,
        score BIGINT NOT NULL DEFAULT 0 CHECK (score >= 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

// Tables created before the sequence column existed
const ADD_REGISTRATION_SEQ: &str = "
    ALTER TABLE players
    ADD COLUMN IF NOT EXISTS registration_seq BIGINT GENERATED ALWAYS AS IDENTITY";

const CREATE_SCORE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS players_score_idx ON players (score DESC)";

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Arguments
    ///
    /// * `config` - Database configuration
    ///
    /// # Returns
    ///
    /// * `Result<Database, sqlx::Error>` - Database instance or error
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use leaderboard::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = DatabaseConfig::from_env()?;
    ///     let db = Database::new(&config).await?;
    ///     db.migrate().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `players` table and its score index if they are missing
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_PLAYERS_TABLE).execute(&self.pool).await?;
        sqlx::query(ADD_REGISTRATION_SEQ).execute(&self.pool).await?;
        sqlx::query(CREATE_SCORE_INDEX).execute(&self.pool).await?;
        log::info!("Database schema ready");
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
