//! In-memory player store.
//!
//! Used by tests and by the server's `memory` backend. Mutations are
//! serialised by a single lock, so duplicate names are rejected
//! atomically at insert time.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::repository::PlayerStore;
use crate::player::{Player, PlayerId};

/// Player store kept in process memory
pub struct InMemoryPlayerStore {
    // Registration order is the vector order
    players: RwLock<Vec<Player>>,
    available: AtomicBool,
}

impl Default for InMemoryPlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Store pre-populated with players, kept in the given order
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players: RwLock::new(players),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage: while unavailable every operation fails with
    /// `StoreError::Unavailable`
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ))
        }
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn insert(&self, name: &str) -> StoreResult<PlayerId> {
        self.ensure_available()?;
        let mut players = self.players.write().await;

        if players.iter().any(|p| p.name == name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let id = PlayerId::new();
        players.push(Player {
            id,
            name: name.to_string(),
            score: 0,
        });
        Ok(id)
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        self.ensure_available()?;
        Ok(self.players.read().await.iter().any(|p| p.name == name))
    }

    async fn find_by_id(&self, id: PlayerId) -> StoreResult<Option<Player>> {
        self.ensure_available()?;
        Ok(self
            .players
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn update_score(&self, id: PlayerId, score: i64) -> StoreResult<bool> {
        self.ensure_available()?;
        let mut players = self.players.write().await;

        match players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.score = score;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_distinct_scores_greater_than(&self, score: i64) -> StoreResult<u64> {
        self.ensure_available()?;
        let players = self.players.read().await;
        let higher: BTreeSet<i64> = players
            .iter()
            .map(|p| p.score)
            .filter(|other| *other > score)
            .collect();
        Ok(higher.len() as u64)
    }

    async fn find_all(&self) -> StoreResult<Vec<Player>> {
        self.ensure_available()?;
        Ok(self.players.read().await.clone())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        self.ensure_available()?;
        let mut players = self.players.write().await;
        let deleted = players.len() as u64;
        players.clear();
        Ok(deleted)
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.ensure_available()
    }
}
