use async_trait::async_trait;
use clicker_core::model::{Player, PlayerId, Progression};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the player record.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Fetch a player by ID.
    ///
    /// Returns `Ok(None)` when the player does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or the row is malformed.
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError>;

    /// Insert a new player.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id or username is taken.
    async fn insert_player(&self, player: &Player) -> Result<(), StorageError>;

    /// Overwrite the progression of an existing player.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the player does not exist; the
    /// record is never created here.
    async fn save_progression(
        &self,
        id: PlayerId,
        progression: &Progression,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    players: Arc<Mutex<HashMap<PlayerId, Player>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryRepository {
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        let guard = self
            .players
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert_player(&self, player: &Player) -> Result<(), StorageError> {
        let mut guard = self
            .players
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let taken = guard.contains_key(&player.id())
            || guard.values().any(|p| p.username() == player.username());
        if taken {
            return Err(StorageError::Conflict);
        }
        guard.insert(player.id(), player.clone());
        Ok(())
    }

    async fn save_progression(
        &self,
        id: PlayerId,
        progression: &Progression,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .players
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let player = guard.get_mut(&id).ok_or(StorageError::NotFound)?;
        *player = player.with_progression(progression.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub players: Arc<dyn PlayerRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let players: Arc<dyn PlayerRepository> = Arc::new(InMemoryRepository::new());
        Self { players }
    }
}
