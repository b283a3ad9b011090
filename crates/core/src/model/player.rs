use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::PlayerId;
use crate::model::progression::Progression;

/// Username given to the record created on first boot.
pub const DEFAULT_USERNAME: &str = "Player";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("username cannot be empty")]
    EmptyUsername,
}

/// The persisted player: identity plus its progression.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: PlayerId,
    username: String,
    progression: Progression,
}

impl Player {
    /// Creates a player at level 1.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::EmptyUsername` if the trimmed username is empty.
    pub fn new(
        id: PlayerId,
        username: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, PlayerError> {
        Self::from_persisted(id, username, Progression::new(now))
    }

    /// Rebuilds a player from storage.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::EmptyUsername` if the trimmed username is empty.
    pub fn from_persisted(
        id: PlayerId,
        username: impl Into<String>,
        progression: Progression,
    ) -> Result<Self, PlayerError> {
        let username = username.into().trim().to_owned();
        if username.is_empty() {
            return Err(PlayerError::EmptyUsername);
        }
        Ok(Self {
            id,
            username,
            progression,
        })
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Returns a copy carrying a new progression.
    #[must_use]
    pub fn with_progression(&self, progression: Progression) -> Self {
        Self {
            id: self.id,
            username: self.username.clone(),
            progression,
        }
    }
}
