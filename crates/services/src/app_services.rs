use std::sync::Arc;

use clicker_core::leveling::LevelingRules;
use clicker_core::model::{DEFAULT_USERNAME, Player, PlayerId};
use storage::repository::{PlayerRepository, Storage};
use tracing::info;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progression_service::ProgressionService;

/// Assembles app-facing services and makes sure the player record exists.
#[derive(Clone)]
pub struct AppServices {
    created_player: bool,
    progression: Arc<ProgressionService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or default player
    /// setup fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        rules: LevelingRules,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, rules).await
    }

    /// Build services over an already opened storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if default player setup fails.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        rules: LevelingRules,
    ) -> Result<Self, AppServicesError> {
        let player_id = PlayerId::DEFAULT;
        let created_player = ensure_default_player(storage.players.as_ref(), clock, player_id).await?;

        let progression = Arc::new(ProgressionService::new(
            clock,
            Arc::clone(&storage.players),
            rules,
            player_id,
        ));

        Ok(Self {
            created_player,
            progression,
        })
    }

    /// True when this boot created the player record.
    #[must_use]
    pub fn created_player(&self) -> bool {
        self.created_player
    }

    #[must_use]
    pub fn progression(&self) -> Arc<ProgressionService> {
        Arc::clone(&self.progression)
    }
}

/// Creates the player record with level 1 defaults if it does not exist.
///
/// Returns `true` if a record was created.
///
/// # Errors
///
/// Returns `AppServicesError` if the repository fails.
pub async fn ensure_default_player(
    players: &dyn PlayerRepository,
    clock: Clock,
    id: PlayerId,
) -> Result<bool, AppServicesError> {
    if players.get_player(id).await?.is_some() {
        return Ok(false);
    }

    let player = Player::new(id, DEFAULT_USERNAME, clock.now())?;
    players.insert_player(&player).await?;
    info!(player = %id, username = DEFAULT_USERNAME, "created player record");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use clicker_core::time::fixed_now;

    #[tokio::test]
    async fn bootstrap_creates_player_once() {
        let storage = Storage::in_memory();
        let clock = Clock::fixed(fixed_now());

        let first = AppServices::from_storage(storage.clone(), clock, LevelingRules::default())
            .await
            .unwrap();
        assert!(first.created_player());

        let second = AppServices::from_storage(storage.clone(), clock, LevelingRules::default())
            .await
            .unwrap();
        assert!(!second.created_player());

        let player = second.progression().current().await.unwrap();
        assert_eq!(player.username(), DEFAULT_USERNAME);
        assert_eq!(player.id(), PlayerId::DEFAULT);
        assert_eq!(player.progression().level(), 1);
        assert_eq!(player.progression().last_time_clicked(), fixed_now());
    }
}
