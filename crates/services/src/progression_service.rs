use std::sync::Arc;

use clicker_core::leveling::{LevelingRules, Stimulus, apply_stimulus};
use clicker_core::model::{Amount, Player, PlayerId};
use storage::repository::PlayerRepository;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::Clock;
use crate::error::ProgressionServiceError;

/// What a single click did.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickReport {
    pub player: Player,
    pub effective_amount: f64,
    pub levels_gained: u32,
}

/// Loads the player record, applies clicks through the leveling engine and
/// persists the result.
///
/// Clicks are serialized: the load/apply/save cycle runs under one lock, so
/// concurrent requests cannot lose each other's XP.
pub struct ProgressionService {
    clock: Clock,
    players: Arc<dyn PlayerRepository>,
    rules: LevelingRules,
    player_id: PlayerId,
    write_lock: Mutex<()>,
}

impl ProgressionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        players: Arc<dyn PlayerRepository>,
        rules: LevelingRules,
        player_id: PlayerId,
    ) -> Self {
        Self {
            clock,
            players,
            rules,
            player_id,
            write_lock: Mutex::new(()),
        }
    }

    /// Fetch the current player.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionServiceError::NotFound` if the record is missing.
    /// Returns `ProgressionServiceError::Storage` if repository access fails.
    pub async fn current(&self) -> Result<Player, ProgressionServiceError> {
        self.players
            .get_player(self.player_id)
            .await?
            .ok_or(ProgressionServiceError::NotFound)
    }

    /// Grant XP for one click at the clock's current time.
    ///
    /// The record is not created if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionServiceError::NotFound` if the record is missing.
    /// Returns `ProgressionServiceError::Progression` if the XP overflows.
    /// Returns `ProgressionServiceError::Storage` if persistence fails.
    pub async fn add_xp(&self, amount: Amount) -> Result<ClickReport, ProgressionServiceError> {
        let _guard = self.write_lock.lock().await;

        let player = self.current().await?;
        let stimulus = Stimulus::new(amount, self.clock.now());
        let outcome = apply_stimulus(player.progression(), stimulus, &self.rules)?;

        self.players
            .save_progression(player.id(), &outcome.progression)
            .await?;

        let progression = &outcome.progression;
        debug!(
            amount = amount.value(),
            effective = outcome.effective_amount,
            multiplier = progression.multiplier(),
            time_multiplier = progression.time_multiplier(),
            "xp applied"
        );
        if outcome.levels_gained > 0 {
            info!(
                player = %player.id(),
                level = progression.level(),
                gained = outcome.levels_gained,
                "level up"
            );
        }

        Ok(ClickReport {
            player: player.with_progression(outcome.progression),
            effective_amount: outcome.effective_amount,
            levels_gained: outcome.levels_gained,
        })
    }

    /// Parse a raw submitted amount and grant it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionServiceError::Input` if `raw` is not a finite,
    /// non-negative number, plus everything [`Self::add_xp`] returns.
    pub async fn add_xp_raw(&self, raw: &str) -> Result<ClickReport, ProgressionServiceError> {
        let amount: Amount = raw.parse()?;
        self.add_xp(amount).await
    }
}
