use chrono::{DateTime, Utc};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error("invalid persisted progression: {0}")]
    InvalidPersistedState(String),

    #[error("xp arithmetic overflowed applying {amount}")]
    Overflow { amount: f64 },
}

//
// ─── PROGRESSION ───────────────────────────────────────────────────────────────
//

/// Level/XP progression of a player, including combo bookkeeping.
///
/// Only the leveling engine produces new values; storage rebuilds one with
/// [`Progression::from_persisted`].
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    pub(crate) xp: f64,
    pub(crate) xp_required: f64,
    pub(crate) total_xp: f64,
    pub(crate) level: u32,
    pub(crate) multiplier: u32,
    pub(crate) last_item_clicked: f64,
    pub(crate) time_multiplier: u32,
    pub(crate) last_time_clicked: DateTime<Utc>,
}

/// Raw stored fields, validated by [`Progression::from_persisted`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionDraft {
    pub xp: f64,
    pub xp_required: f64,
    pub total_xp: f64,
    pub level: u32,
    pub multiplier: u32,
    pub last_item_clicked: f64,
    pub time_multiplier: u32,
    pub last_time_clicked: DateTime<Utc>,
}

impl Progression {
    /// Fresh progression: level 1, nothing earned, combos at 1.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            xp: 0.0,
            xp_required: 1.0,
            total_xp: 0.0,
            level: 1,
            multiplier: 1,
            last_item_clicked: 0.0,
            time_multiplier: 1,
            last_time_clicked: now,
        }
    }

    /// Rebuild a progression from stored values.
    ///
    /// `xp >= xp_required` is tolerated; the next stimulus normalizes it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPersistedState` if a float is negative or not finite,
    /// `xp_required < 1`, `level == 0`, or a multiplier is 0.
    pub fn from_persisted(draft: ProgressionDraft) -> Result<Self, ProgressionError> {
        let floats = [
            ("xp", draft.xp),
            ("xp_required", draft.xp_required),
            ("total_xp", draft.total_xp),
            ("last_item_clicked", draft.last_item_clicked),
        ];
        for (field, value) in floats {
            if !value.is_finite() || value < 0.0 {
                return Err(ProgressionError::InvalidPersistedState(format!(
                    "{field} must be finite and >= 0, got {value}"
                )));
            }
        }
        if draft.xp_required < 1.0 {
            return Err(ProgressionError::InvalidPersistedState(format!(
                "xp_required must be >= 1, got {}",
                draft.xp_required
            )));
        }
        if draft.level == 0 {
            return Err(ProgressionError::InvalidPersistedState(
                "level must be >= 1".into(),
            ));
        }
        if draft.multiplier == 0 || draft.time_multiplier == 0 {
            return Err(ProgressionError::InvalidPersistedState(
                "multipliers must be >= 1".into(),
            ));
        }

        Ok(Self {
            xp: draft.xp,
            xp_required: draft.xp_required,
            total_xp: draft.total_xp,
            level: draft.level,
            multiplier: draft.multiplier,
            last_item_clicked: draft.last_item_clicked,
            time_multiplier: draft.time_multiplier,
            last_time_clicked: draft.last_time_clicked,
        })
    }

    #[must_use]
    pub fn xp(&self) -> f64 {
        self.xp
    }

    #[must_use]
    pub fn xp_required(&self) -> f64 {
        self.xp_required
    }

    #[must_use]
    pub fn total_xp(&self) -> f64 {
        self.total_xp
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    #[must_use]
    pub fn last_item_clicked(&self) -> f64 {
        self.last_item_clicked
    }

    #[must_use]
    pub fn time_multiplier(&self) -> u32 {
        self.time_multiplier
    }

    #[must_use]
    pub fn last_time_clicked(&self) -> DateTime<Utc> {
        self.last_time_clicked
    }

    /// Progress through the current level, in percent (0..=100).
    #[must_use]
    pub fn level_progress_percent(&self) -> f64 {
        (self.xp / self.xp_required * 100.0).clamp(0.0, 100.0)
    }
}
