use chrono::{DateTime, Duration, Utc};

use crate::model::{Amount, Progression, ProgressionError};

//
// ─── RULES ─────────────────────────────────────────────────────────────────────
//

/// Default window for the fast-click combo.
pub const DEFAULT_COMBO_WINDOW_SECS: i64 = 5;

/// Whether consecutive clicks multiply the granted XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboMode {
    /// Every click grants exactly its amount.
    Disabled,
    /// Repeated amounts and clicks closer than `window` build multipliers.
    Enabled { window: Duration },
}

/// Configuration for [`apply_stimulus`].
///
/// # Examples
///
/// ```
/// # use clicker_core::leveling::{ComboMode, LevelingRules};
/// let rules = LevelingRules::default();
/// assert!(matches!(rules.combo, ComboMode::Enabled { .. }));
/// assert_eq!(LevelingRules::basic().combo, ComboMode::Disabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelingRules {
    pub combo: ComboMode,
}

impl LevelingRules {
    /// Plain accumulation with no combo multipliers.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            combo: ComboMode::Disabled,
        }
    }

    /// Combo multipliers with a custom fast-click window.
    #[must_use]
    pub fn with_combo_window(window: Duration) -> Self {
        Self {
            combo: ComboMode::Enabled { window },
        }
    }
}

impl Default for LevelingRules {
    fn default() -> Self {
        Self::with_combo_window(Duration::seconds(DEFAULT_COMBO_WINDOW_SECS))
    }
}

//
// ─── STIMULUS ──────────────────────────────────────────────────────────────────
//

/// One XP-granting click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stimulus {
    pub amount: Amount,
    pub at: DateTime<Utc>,
}

impl Stimulus {
    #[must_use]
    pub fn new(amount: Amount, at: DateTime<Utc>) -> Self {
        Self { amount, at }
    }
}

/// Result of applying a stimulus.
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusOutcome {
    pub progression: Progression,
    /// Amount actually added after multipliers.
    pub effective_amount: f64,
    pub levels_gained: u32,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Applies a click to `current` and returns the resulting progression.
///
/// `current` is never modified. With combos enabled, a click repeating the
/// previous amount bumps `multiplier`, and a click arriving less than the
/// window after the previous one bumps `time_multiplier`; the granted XP is
/// `amount * multiplier * time_multiplier`, and it is what `total_xp` records.
///
/// # Errors
///
/// Returns `ProgressionError::Overflow` if the granted XP or the resulting
/// totals are not finite.
///
/// # Examples
///
/// ```
/// # use clicker_core::leveling::{apply_stimulus, LevelingRules, Stimulus};
/// # use clicker_core::model::{Amount, Progression};
/// let now = chrono::Utc::now();
/// let start = Progression::new(now);
/// let outcome = apply_stimulus(&start, Stimulus::new(Amount::new(1.0)?, now), &LevelingRules::basic())?;
/// assert_eq!(outcome.progression.level(), 2);
/// assert_eq!(outcome.progression.xp_required(), 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn apply_stimulus(
    current: &Progression,
    stimulus: Stimulus,
    rules: &LevelingRules,
) -> Result<StimulusOutcome, ProgressionError> {
    let raw = stimulus.amount.value();
    let mut next = current.clone();

    let effective_amount = match rules.combo {
        ComboMode::Disabled => raw,
        ComboMode::Enabled { window } => {
            let elapsed = stimulus.at - next.last_time_clicked;
            next.time_multiplier = if elapsed < window {
                next.time_multiplier.saturating_add(1)
            } else {
                1
            };
            next.last_time_clicked = stimulus.at;

            // Repeats are detected on the exact submitted value.
            #[allow(clippy::float_cmp)]
            let repeated = raw == next.last_item_clicked;
            next.multiplier = if repeated {
                next.multiplier.saturating_add(1)
            } else {
                1
            };
            next.last_item_clicked = raw;

            raw * f64::from(next.multiplier) * f64::from(next.time_multiplier)
        }
    };

    let xp = next.xp + effective_amount;
    let total_xp = next.total_xp + effective_amount;
    if !effective_amount.is_finite() || !xp.is_finite() || !total_xp.is_finite() {
        return Err(ProgressionError::Overflow { amount: raw });
    }
    next.xp = xp;
    next.total_xp = total_xp;

    let levels_gained = normalize(&mut next);

    Ok(StimulusOutcome {
        progression: next,
        effective_amount,
        levels_gained,
    })
}

/// Spends banked XP on level-ups until `xp < xp_required`.
///
/// Returns how many levels were gained. The threshold grows after every
/// level, so this is a loop rather than a closed form.
pub fn normalize(progression: &mut Progression) -> u32 {
    progression.xp_required = progression.xp_required.max(1.0);

    let mut gained = 0_u32;
    while progression.xp >= progression.xp_required {
        progression.xp -= progression.xp_required;
        progression.xp_required = next_threshold(progression.xp_required, progression.level);
        progression.level = progression.level.saturating_add(1);
        gained = gained.saturating_add(1);
    }
    gained
}

/// Threshold for the level after `level`, given the current one.
///
/// `max(1, round(xp_required + max(1, xp_required / sqrt(level))))`, with
/// halves rounded to even.
#[must_use]
pub fn next_threshold(xp_required: f64, level: u32) -> f64 {
    let step = (xp_required / f64::from(level.max(1)).sqrt()).max(1.0);
    (xp_required + step).round_ties_even().max(1.0)
}
