use clicker_core::model::Player;

use crate::vm::number_fmt::display_number;

/// Display-ready snapshot of the player's progression.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionVm {
    pub username: String,
    pub level: u32,
    pub xp_str: String,
    pub xp_required_str: String,
    pub total_xp_str: String,
    pub percent: f64,
    pub percent_str: String,
    pub multiplier: u32,
    pub time_multiplier: u32,
    pub last_amount_str: String,
}

impl ProgressionVm {
    /// Combined bonus the next matching fast click would build on.
    #[must_use]
    pub fn combo(&self) -> u64 {
        u64::from(self.multiplier) * u64::from(self.time_multiplier)
    }
}

impl From<&Player> for ProgressionVm {
    fn from(player: &Player) -> Self {
        let p = player.progression();
        let percent = p.level_progress_percent();
        Self {
            username: player.username().to_owned(),
            level: p.level(),
            xp_str: display_number(p.xp()),
            xp_required_str: display_number(p.xp_required()),
            total_xp_str: display_number(p.total_xp()),
            percent,
            percent_str: format!("{percent:.1}"),
            multiplier: p.multiplier(),
            time_multiplier: p.time_multiplier(),
            last_amount_str: display_number(p.last_item_clicked()),
        }
    }
}
