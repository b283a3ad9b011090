mod amount;
mod ids;
mod player;
mod progression;

pub use amount::{Amount, AmountError};
pub use ids::PlayerId;
pub use player::{DEFAULT_USERNAME, Player, PlayerError};
pub use progression::{Progression, ProgressionDraft, ProgressionError};
