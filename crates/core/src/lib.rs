#![forbid(unsafe_code)]

pub mod format;
pub mod leveling;
pub mod model;
pub mod time;

pub use time::Clock;
