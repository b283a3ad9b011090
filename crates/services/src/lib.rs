#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progression_service;

pub use clicker_core::Clock;

pub use app_services::{AppServices, ensure_default_player};
pub use error::{AppServicesError, ProgressionServiceError};
pub use progression_service::{ClickReport, ProgressionService};
