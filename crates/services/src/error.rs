//! Shared error types for the services crate.

use thiserror::Error;

use clicker_core::model::{AmountError, PlayerError, ProgressionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressionServiceError {
    #[error("player record not found")]
    NotFound,
    #[error(transparent)]
    Input(#[from] AmountError),
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ProgressionServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Player(#[from] PlayerError),
}
