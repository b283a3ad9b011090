use chrono::{DateTime, Utc};
use clicker_core::model::{Player, PlayerId, Progression, ProgressionDraft};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn player_id_from_i64(v: i64) -> Result<PlayerId, StorageError> {
    u64::try_from(v)
        .map(PlayerId::new)
        .map_err(|_| StorageError::Serialization("player_id sign overflow".into()))
}

pub(crate) fn player_id_to_i64(id: PlayerId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("player_id overflow".into()))
}

fn u32_column(row: &sqlx::sqlite::SqliteRow, field: &'static str) -> Result<u32, StorageError> {
    let raw: i64 = row.try_get(field).map_err(ser)?;
    u32::try_from(raw).map_err(|_| StorageError::Serialization(format!("invalid {field}: {raw}")))
}

pub(crate) fn map_player_row(row: &sqlx::sqlite::SqliteRow) -> Result<Player, StorageError> {
    let last_time_clicked: Option<DateTime<Utc>> =
        row.try_get("last_time_clicked").map_err(ser)?;

    let progression = Progression::from_persisted(ProgressionDraft {
        xp: row.try_get("xp").map_err(ser)?,
        xp_required: row.try_get("xp_required").map_err(ser)?,
        total_xp: row.try_get("total_xp").map_err(ser)?,
        level: u32_column(row, "level")?,
        multiplier: u32_column(row, "multiplier")?,
        last_item_clicked: row.try_get("last_item_clicked").map_err(ser)?,
        time_multiplier: u32_column(row, "time_multiplier")?,
        last_time_clicked: last_time_clicked.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    })
    .map_err(ser)?;

    Player::from_persisted(
        player_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("username").map_err(ser)?,
        progression,
    )
    .map_err(ser)
}
