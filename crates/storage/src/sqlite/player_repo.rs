use async_trait::async_trait;

use crate::repository::{PlayerRepository, StorageError};
use clicker_core::model::{Player, PlayerId, Progression};

use super::SqliteRepository;
use super::mapping::{map_player_row, player_id_to_i64};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

#[async_trait]
impl PlayerRepository for SqliteRepository {
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                id,
                username,
                xp,
                xp_required,
                total_xp,
                level,
                multiplier,
                last_item_clicked,
                time_multiplier,
                last_time_clicked
            FROM players
            WHERE id = ?1
            ",
        )
        .bind(player_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_player_row).transpose()
    }

    async fn insert_player(&self, player: &Player) -> Result<(), StorageError> {
        let p = player.progression();
        sqlx::query(
            r"
            INSERT INTO players (
                id,
                username,
                xp,
                xp_required,
                total_xp,
                level,
                multiplier,
                last_item_clicked,
                time_multiplier,
                last_time_clicked
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(player_id_to_i64(player.id())?)
        .bind(player.username())
        .bind(p.xp())
        .bind(p.xp_required())
        .bind(p.total_xp())
        .bind(i64::from(p.level()))
        .bind(i64::from(p.multiplier()))
        .bind(p.last_item_clicked())
        .bind(i64::from(p.time_multiplier()))
        .bind(p.last_time_clicked())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StorageError::Conflict
            } else {
                StorageError::Connection(err.to_string())
            }
        })?;

        Ok(())
    }

    async fn save_progression(
        &self,
        id: PlayerId,
        progression: &Progression,
    ) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            UPDATE players SET
                xp = ?2,
                xp_required = ?3,
                total_xp = ?4,
                level = ?5,
                multiplier = ?6,
                last_item_clicked = ?7,
                time_multiplier = ?8,
                last_time_clicked = ?9
            WHERE id = ?1
            ",
        )
        .bind(player_id_to_i64(id)?)
        .bind(progression.xp())
        .bind(progression.xp_required())
        .bind(progression.total_xp())
        .bind(i64::from(progression.level()))
        .bind(i64::from(progression.multiplier()))
        .bind(progression.last_item_clicked())
        .bind(i64::from(progression.time_multiplier()))
        .bind(progression.last_time_clicked())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
