use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Brings the schema up to date, one recorded version at a time.
///
/// - v1: the `players` table with level/XP columns.
/// - v2: combo columns (`multiplier`, `last_item_clicked`, `time_multiplier`,
///   `last_time_clicked`), back-filled for existing rows.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: players table.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS players (
                    id INTEGER PRIMARY KEY,
                    username TEXT NOT NULL UNIQUE,
                    xp REAL NOT NULL DEFAULT 0 CHECK (xp >= 0),
                    xp_required REAL NOT NULL DEFAULT 1 CHECK (xp_required >= 1),
                    total_xp REAL NOT NULL DEFAULT 0 CHECK (total_xp >= 0),
                    level INTEGER NOT NULL DEFAULT 1 CHECK (level >= 1)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        record_version(&mut tx, 1).await?;
        tx.commit().await?;
    }

    // Version 2: combo multipliers.
    if !is_applied(pool, 2).await? {
        let mut tx = pool.begin().await?;

        for statement in [
            "ALTER TABLE players ADD COLUMN multiplier INTEGER NOT NULL DEFAULT 1 CHECK (multiplier >= 1)",
            "ALTER TABLE players ADD COLUMN last_item_clicked REAL NOT NULL DEFAULT 0",
            "ALTER TABLE players ADD COLUMN time_multiplier INTEGER NOT NULL DEFAULT 1 CHECK (time_multiplier >= 1)",
            // SQLite cannot add a column with a non-constant default.
            "ALTER TABLE players ADD COLUMN last_time_clicked TEXT",
        ] {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query(
            r"
                UPDATE players
                SET last_time_clicked = ?1
                WHERE last_time_clicked IS NULL
            ",
        )
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        record_version(&mut tx, 2).await?;
        tx.commit().await?;
    }

    Ok(())
}

async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
        .bind(version)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

async fn record_version(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    version: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
            INSERT INTO schema_migrations (version, applied_at)
            VALUES (?1, ?2)
            ON CONFLICT(version) DO NOTHING
        ",
    )
    .bind(version)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;
    Ok(())
}
