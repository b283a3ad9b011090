use chrono::Duration;
use clicker_core::leveling::{LevelingRules, Stimulus, apply_stimulus};
use clicker_core::model::{Amount, DEFAULT_USERNAME, Player, PlayerId, Progression};
use clicker_core::time::fixed_now;
use storage::repository::{PlayerRepository, Storage, StorageError};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn default_player() -> Player {
    Player::new(PlayerId::DEFAULT, DEFAULT_USERNAME, fixed_now()).unwrap()
}

#[tokio::test]
async fn sqlite_roundtrip_persists_progression_and_combo_fields() {
    let repo = connect("memdb_roundtrip").await;
    let player = default_player();
    repo.insert_player(&player).await.unwrap();

    let rules = LevelingRules::default();
    let first = apply_stimulus(
        player.progression(),
        Stimulus::new(Amount::new(2.0).unwrap(), fixed_now() + Duration::seconds(1)),
        &rules,
    )
    .unwrap();
    let second = apply_stimulus(
        &first.progression,
        Stimulus::new(Amount::new(2.0).unwrap(), fixed_now() + Duration::seconds(2)),
        &rules,
    )
    .unwrap();
    repo.save_progression(player.id(), &second.progression)
        .await
        .unwrap();

    let fetched = repo
        .get_player(player.id())
        .await
        .expect("fetch")
        .expect("player exists");
    assert_eq!(fetched.username(), DEFAULT_USERNAME);
    assert_eq!(fetched.progression(), &second.progression);
    assert_eq!(fetched.progression().multiplier(), 2);
    assert_eq!(fetched.progression().time_multiplier(), 3);
}

#[tokio::test]
async fn sqlite_missing_player_is_none_and_save_is_not_found() {
    let repo = connect("memdb_missing").await;

    assert!(repo.get_player(PlayerId::new(7)).await.unwrap().is_none());

    let err = repo
        .save_progression(PlayerId::new(7), &Progression::new(fixed_now()))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_rejects_duplicate_username() {
    let repo = connect("memdb_duplicate").await;
    repo.insert_player(&default_player()).await.unwrap();

    let clash = Player::new(PlayerId::new(2), DEFAULT_USERNAME, fixed_now()).unwrap();
    let err = repo.insert_player(&clash).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_idempotent").await;
    repo.insert_player(&default_player()).await.unwrap();

    repo.migrate().await.expect("second migrate");

    let versions: Vec<i64> = sqlx::query_scalar("SELECT version FROM schema_migrations ORDER BY version")
        .fetch_all(repo.pool())
        .await
        .unwrap();
    assert_eq!(versions, vec![1, 2]);
    assert!(repo.get_player(PlayerId::DEFAULT).await.unwrap().is_some());
}

#[tokio::test]
async fn sqlite_backfills_combo_columns_for_rows_created_before_v2() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_backfill?mode=memory&cache=shared")
        .await
        .expect("connect");

    // Lay down only the v1 schema and a legacy row.
    sqlx::query(
        "CREATE TABLE schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL)",
    )
    .execute(repo.pool())
    .await
    .unwrap();
    sqlx::query(
        r"
        CREATE TABLE players (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            xp REAL NOT NULL DEFAULT 0,
            xp_required REAL NOT NULL DEFAULT 1,
            total_xp REAL NOT NULL DEFAULT 0,
            level INTEGER NOT NULL DEFAULT 1
        )
        ",
    )
    .execute(repo.pool())
    .await
    .unwrap();
    sqlx::query("INSERT INTO schema_migrations (version, applied_at) VALUES (1, '2025-01-04T19:10:25Z')")
        .execute(repo.pool())
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO players (id, username, xp, xp_required, total_xp, level) VALUES (1, 'Player', 3, 5, 9, 4)",
    )
    .execute(repo.pool())
    .await
    .unwrap();

    repo.migrate().await.expect("migrate to v2");

    let player = repo
        .get_player(PlayerId::DEFAULT)
        .await
        .unwrap()
        .expect("legacy row");
    let p = player.progression();
    assert_eq!(p.level(), 4);
    assert_eq!(p.xp(), 3.0);
    assert_eq!(p.xp_required(), 5.0);
    assert_eq!(p.total_xp(), 9.0);
    assert_eq!(p.multiplier(), 1);
    assert_eq!(p.time_multiplier(), 1);
    assert_eq!(p.last_item_clicked(), 0.0);
}

#[tokio::test]
async fn storage_sqlite_wires_player_repository() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.players.insert_player(&default_player()).await.unwrap();
    let fetched = storage.players.get_player(PlayerId::DEFAULT).await.unwrap();
    assert!(fetched.is_some());
}
