use std::sync::Arc;

use clicker_core::leveling::LevelingRules;
use clicker_core::model::{Amount, PlayerId};
use clicker_core::time::fixed_now;
use services::{AppServices, Clock, ProgressionServiceError};
use storage::repository::{PlayerRepository, Storage, StorageError};

#[tokio::test]
async fn sqlite_click_flow_survives_restart() {
    let db = "sqlite:file:memdb_click_flow?mode=memory&cache=shared";
    let clock = Clock::fixed(fixed_now());

    let services = AppServices::new_sqlite(db, clock, LevelingRules::basic())
        .await
        .expect("bootstrap");
    assert!(services.created_player());

    let progression = services.progression();
    progression.add_xp(Amount::new(1.0).unwrap()).await.unwrap();
    progression.add_xp_raw("5").await.unwrap();

    // A second bootstrap against the same database keeps the record.
    let restarted = AppServices::new_sqlite(db, clock, LevelingRules::basic())
        .await
        .expect("bootstrap again");
    assert!(!restarted.created_player());

    let player = restarted.progression().current().await.unwrap();
    assert_eq!(player.progression().level(), 4);
    assert_eq!(player.progression().xp_required(), 5.0);
    assert_eq!(player.progression().total_xp(), 6.0);
    // keep the first pool alive until the end so the shared memory db persists
    drop(services);
}

#[tokio::test]
async fn concurrent_clicks_are_not_lost() {
    let clock = Clock::fixed(fixed_now());
    let services = AppServices::from_storage(Storage::in_memory(), clock, LevelingRules::basic())
        .await
        .unwrap();
    let progression = services.progression();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let progression = Arc::clone(&progression);
        handles.push(tokio::spawn(async move {
            progression.add_xp(Amount::new(2.0).unwrap()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let player = progression.current().await.unwrap();
    assert_eq!(player.progression().total_xp(), 100.0);
}

struct FailingRepo;

#[async_trait::async_trait]
impl PlayerRepository for FailingRepo {
    async fn get_player(
        &self,
        _id: PlayerId,
    ) -> Result<Option<clicker_core::model::Player>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn insert_player(&self, _player: &clicker_core::model::Player) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn save_progression(
        &self,
        _id: PlayerId,
        _progression: &clicker_core::model::Progression,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test]
async fn storage_failures_surface_as_storage_errors() {
    let service = services::ProgressionService::new(
        Clock::fixed(fixed_now()),
        Arc::new(FailingRepo),
        LevelingRules::default(),
        PlayerId::DEFAULT,
    );

    let err = service.add_xp(Amount::new(1.0).unwrap()).await.unwrap_err();
    assert!(matches!(
        err,
        ProgressionServiceError::Storage(StorageError::Connection(_))
    ));

    let boot = AppServices::from_storage(
        Storage {
            players: Arc::new(FailingRepo),
        },
        Clock::fixed(fixed_now()),
        LevelingRules::default(),
    )
    .await;
    assert!(boot.is_err());
}
