use chrono::{Local, NaiveDate};
use sea_orm::{Database, DatabaseConnection};

use engine::{CreateDiaryEntryCmd, Engine, EngineError, RegisterCmd, UpdateDiaryEntryCmd};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn register(engine: &Engine, email: &str) -> engine::User {
    engine
        .register(RegisterCmd::new(email, "Alice", "correct horse"))
        .await
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn diary_entry_round_trips_with_default_date() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let entry = engine
        .create_diary_entry(CreateDiaryEntryCmd::new(user.id, "  Slept well.  "))
        .await
        .unwrap();
    assert_eq!(entry.content, "Slept well.");
    assert_eq!(entry.entry_date, Local::now().date_naive());

    let fetched = engine.diary_entry(entry.id, user.id).await.unwrap();
    assert_eq!(fetched.content, "Slept well.");
    assert_eq!(fetched.entry_date, entry.entry_date);
}

#[tokio::test]
async fn one_diary_entry_per_day() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    engine
        .create_diary_entry(CreateDiaryEntryCmd::new(user.id, "First").entry_date("2026-01-01"))
        .await
        .unwrap();

    let err = engine
        .create_diary_entry(CreateDiaryEntryCmd::new(user.id, "Second").entry_date("2026-01-01"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateEntryDate);

    // Different users can write on the same day.
    let bob = register(&engine, "bob@example.com").await;
    engine
        .create_diary_entry(CreateDiaryEntryCmd::new(bob.id, "Bob's day").entry_date("2026-01-01"))
        .await
        .unwrap();
}

#[tokio::test]
async fn blank_content_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let err = engine
        .create_diary_entry(CreateDiaryEntryCmd::new(user.id, "   "))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidField {
            field: "content",
            reason: "must not be empty".to_string(),
        }
    );
}

#[tokio::test]
async fn update_merges_content_and_date() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let entry = engine
        .create_diary_entry(CreateDiaryEntryCmd::new(user.id, "Draft").entry_date("2026-01-01"))
        .await
        .unwrap();

    let entry = engine
        .update_diary_entry(UpdateDiaryEntryCmd::new(entry.id, user.id).content("Final"))
        .await
        .unwrap();
    assert_eq!(entry.content, "Final");
    assert_eq!(entry.entry_date, date(2026, 1, 1));

    let entry = engine
        .update_diary_entry(UpdateDiaryEntryCmd::new(entry.id, user.id).entry_date("2026-01-02"))
        .await
        .unwrap();
    assert_eq!(entry.content, "Final");
    assert_eq!(entry.entry_date, date(2026, 1, 2));

    // Moving onto a day that already has an entry is a conflict.
    let other = engine
        .create_diary_entry(CreateDiaryEntryCmd::new(user.id, "Other").entry_date("2026-01-03"))
        .await
        .unwrap();
    let err = engine
        .update_diary_entry(UpdateDiaryEntryCmd::new(other.id, user.id).entry_date("2026-01-02"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateEntryDate);
}

#[tokio::test]
async fn diary_is_scoped_to_its_owner() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let bob = register(&engine, "bob@example.com").await;

    let entry = engine
        .create_diary_entry(CreateDiaryEntryCmd::new(alice.id, "Private").entry_date("2026-01-01"))
        .await
        .unwrap();

    assert!(engine.diary_entries(bob.id).await.unwrap().is_empty());

    let err = engine.diary_entry(entry.id, bob.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("diary entry"));

    let err = engine.delete_diary_entry(entry.id, bob.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("diary entry"));
}

#[tokio::test]
async fn diary_lists_newest_date_first_and_deletes() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    for day in ["2026-01-01", "2026-01-03", "2026-01-02"] {
        engine
            .create_diary_entry(CreateDiaryEntryCmd::new(user.id, "Entry").entry_date(day))
            .await
            .unwrap();
    }

    let entries = engine.diary_entries(user.id).await.unwrap();
    let dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.entry_date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 1, 3), date(2026, 1, 2), date(2026, 1, 1)]
    );

    engine
        .delete_diary_entry(entries[0].id, user.id)
        .await
        .unwrap();
    assert_eq!(engine.diary_entries(user.id).await.unwrap().len(), 2);
}
