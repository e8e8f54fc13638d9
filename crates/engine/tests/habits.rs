use chrono::{Local, NaiveDate};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Channel, CreateEntryCmd, CreateHabitCmd, Engine, EngineError, Recurrence, RegisterCmd,
    UpdateEntryCmd, UpdateHabitCmd,
};
use migration::MigratorTrait;
use uuid::Uuid;

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
async fn create_habit_round_trips() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let habit = engine
        .create_habit(
            CreateHabitCmd::new(user.id, "  Meditate  ", "Weekly")
                .allow_text(true)
                .allow_picture(true),
        )
        .await
        .unwrap();
    assert_eq!(habit.name, "Meditate");
    assert_eq!(habit.recurrence, Recurrence::Weekly);
    assert_eq!(habit.custom_interval_days, None);
    assert!(habit.allow_text);
    assert!(!habit.require_text);

    let fetched = engine.habit(habit.id, user.id).await.unwrap();
    assert_eq!(fetched.id, habit.id);
    assert_eq!(fetched.name, "Meditate");
    assert_eq!(fetched.recurrence, Recurrence::Weekly);
    assert!(fetched.allow_picture);
    assert!(!fetched.allow_voice_memo);
}

#[tokio::test]
async fn custom_recurrence_keeps_interval_across_updates() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let habit = engine
        .create_habit(CreateHabitCmd::new(user.id, "Stretch", "custom").custom_interval_days(3))
        .await
        .unwrap();
    assert_eq!(habit.custom_interval_days, Some(3));

    // Renaming must not disturb the recurrence configuration.
    let habit = engine
        .update_habit(UpdateHabitCmd::new(habit.id, user.id).name("Stretch more"))
        .await
        .unwrap();
    assert_eq!(habit.name, "Stretch more");
    assert_eq!(habit.recurrence, Recurrence::Custom);
    assert_eq!(habit.custom_interval_days, Some(3));

    // Leaving the custom cadence clears the interval.
    let habit = engine
        .update_habit(UpdateHabitCmd::new(habit.id, user.id).recurrence("daily"))
        .await
        .unwrap();
    assert_eq!(habit.recurrence, Recurrence::Daily);
    assert_eq!(habit.custom_interval_days, None);

    // Coming back requires an interval again.
    let err = engine
        .update_habit(UpdateHabitCmd::new(habit.id, user.id).recurrence("custom"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::MissingField("customIntervalDays"));
}

#[tokio::test]
async fn habits_are_scoped_to_their_owner() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let bob = register(&engine, "bob@example.com").await;

    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(alice.id, "Journal"))
        .await
        .unwrap();

    assert!(engine.habits(bob.id).await.unwrap().is_empty());

    let err = engine.habit(habit.id, bob.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("habit"));

    let err = engine
        .update_habit(UpdateHabitCmd::new(habit.id, bob.id).name("Mine now"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("habit"));

    let err = engine.delete_habit(habit.id, bob.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("habit"));

    // Alice still sees her habit untouched.
    let habit = engine.habit(habit.id, alice.id).await.unwrap();
    assert_eq!(habit.name, "Journal");
}

#[tokio::test]
async fn unknown_habit_id_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let err = engine.habit(Uuid::new_v4(), user.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("habit"));
}

#[tokio::test]
async fn entry_defaults_to_today() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;
    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(user.id, "Journal"))
        .await
        .unwrap();

    let entry = engine
        .create_entry(CreateEntryCmd::new(habit.id, user.id).text_content("Wrote a page"))
        .await
        .unwrap();
    assert_eq!(entry.entry_date, Local::now().date_naive());
    assert_eq!(entry.text_content.as_deref(), Some("Wrote a page"));
}

#[tokio::test]
async fn rfc3339_entry_dates_reduce_to_their_utc_day() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;
    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(user.id, "Journal"))
        .await
        .unwrap();

    let entry = engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-03-05T23:30:00+02:00")
                .text_content("Late evening"),
        )
        .await
        .unwrap();
    assert_eq!(entry.entry_date, date(2026, 3, 5));

    // 01:30 at +05:00 is still the previous day in UTC.
    let entry = engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-03-05T01:30:00+05:00")
                .text_content("Early morning"),
        )
        .await
        .unwrap();
    assert_eq!(entry.entry_date, date(2026, 3, 4));
}

#[tokio::test]
async fn one_entry_per_habit_and_day() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;
    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(user.id, "Journal"))
        .await
        .unwrap();

    engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-01-01")
                .text_content("First"),
        )
        .await
        .unwrap();

    let err = engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-01-01")
                .text_content("Second"),
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateEntryDate);

    // Moving an entry onto an occupied date hits the same rule.
    let second = engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-01-02")
                .text_content("Second"),
        )
        .await
        .unwrap();
    let err = engine
        .update_entry(UpdateEntryCmd::new(habit.id, second.id, user.id).entry_date("2026-01-01"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateEntryDate);
}

#[tokio::test]
async fn channel_rules_apply_to_entries() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    // Text is required, nothing else is allowed.
    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(user.id, "Journal"))
        .await
        .unwrap();

    let err = engine
        .create_entry(CreateEntryCmd::new(habit.id, user.id).entry_date("2026-01-01"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ContentRequired(Channel::Text));

    let err = engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-01-01")
                .text_content("Ok")
                .picture_url("https://example.com/p.jpg"),
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ContentNotAllowed(Channel::Picture));
}

#[tokio::test]
async fn blank_update_clears_optional_content() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;
    let habit = engine
        .create_habit(CreateHabitCmd::new(user.id, "Walk", "daily").allow_text(true))
        .await
        .unwrap();

    let entry = engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-01-01")
                .text_content("5km in the rain"),
        )
        .await
        .unwrap();

    // Untouched fields keep their value.
    let entry = engine
        .update_entry(UpdateEntryCmd::new(habit.id, entry.id, user.id).entry_date("2026-01-02"))
        .await
        .unwrap();
    assert_eq!(entry.entry_date, date(2026, 1, 2));
    assert_eq!(entry.text_content.as_deref(), Some("5km in the rain"));

    // A blank value clears the channel.
    let entry = engine
        .update_entry(UpdateEntryCmd::new(habit.id, entry.id, user.id).text_content("   "))
        .await
        .unwrap();
    assert_eq!(entry.text_content, None);
}

#[tokio::test]
async fn entries_list_newest_date_first() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;
    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(user.id, "Journal"))
        .await
        .unwrap();

    for day in ["2026-01-01", "2026-01-03", "2026-01-02"] {
        engine
            .create_entry(
                CreateEntryCmd::new(habit.id, user.id)
                    .entry_date(day)
                    .text_content("Done"),
            )
            .await
            .unwrap();
    }

    let entries = engine.entries(habit.id, user.id).await.unwrap();
    let dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.entry_date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 1, 3), date(2026, 1, 2), date(2026, 1, 1)]
    );
}

#[tokio::test]
async fn deleting_a_habit_removes_its_entries() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();
    let user = register(&engine, "alice@example.com").await;
    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(user.id, "Journal"))
        .await
        .unwrap();

    for day in ["2026-01-01", "2026-01-02"] {
        engine
            .create_entry(
                CreateEntryCmd::new(habit.id, user.id)
                    .entry_date(day)
                    .text_content("Done"),
            )
            .await
            .unwrap();
    }

    engine.delete_habit(habit.id, user.id).await.unwrap();

    assert!(engine.habits(user.id).await.unwrap().is_empty());
    let err = engine.entries(habit.id, user.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("habit"));

    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM habit_entries;",
        ))
        .await
        .unwrap()
        .unwrap();
    let remaining: i64 = row.try_get("", "n").unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn restart_engine_reads_same_state() {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();
    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    let user = register(&engine, "alice@example.com").await;
    let habit = engine
        .create_habit(CreateHabitCmd::simple_daily_text(user.id, "Journal"))
        .await
        .unwrap();
    engine
        .create_entry(
            CreateEntryCmd::new(habit.id, user.id)
                .entry_date("2026-01-01")
                .text_content("Kept"),
        )
        .await
        .unwrap();

    drop(engine);
    drop(db);

    let db2 = Database::connect(&url).await.unwrap();
    let engine2 = Engine::builder()
        .database(db2.clone())
        .build()
        .await
        .unwrap();

    let habits = engine2.habits(user.id).await.unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].name, "Journal");

    let entries = engine2.entries(habit.id, user.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_date, date(2026, 1, 1));
    assert_eq!(entries[0].text_content.as_deref(), Some("Kept"));

    drop(db2);
    let _ = std::fs::remove_file(path);
}
