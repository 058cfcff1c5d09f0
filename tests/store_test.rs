// ABOUTME: Integration tests for reminder store backends
// ABOUTME: Exercises the in-memory and file-backed sqlite stores through the same typed helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{at, date, init_test_logging};
use pierre_reminders::{
    constants::storage_keys,
    errors::ErrorCode,
    models::{DayOfWeek, NewReminder, Reminder, ReminderSettings},
    storage::{InMemoryReminderStore, ReminderStore},
};
use serde_json::json;

#[cfg(feature = "sqlite")]
use pierre_reminders::storage::SqliteReminderStore;
#[cfg(feature = "sqlite")]
use tempfile::TempDir;

fn sample_reminders() -> Vec<Reminder> {
    let today = date(2025, 3, 10);
    vec![
        Reminder::create(
            NewReminder::recurring("Push Day", at(18, 0), [DayOfWeek::Monday, DayOfWeek::Friday]),
            today,
        )
        .unwrap(),
        Reminder::create(NewReminder::one_time("Long Run", at(7, 30), None), today).unwrap(),
    ]
}

async fn exercise_store(store: &dyn ReminderStore) -> Result<()> {
    assert!(store.load_reminders().await?.is_empty());
    assert_eq!(store.load_settings().await?, ReminderSettings::default());

    let reminders = sample_reminders();
    store.save_reminders(&reminders).await?;
    assert_eq!(store.load_reminders().await?, reminders);

    let settings = ReminderSettings {
        enabled: false,
        sound_enabled: false,
        vibration_enabled: true,
        reminder_minutes_before: 45,
    };
    store.save_settings(&settings).await?;
    assert_eq!(store.load_settings().await?, settings);

    store.save_reminders(&reminders[1..]).await?;
    assert_eq!(store.load_reminders().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_memory_store_typed_round_trip() -> Result<()> {
    init_test_logging();
    exercise_store(&InMemoryReminderStore::new()).await
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_store_typed_round_trip() -> Result<()> {
    init_test_logging();
    let store = SqliteReminderStore::connect("sqlite::memory:").await?;
    exercise_store(&store).await
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_store_survives_reconnect() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.path().join("reminders.db").display());

    let reminders = sample_reminders();
    {
        let store = SqliteReminderStore::connect(&url).await?;
        store.save_reminders(&reminders).await?;
    }

    let reopened = SqliteReminderStore::connect(&url).await?;
    assert_eq!(reopened.load_reminders().await?, reminders);
    Ok(())
}

#[tokio::test]
async fn test_stored_records_use_camel_case_keys() -> Result<()> {
    let store = InMemoryReminderStore::new();
    store.save_reminders(&sample_reminders()).await?;

    let raw = store.get(storage_keys::REMINDERS).await?.unwrap();
    let first = &raw[0];
    assert_eq!(first["workoutName"], json!("Push Day"));
    assert_eq!(first["scheduledTime"], json!("18:00"));
    assert_eq!(first["type"], json!("recurring"));
    assert_eq!(first["days"], json!(["monday", "friday"]));
    assert_eq!(raw[1]["type"], json!("one-time"));
    assert_eq!(raw[1]["scheduledDate"], json!("2025-03-10"));
    Ok(())
}

#[tokio::test]
async fn test_partial_settings_record_fills_defaults() -> Result<()> {
    let store = InMemoryReminderStore::new();
    store
        .set(storage_keys::SETTINGS, json!({ "reminderMinutesBefore": 10 }))
        .await?;

    let settings = store.load_settings().await?;
    assert_eq!(settings.reminder_minutes_before, 10);
    assert!(settings.enabled);
    assert!(settings.sound_enabled);
    Ok(())
}

#[tokio::test]
async fn test_malformed_reminder_list_is_a_serialization_error() -> Result<()> {
    let store = InMemoryReminderStore::new();
    store
        .set(storage_keys::REMINDERS, json!([{ "id": 1 }]))
        .await?;

    let error = store.load_reminders().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
    Ok(())
}
