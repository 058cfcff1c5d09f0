// ABOUTME: Sqlite-backed reminder store using a single key/value table
// ABOUTME: Persists the reminder list and settings record as JSON text across restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ReminderStore;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::info;

/// Sqlite key/value store
///
/// Pool is capped at one connection so `sqlite::memory:` URLs see a single
/// database.
#[derive(Clone)]
pub struct SqliteReminderStore {
    pool: SqlitePool,
}

impl SqliteReminderStore {
    /// Connect to (creating if needed) the database at `database_url`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the URL is invalid, the connection fails,
    /// or the schema cannot be created
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL '{database_url}': {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        info!("Reminder store initialized at {database_url}");
        Ok(store)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS reminder_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ReminderStore for SqliteReminderStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM reminder_store
            WHERE key = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::storage(format!("Failed to read '{key}': {e}")))?;

        row.map_or(Ok(None), |row| {
            let raw: String = row.get("value");
            Ok(Some(serde_json::from_str(&raw)?))
        })
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let now = Utc::now().to_rfc3339();
        let raw = serde_json::to_string(&value)?;

        sqlx::query(
            r"
            INSERT INTO reminder_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = ?3
            ",
        )
        .bind(key)
        .bind(&raw)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write '{key}': {e}")))?;

        Ok(())
    }
}
