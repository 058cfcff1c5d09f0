// ABOUTME: Reminder store abstraction with pluggable key-value backends
// ABOUTME: Typed load/save of the reminder list and the settings record on top of raw JSON get/set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory store implementation
pub mod memory;
/// Sqlite store implementation
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::constants::storage_keys;
use crate::errors::AppResult;
use async_trait::async_trait;
use pierre_reminder_core::models::{Reminder, ReminderSettings};
use serde_json::Value;
use tracing::debug;

pub use memory::InMemoryReminderStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteReminderStore;

/// Durable key-value persistence for reminders and settings
///
/// Backends only implement raw `get`/`set`; the typed helpers are provided.
/// No business logic lives here.
///
/// # Examples
///
/// ```rust,no_run
/// use pierre_reminders::storage::{InMemoryReminderStore, ReminderStore};
/// # async fn example() -> Result<(), pierre_reminders::errors::AppError> {
/// let store = InMemoryReminderStore::new();
///
/// // Settings materialize with defaults on first read
/// let settings = store.load_settings().await?;
/// assert!(settings.enabled);
///
/// let reminders = store.load_reminders().await?;
/// assert!(reminders.is_empty());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Read the JSON value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend read fails
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Replace the JSON value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend write fails
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;

    /// Load every stored reminder, empty if none were ever saved
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored list is malformed
    async fn load_reminders(&self) -> AppResult<Vec<Reminder>> {
        match self.get(storage_keys::REMINDERS).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the whole reminder list
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    async fn save_reminders(&self, reminders: &[Reminder]) -> AppResult<()> {
        let value = serde_json::to_value(reminders)?;
        self.set(storage_keys::REMINDERS, value).await
    }

    /// Load the settings record, persisting defaults if it is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the read/write fails or the record is malformed
    async fn load_settings(&self) -> AppResult<ReminderSettings> {
        if let Some(value) = self.get(storage_keys::SETTINGS).await? {
            return Ok(serde_json::from_value(value)?);
        }

        debug!("No reminder settings stored, materializing defaults");
        let settings = ReminderSettings::default();
        self.save_settings(&settings).await?;
        Ok(settings)
    }

    /// Replace the settings record
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    async fn save_settings(&self, settings: &ReminderSettings) -> AppResult<()> {
        let value = serde_json::to_value(settings)?;
        self.set(storage_keys::SETTINGS, value).await
    }
}
