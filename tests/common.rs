// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, fixed clocks, manager harnesses, and a failing store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_reminders`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pierre_reminders::{
    config::SchedulerConfig,
    constants::storage_keys,
    errors::{AppError, AppResult},
    lifecycle::ReminderManager,
    models::ReminderSettings,
    notifications::InMemoryDispatcher,
    scheduling::FixedClock,
    storage::{InMemoryReminderStore, ReminderStore},
};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use tokio::sync::Notify;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// `HH:MM` as a `NaiveTime`
pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Calendar date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Monday 2025-03-10 at noon
pub fn monday_noon() -> NaiveDateTime {
    date(2025, 3, 10).and_time(at(12, 0))
}

/// Manager wired to in-memory collaborators that stay inspectable
pub struct TestHarness {
    pub manager: Arc<ReminderManager>,
    pub store: InMemoryReminderStore,
    pub dispatcher: InMemoryDispatcher,
}

/// Harness whose clock is frozen at `now`
pub fn harness_at(now: NaiveDateTime) -> TestHarness {
    init_test_logging();
    let store = InMemoryReminderStore::new();
    let dispatcher = InMemoryDispatcher::default();
    let manager = ReminderManager::new(
        Arc::new(store.clone()),
        Arc::new(dispatcher.clone()),
        &SchedulerConfig::default(),
    )
    .with_clock(Arc::new(FixedClock(now)));

    TestHarness {
        manager: Arc::new(manager),
        store,
        dispatcher,
    }
}

/// Harness frozen at [`monday_noon`]
pub fn harness() -> TestHarness {
    harness_at(monday_noon())
}

/// Save settings with a lead time, leaving everything else at defaults
pub async fn with_minutes_before(harness: &TestHarness, minutes: u32) -> AppResult<()> {
    harness
        .manager
        .save_settings(ReminderSettings {
            reminder_minutes_before: minutes,
            ..ReminderSettings::default()
        })
        .await
        .map(|_| ())
}

/// Store wrapper whose writes can be made to fail
#[derive(Clone, Default)]
pub struct FailingStore {
    inner: InMemoryReminderStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FailingStore {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReminderStore for FailingStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("read of {key} failed")));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("write of {key} failed")));
        }
        self.inner.set(key, value).await
    }
}

/// Store that can hold the next reminder-list read until released
#[derive(Clone, Default)]
pub struct GatedStore {
    inner: InMemoryReminderStore,
    armed: Arc<AtomicBool>,
    reached: Arc<Notify>,
    release: Arc<Notify>,
}

impl GatedStore {
    /// Pause the next read of the reminder list
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Wait until a reader is parked at the gate
    pub async fn wait_reached(&self) {
        self.reached.notified().await;
    }

    /// Let the parked reader continue
    pub fn open(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ReminderStore for GatedStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        if key == storage_keys::REMINDERS && self.armed.swap(false, Ordering::SeqCst) {
            self.reached.notify_one();
            self.release.notified().await;
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        self.inner.set(key, value).await
    }
}
