// ABOUTME: Main library entry point for the Pierre workout reminder engine
// ABOUTME: Schedules local workout notifications from user-declared reminders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Reminders
//!
//! Turns user-declared workout reminders into platform-scheduled local
//! notifications and keeps the two in sync.
//!
//! ## Features
//!
//! - **Recurring and one-time reminders**: weekly triggers per selected day, or a single instant
//! - **Lead time**: notify N minutes early, wrapping across midnight and weekdays
//! - **Missed-time rollover**: one-time reminders in the past move to tomorrow
//! - **Master switch**: mute every trigger without losing reminder intent
//! - **Self-expiry**: one-time reminders delete themselves once delivered or tapped
//!
//! ## Architecture
//!
//! - **Storage**: key/value persistence of the reminder list and settings
//! - **Scheduling**: pure trigger calculator evaluated against a clock
//! - **Notifications**: dispatcher capability over the platform scheduler
//! - **Lifecycle**: CRUD and bulk operations keeping triggers and records in sync
//! - **Reconciler**: consumes delivered/tapped events and retires one-time reminders
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::NaiveTime;
//! use pierre_reminders::config::ReminderConfig;
//! use pierre_reminders::errors::AppResult;
//! use pierre_reminders::lifecycle::ReminderManager;
//! use pierre_reminders::models::{DayOfWeek, NewReminder};
//! use pierre_reminders::notifications::InMemoryDispatcher;
//! use pierre_reminders::storage::SqliteReminderStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ReminderConfig::from_env()?;
//!     let store = Arc::new(SqliteReminderStore::connect(&config.database_url).await?);
//!     let dispatcher = Arc::new(InMemoryDispatcher::new(config.event_buffer));
//!     let manager = ReminderManager::new(store, dispatcher, &config.scheduler);
//!
//!     let time = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default();
//!     let request = NewReminder::recurring("Leg Day", time, [DayOfWeek::Monday]);
//!     let reminder = manager.create(request).await?;
//!     println!("Scheduled {} with {} trigger(s)", reminder.id, reminder.notification_ids.len());
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants and environment variable names
pub mod constants;

/// Unified error handling with standard error codes
pub mod errors;

/// Display formatting for reminder schedules
pub mod formatters;

/// Reminder lifecycle manager
pub mod lifecycle;

/// Production logging and structured output
pub mod logging;

/// Notification dispatcher capability and in-memory implementation
pub mod notifications;

/// Workout plan sources for reminder labels
pub mod plans;

/// Fired-event reconciler for self-expiring reminders
pub mod reconciler;

/// Trigger calculation and clock abstraction
pub mod scheduling;

/// Key/value reminder persistence
pub mod storage;

/// Reminder and settings data models
pub use pierre_reminder_core::models;
