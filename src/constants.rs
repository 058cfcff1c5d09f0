// ABOUTME: Application constants for the reminder engine binaries and configuration
// ABOUTME: Re-exports core scheduling constants and defines environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_reminder_core::constants::{
    notification, scheduling, settings_defaults, storage_keys,
};

/// Service names used in structured logs
pub mod service_names {
    /// Reminder engine service name
    pub const PIERRE_REMINDERS: &str = "pierre-reminders";
}

/// Environment variable names read by `ReminderConfig::from_env`
pub mod env_config {
    /// Sqlite database URL for the reminder store
    pub const DATABASE_URL: &str = "REMINDER_DATABASE_URL";

    /// Near-term guard for one-time triggers, in seconds
    pub const NEAR_TERM_BUFFER_SECS: &str = "REMINDER_NEAR_TERM_BUFFER_SECS";

    /// Notification title override
    pub const NOTIFICATION_TITLE: &str = "REMINDER_NOTIFICATION_TITLE";

    /// Notification event channel capacity
    pub const EVENT_BUFFER: &str = "REMINDER_EVENT_BUFFER";

    /// Name of the active workout plan
    pub const PLAN_NAME: &str = "REMINDER_PLAN_NAME";

    /// Comma-separated workout labels offered when adding a reminder
    pub const WORKOUT_TYPES: &str = "REMINDER_WORKOUT_TYPES";
}

/// Configuration defaults
pub mod defaults {
    /// Default on-device database location
    pub const DATABASE_URL: &str = "sqlite:./data/reminders.db";

    /// User id of the single on-device user
    pub const LOCAL_USER_ID: &str = "local";
}
