// ABOUTME: Constants for reminder storage keys, trigger buffers, and notification defaults
// ABOUTME: Shared by the trigger calculator, the lifecycle manager, and the stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Storage keys for the reminder store
pub mod storage_keys {
    /// Key holding the full reminder list
    pub const REMINDERS: &str = "workout_reminders";

    /// Key holding the singleton settings record
    pub const SETTINGS: &str = "reminder_settings";
}

/// Trigger computation constants
pub mod scheduling {
    /// One-time triggers closer than this to "now" are not scheduled
    pub const NEAR_TERM_BUFFER_SECS: u64 = 10;

    /// Minutes in a day, used to normalize lead-time arithmetic
    pub const MINUTES_PER_DAY: i64 = 24 * 60;
}

/// Notification payload defaults
pub mod notification {
    /// Title shown on every workout reminder
    pub const DEFAULT_TITLE: &str = "Workout Reminder";

    /// Payload `type` tag identifying notifications owned by this engine
    pub const WORKOUT_REMINDER_KIND: &str = "workout_reminder";

    /// Default capacity of the notification event channel
    pub const DEFAULT_EVENT_BUFFER: usize = 64;

    /// Build the notification body for a workout label
    #[must_use]
    pub fn body_for(workout_name: &str) -> String {
        format!("Time for your {workout_name} workout!")
    }
}

/// Settings defaults applied when the settings record is absent
pub mod settings_defaults {
    /// Reminders are globally enabled
    pub const ENABLED: bool = true;

    /// Notification sound on
    pub const SOUND_ENABLED: bool = true;

    /// Notification vibration on
    pub const VIBRATION_ENABLED: bool = true;

    /// No lead time
    pub const REMINDER_MINUTES_BEFORE: u32 = 0;
}
