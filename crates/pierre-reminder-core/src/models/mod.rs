// ABOUTME: Core data models for workout reminder scheduling
// ABOUTME: Re-exports Reminder, ReminderSettings, DayOfWeek and related request types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Reminder`: one stored reminder, recurring weekly or one-time
//! - `NewReminder` / `ReminderUpdate`: creation and partial-update requests
//! - `ReminderSettings`: the singleton settings record
//! - `DayOfWeek`: the single weekday table used for triggers and display

mod day;
mod reminder;
mod settings;

pub use day::DayOfWeek;
pub use reminder::{
    hhmm, parse_scheduled_time, NewReminder, NotificationHandle, Reminder, ReminderType,
    ReminderUpdate,
};
pub use settings::ReminderSettings;
