// ABOUTME: Human-readable formatting of reminder schedules and next firing times
// ABOUTME: Day-set summaries, HH:MM times, schedule descriptions, and CLI output format selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Reminder Display Formatting
//!
//! Pure helpers used by list views and the CLI. Recognized day sets collapse
//! to a phrase ("Every day", "Weekdays", "Weekends"); anything else is listed
//! with short names in week order.

/// Output format selection for the CLI
pub mod output;

pub use output::{format_output, OutputFormat};

use crate::scheduling::{Trigger, TriggerCalculator};
use chrono::{NaiveDateTime, NaiveTime};
use pierre_reminder_core::models::{hhmm, DayOfWeek, Reminder, ReminderSettings, ReminderType};

/// Summarize a set of weekdays
#[must_use]
pub fn format_days(days: &[DayOfWeek]) -> String {
    let mut sorted = days.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let weekdays = sorted.iter().all(|day| day.is_weekday());
    match sorted.len() {
        0 => "No days".to_owned(),
        7 => "Every day".to_owned(),
        5 if weekdays => "Weekdays".to_owned(),
        2 if sorted.iter().all(|day| !day.is_weekday()) => "Weekends".to_owned(),
        _ => sorted
            .iter()
            .map(|day| day.short_name())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// 24-hour `HH:MM`
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(hhmm::FORMAT).to_string()
}

/// One-line description of when a reminder fires
#[must_use]
pub fn describe_schedule(reminder: &Reminder) -> String {
    let time = format_time(reminder.scheduled_time);
    match (reminder.reminder_type, reminder.scheduled_date) {
        (ReminderType::Recurring, _) => format!("{} at {time}", format_days(&reminder.days)),
        (ReminderType::OneTime, Some(date)) => {
            format!("Once on {} at {time}", date.format("%Y-%m-%d"))
        }
        (ReminderType::OneTime, None) => format!("Once at {time}"),
    }
}

/// Next instant the reminder's notification will fire
///
/// `None` when the reminder is inactive, reminders are disabled globally, or a
/// one-time instant is too close to `now` for `calculator` to schedule it.
#[must_use]
pub fn next_fire_time(
    calculator: &TriggerCalculator,
    reminder: &Reminder,
    settings: &ReminderSettings,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    if !reminder.is_active || !settings.enabled {
        return None;
    }

    calculator
        .plan(reminder, settings, now)
        .triggers()
        .iter()
        .filter_map(|trigger| match trigger {
            Trigger::Weekly(weekly) => weekly.next_after(now),
            Trigger::Instant(instant) => Some(instant.fire_at),
        })
        .min()
}
