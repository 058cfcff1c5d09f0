// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Argument parsing helpers for pierre-reminders
// ABOUTME: Turns day lists, dates, and update flags into reminder model values

use chrono::NaiveDate;
use pierre_reminders::{
    errors::{AppError, AppResult},
    models::{parse_scheduled_time, DayOfWeek, ReminderType, ReminderUpdate},
};

/// Parse "mon,wed,fri" (full or short names, any case)
pub fn parse_days(raw: &str) -> AppResult<Vec<DayOfWeek>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        AppError::invalid_input(format!("Invalid date '{raw}', expected YYYY-MM-DD: {e}"))
    })
}

/// Build a partial update from `update` subcommand flags
pub fn build_update(
    name: Option<String>,
    time: Option<String>,
    days: Option<String>,
    once: bool,
    date: Option<String>,
) -> AppResult<ReminderUpdate> {
    let days = days.as_deref().map(parse_days).transpose()?;
    let reminder_type = if once {
        Some(ReminderType::OneTime)
    } else if days.is_some() {
        Some(ReminderType::Recurring)
    } else {
        None
    };

    Ok(ReminderUpdate {
        workout_name: name,
        scheduled_time: time.as_deref().map(parse_scheduled_time).transpose()?,
        days,
        reminder_type,
        scheduled_date: date.as_deref().map(parse_date).transpose()?,
        is_active: None,
    })
}
