// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for pierre-reminders
// ABOUTME: Provides consistent text rendering for reminders, settings, and reschedule summaries

use chrono::NaiveDateTime;
use pierre_reminders::{
    formatters::{describe_schedule, next_fire_time},
    lifecycle::RescheduleSummary,
    models::{Reminder, ReminderSettings},
    scheduling::TriggerCalculator,
};

/// One reminder as a single line
pub fn reminder_line(
    calculator: &TriggerCalculator,
    reminder: &Reminder,
    settings: &ReminderSettings,
    now: NaiveDateTime,
) -> String {
    let status = if reminder.is_active { "on " } else { "off" };
    let next = next_fire_time(calculator, reminder, settings, now).map_or_else(
        || "-".to_owned(),
        |at| at.format("%a %Y-%m-%d %H:%M").to_string(),
    );
    format!(
        "[{status}] {}  {}  ({})  next: {next}",
        reminder.id,
        reminder.workout_name,
        describe_schedule(reminder)
    )
}

/// Reminder list with a header
pub fn reminder_table(
    calculator: &TriggerCalculator,
    reminders: &[Reminder],
    settings: &ReminderSettings,
    now: NaiveDateTime,
) -> String {
    if reminders.is_empty() {
        return "No reminders".to_owned();
    }
    let mut lines = vec![format!("{} reminder(s)", reminders.len())];
    if !settings.enabled {
        lines.push("Reminders are muted".to_owned());
    }
    lines.extend(
        reminders
            .iter()
            .map(|reminder| reminder_line(calculator, reminder, settings, now)),
    );
    lines.join("\n")
}

/// Settings as aligned lines
pub fn settings_text(settings: &ReminderSettings) -> String {
    [
        format!("Enabled:         {}", settings.enabled),
        format!("Sound:           {}", settings.sound_enabled),
        format!("Vibration:       {}", settings.vibration_enabled),
        format!("Minutes before:  {}", settings.reminder_minutes_before),
    ]
    .join("\n")
}

/// Reschedule tally
pub fn summary_text(summary: &RescheduleSummary) -> String {
    let mut text = format!(
        "Scheduled {}, skipped {}, failed {}",
        summary.scheduled,
        summary.skipped,
        summary.failed.len()
    );
    for id in &summary.failed {
        text.push_str("\n  failed: ");
        text.push_str(id);
    }
    text
}
