// ABOUTME: Reminder commands for pierre-reminders
// ABOUTME: Handles list, add, update, toggle, delete, reschedule, mute, and preview
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_reminders::{
    errors::{AppError, AppResult},
    formatters::{describe_schedule, format_output, next_fire_time, OutputFormat},
    lifecycle::ReminderManager,
    models::{parse_scheduled_time, NewReminder, Reminder, ReminderUpdate},
    scheduling::{Trigger, TriggerPlan},
};
use serde::Serialize;
use tracing::info;

use crate::helpers::{display, input};

/// List every reminder
pub async fn list(manager: &ReminderManager, format: OutputFormat) -> AppResult<()> {
    let reminders = manager.get_reminders().await?;
    let settings = manager.get_settings().await?;
    let now = manager.now();
    let output = format_output(&reminders, format, |reminders| {
        display::reminder_table(manager.calculator(), reminders, &settings, now)
    })?;
    println!("{output}");
    Ok(())
}

/// Create a reminder
pub async fn add(
    manager: &ReminderManager,
    workout_name: String,
    time: &str,
    days: Option<String>,
    once: bool,
    date: Option<String>,
    format: OutputFormat,
) -> AppResult<()> {
    let scheduled_time = parse_scheduled_time(time)?;
    let request = if once {
        let date = date.as_deref().map(input::parse_date).transpose()?;
        NewReminder::one_time(workout_name, scheduled_time, date)
    } else {
        let days = days.as_deref().map(input::parse_days).transpose()?;
        NewReminder::recurring(workout_name, scheduled_time, days.unwrap_or_default())
    };

    let reminder = manager.create(request).await?;
    info!(reminder_id = %reminder.id, "Reminder added from CLI");
    print_reminder(manager, &reminder, format).await
}

/// Edit a reminder
pub async fn update(
    manager: &ReminderManager,
    id: &str,
    update: ReminderUpdate,
    format: OutputFormat,
) -> AppResult<()> {
    let reminder = manager.update(id, update).await?;
    print_reminder(manager, &reminder, format).await
}

/// Flip a reminder on or off
pub async fn toggle(manager: &ReminderManager, id: &str, format: OutputFormat) -> AppResult<()> {
    let reminder = manager.toggle(id).await?;
    print_reminder(manager, &reminder, format).await
}

/// Delete a reminder
pub async fn delete(manager: &ReminderManager, id: &str) -> AppResult<()> {
    if manager.delete(id).await? {
        println!("Deleted {id}");
    } else {
        println!("No reminder with ID {id}");
    }
    Ok(())
}

/// Re-create triggers for all active reminders
pub async fn reschedule(manager: &ReminderManager, format: OutputFormat) -> AppResult<()> {
    let summary = manager.reschedule_all().await?;
    println!(
        "{}",
        format_output(&summary, format, display::summary_text)?
    );
    Ok(())
}

/// Cancel every trigger
pub async fn mute(manager: &ReminderManager) -> AppResult<()> {
    manager.cancel_all_notifications().await?;
    println!("All reminder notifications cancelled; reminders kept");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Preview {
    reminder_id: String,
    schedule: String,
    triggers: Vec<Trigger>,
    too_soon: bool,
    next_fire_time: Option<chrono::NaiveDateTime>,
}

/// Show what a reminder would schedule under current settings
pub async fn preview(manager: &ReminderManager, id: &str, format: OutputFormat) -> AppResult<()> {
    let reminder = manager
        .get_reminder(id)
        .await?
        .ok_or_else(|| AppError::not_found(id))?;
    let settings = manager.get_settings().await?;
    let now = manager.now();
    let plan = manager.calculator().plan(&reminder, &settings, now);

    let preview = Preview {
        reminder_id: reminder.id.clone(),
        schedule: describe_schedule(&reminder),
        triggers: plan.triggers().to_vec(),
        too_soon: matches!(plan, TriggerPlan::TooSoon { .. }),
        next_fire_time: next_fire_time(manager.calculator(), &reminder, &settings, now),
    };

    let output = format_output(&preview, format, |preview| {
        let mut lines = vec![format!("{}: {}", preview.reminder_id, preview.schedule)];
        lines.extend(preview.triggers.iter().map(|trigger| format!("  {trigger}")));
        if preview.too_soon {
            lines.push("  too close to now, nothing would be scheduled".to_owned());
        }
        if let Some(next) = preview.next_fire_time {
            lines.push(format!("  next: {}", next.format("%a %Y-%m-%d %H:%M")));
        }
        lines.join("\n")
    })?;
    println!("{output}");
    Ok(())
}

async fn print_reminder(
    manager: &ReminderManager,
    reminder: &Reminder,
    format: OutputFormat,
) -> AppResult<()> {
    let settings = manager.get_settings().await?;
    let now = manager.now();
    let output = format_output(reminder, format, |reminder| {
        display::reminder_line(manager.calculator(), reminder, &settings, now)
    })?;
    println!("{output}");
    Ok(())
}
