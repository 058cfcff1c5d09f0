// ABOUTME: Settings commands for pierre-reminders
// ABOUTME: Shows settings and applies partial changes, rescheduling or muting as needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_reminders::{
    errors::AppResult,
    formatters::{format_output, OutputFormat},
    lifecycle::ReminderManager,
};

use crate::helpers::display;

/// Flags from `settings set`; `None` keeps the stored value
pub struct SettingsChange {
    /// Master switch
    pub enabled: Option<bool>,
    /// Sound on delivery
    pub sound: Option<bool>,
    /// Vibration on delivery
    pub vibration: Option<bool>,
    /// Lead time in minutes
    pub minutes_before: Option<u32>,
}

/// Print current settings
pub async fn show(manager: &ReminderManager, format: OutputFormat) -> AppResult<()> {
    let settings = manager.get_settings().await?;
    println!("{}", format_output(&settings, format, display::settings_text)?);
    Ok(())
}

/// Merge and save settings
pub async fn set(
    manager: &ReminderManager,
    change: SettingsChange,
    format: OutputFormat,
) -> AppResult<()> {
    let mut settings = manager.get_settings().await?;
    if let Some(enabled) = change.enabled {
        settings.enabled = enabled;
    }
    if let Some(sound) = change.sound {
        settings.sound_enabled = sound;
    }
    if let Some(vibration) = change.vibration {
        settings.vibration_enabled = vibration;
    }
    if let Some(minutes_before) = change.minutes_before {
        settings.reminder_minutes_before = minutes_before;
    }

    let summary = manager.save_settings(settings).await?;
    println!("{}", format_output(&settings, format, display::settings_text)?);
    if settings.enabled {
        println!("{}", display::summary_text(&summary));
    }
    Ok(())
}
