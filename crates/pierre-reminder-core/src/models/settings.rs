// ABOUTME: Process-wide reminder settings record with persisted defaults
// ABOUTME: Master switch, presentation flags, and lead time applied to every trigger
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::settings_defaults;
use serde::{Deserialize, Serialize};

/// Global reminder settings
///
/// `enabled` overrides every reminder's own `is_active`: when it is false no
/// reminder holds a live trigger, but each reminder keeps its intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderSettings {
    /// Master switch
    pub enabled: bool,
    /// Play a sound with the notification
    pub sound_enabled: bool,
    /// Vibrate with the notification
    pub vibration_enabled: bool,
    /// Lead time subtracted from each reminder's scheduled time
    pub reminder_minutes_before: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: settings_defaults::ENABLED,
            sound_enabled: settings_defaults::SOUND_ENABLED,
            vibration_enabled: settings_defaults::VIBRATION_ENABLED,
            reminder_minutes_before: settings_defaults::REMINDER_MINUTES_BEFORE,
        }
    }
}
