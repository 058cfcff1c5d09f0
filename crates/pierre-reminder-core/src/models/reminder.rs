// ABOUTME: Workout reminder record, creation request, and partial update models
// ABOUTME: Normalizes recurring vs one-time shape and serializes HH:MM wall-clock times
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::DayOfWeek;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Whether a reminder repeats weekly or fires once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderType {
    /// Repeats every week on the selected days
    #[serde(rename = "recurring")]
    Recurring,
    /// Fires once and expires after delivery
    #[serde(rename = "one-time")]
    OneTime,
}

impl ReminderType {
    /// Stored string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recurring => "recurring",
            Self::OneTime => "one-time",
        }
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle returned by the notification dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationHandle(pub String);

impl NotificationHandle {
    /// Generate a fresh random handle
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw handle string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serde adapter storing `NaiveTime` as 24-hour `HH:MM`
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Format used for stored times
    pub const FORMAT: &str = "%H:%M";

    /// Serialize as `HH:MM`
    ///
    /// # Errors
    ///
    /// Propagates serializer errors
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    /// Deserialize from `HH:MM`
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid 24-hour time
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    /// `HH:MM` adapter for optional times
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serialize `Some` as `HH:MM`, `None` as null
        ///
        /// # Errors
        ///
        /// Propagates serializer errors
        #[allow(clippy::ref_option)] // serde `with` signature
        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional `HH:MM`
        ///
        /// # Errors
        ///
        /// Returns an error if a present value is not a valid 24-hour time
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| {
                    NaiveTime::parse_from_str(&raw, super::FORMAT)
                        .map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}

/// Parse a user-entered `HH:MM` time
///
/// # Errors
///
/// Returns `InvalidInput` if the value is not a 24-hour `HH:MM` time
pub fn parse_scheduled_time(raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), hhmm::FORMAT).map_err(|e| {
        AppError::invalid_input(format!("Invalid time '{raw}', expected HH:MM: {e}"))
    })
}

/// A user-declared intent to be notified about a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Unique identifier, immutable
    pub id: String,
    /// Label shown in the notification body
    pub workout_name: String,
    /// Local wall-clock time of the workout
    #[serde(with = "hhmm")]
    pub scheduled_time: NaiveTime,
    /// Weekdays for recurring reminders, empty for one-time
    #[serde(default)]
    pub days: Vec<DayOfWeek>,
    /// Recurring or one-time
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    /// Local calendar date, one-time reminders only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// User intent: should a live trigger exist
    pub is_active: bool,
    /// Handles of live platform triggers, one per scheduled weekday
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_ids: Vec<NotificationHandle>,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Build a new active reminder from a creation request
    ///
    /// `today` fills in a missing one-time date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the request fails validation
    pub fn create(request: NewReminder, today: NaiveDate) -> AppResult<Self> {
        let mut reminder = Self {
            id: Uuid::new_v4().to_string(),
            workout_name: request.workout_name,
            scheduled_time: request.scheduled_time,
            days: request.days,
            reminder_type: request.reminder_type,
            scheduled_date: request.scheduled_date,
            is_active: true,
            notification_ids: Vec::new(),
            created_at: Utc::now(),
        };
        reminder.normalize(today)?;
        Ok(reminder)
    }

    /// Merge a partial update into this reminder
    ///
    /// Identity, creation time, and notification handles are never touched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the merged record is invalid
    pub fn apply_update(&mut self, update: ReminderUpdate, today: NaiveDate) -> AppResult<()> {
        if let Some(workout_name) = update.workout_name {
            self.workout_name = workout_name;
        }
        if let Some(scheduled_time) = update.scheduled_time {
            self.scheduled_time = scheduled_time;
        }
        if let Some(days) = update.days {
            self.days = days;
        }
        if let Some(reminder_type) = update.reminder_type {
            self.reminder_type = reminder_type;
        }
        if let Some(scheduled_date) = update.scheduled_date {
            self.scheduled_date = Some(scheduled_date);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.normalize(today)
    }

    /// Enforce the recurring/one-time shape
    fn normalize(&mut self, today: NaiveDate) -> AppResult<()> {
        self.workout_name = self.workout_name.trim().to_owned();
        if self.workout_name.is_empty() {
            return Err(AppError::invalid_input("Workout name must not be empty"));
        }

        match self.reminder_type {
            ReminderType::Recurring => {
                self.days.sort_unstable();
                self.days.dedup();
                if self.days.is_empty() {
                    return Err(AppError::invalid_input(
                        "Recurring reminders need at least one day",
                    ));
                }
                self.scheduled_date = None;
            }
            ReminderType::OneTime => {
                self.days.clear();
                if self.scheduled_date.is_none() {
                    self.scheduled_date = Some(today);
                }
            }
        }
        Ok(())
    }

    /// Whether this reminder deletes itself once delivered
    #[must_use]
    pub const fn is_one_time(&self) -> bool {
        matches!(self.reminder_type, ReminderType::OneTime)
    }

    /// Whether any platform trigger handle is recorded
    #[must_use]
    pub fn has_live_trigger(&self) -> bool {
        !self.notification_ids.is_empty()
    }
}

/// Request to create a reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    /// Workout label
    pub workout_name: String,
    /// Local time of day
    #[serde(with = "hhmm")]
    pub scheduled_time: NaiveTime,
    /// Days for recurring reminders
    #[serde(default)]
    pub days: Vec<DayOfWeek>,
    /// Recurring or one-time
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    /// One-time date, defaults to today
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

impl NewReminder {
    /// Weekly reminder on the given days
    pub fn recurring(
        workout_name: impl Into<String>,
        scheduled_time: NaiveTime,
        days: impl IntoIterator<Item = DayOfWeek>,
    ) -> Self {
        Self {
            workout_name: workout_name.into(),
            scheduled_time,
            days: days.into_iter().collect(),
            reminder_type: ReminderType::Recurring,
            scheduled_date: None,
        }
    }

    /// Single reminder, today if no date is given
    pub fn one_time(
        workout_name: impl Into<String>,
        scheduled_time: NaiveTime,
        scheduled_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            workout_name: workout_name.into(),
            scheduled_time,
            days: Vec::new(),
            reminder_type: ReminderType::OneTime,
            scheduled_date,
        }
    }
}

/// Partial update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderUpdate {
    /// New workout label
    pub workout_name: Option<String>,
    /// New time of day
    #[serde(default, with = "hhmm::option")]
    pub scheduled_time: Option<NaiveTime>,
    /// New day set
    pub days: Option<Vec<DayOfWeek>>,
    /// New type
    #[serde(rename = "type")]
    pub reminder_type: Option<ReminderType>,
    /// New one-time date
    pub scheduled_date: Option<NaiveDate>,
    /// New activation state
    pub is_active: Option<bool>,
}
