// ABOUTME: Trigger calculator turning reminders into weekly or one-time platform triggers
// ABOUTME: Applies lead time, midnight wrap, missed-time rollover, and the near-term guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Trigger Calculator
//!
//! Pure and deterministic given `(reminder, settings, now)`.
//!
//! Recurring reminders produce one weekly trigger per selected day, all at the
//! same `(hour, minute)` after the lead time is subtracted. When the lead time
//! crosses midnight the trigger moves to the previous weekday.
//!
//! One-time reminders produce a single instant. An instant at or before `now`
//! rolls over to tomorrow (relative to `now`, never to the stored date) at the
//! same time of day. An instant inside the near-term buffer is not scheduled.

use crate::constants::scheduling::{MINUTES_PER_DAY, NEAR_TERM_BUFFER_SECS};
use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use pierre_reminder_core::models::{DayOfWeek, Reminder, ReminderSettings, ReminderType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekly repeating trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeeklyTrigger {
    /// Day the trigger fires on
    pub weekday: DayOfWeek,
    /// Hour of day, 0-23
    pub hour: u32,
    /// Minute of hour, 0-59
    pub minute: u32,
}

impl WeeklyTrigger {
    /// Weekday number in the platform's numbering
    #[must_use]
    pub const fn platform_weekday(&self) -> u8 {
        self.weekday.platform_weekday()
    }

    /// Next firing strictly after `now`
    #[must_use]
    pub fn next_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        let target = chrono::Weekday::from(self.weekday).num_days_from_monday();
        let current = now.weekday().num_days_from_monday();
        let days_ahead = (target + 7 - current) % 7;

        let candidate = now
            .date()
            .checked_add_days(Days::new(u64::from(days_ahead)))?
            .and_time(time);
        if candidate > now {
            Some(candidate)
        } else {
            candidate.checked_add_days(Days::new(7))
        }
    }
}

/// Concrete one-shot trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstantTrigger {
    /// Local instant the notification fires at
    pub fire_at: NaiveDateTime,
}

/// Platform scheduling primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Repeats every week
    Weekly(WeeklyTrigger),
    /// Fires once
    Instant(InstantTrigger),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly(weekly) => write!(
                f,
                "every {} at {:02}:{:02}",
                weekly.weekday.short_name(),
                weekly.hour,
                weekly.minute
            ),
            Self::Instant(instant) => {
                write!(f, "once at {}", instant.fire_at.format("%Y-%m-%d %H:%M"))
            }
        }
    }
}

/// Outcome of computing triggers for one reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerPlan {
    /// Hand these triggers to the dispatcher
    Schedule(Vec<Trigger>),
    /// One-time instant falls inside the near-term buffer; schedule nothing
    TooSoon {
        /// The instant that was computed
        fire_at: NaiveDateTime,
    },
}

impl TriggerPlan {
    /// Triggers to dispatch, empty when suppressed
    #[must_use]
    pub fn triggers(&self) -> &[Trigger] {
        match self {
            Self::Schedule(triggers) => triggers,
            Self::TooSoon { .. } => &[],
        }
    }
}

/// Computes platform triggers from reminders
#[derive(Debug, Clone, Copy)]
pub struct TriggerCalculator {
    near_term_buffer: Duration,
}

impl TriggerCalculator {
    /// Create a calculator with the given near-term buffer
    #[must_use]
    pub fn new(near_term_buffer: std::time::Duration) -> Self {
        Self {
            near_term_buffer: Duration::from_std(near_term_buffer).unwrap_or(Duration::MAX),
        }
    }

    /// Compute the triggers for `reminder` as of `now`
    #[must_use]
    pub fn plan(
        &self,
        reminder: &Reminder,
        settings: &ReminderSettings,
        now: NaiveDateTime,
    ) -> TriggerPlan {
        match reminder.reminder_type {
            ReminderType::Recurring => TriggerPlan::Schedule(
                weekly_triggers(
                    &reminder.days,
                    reminder.scheduled_time,
                    settings.reminder_minutes_before,
                )
                .into_iter()
                .map(Trigger::Weekly)
                .collect(),
            ),
            ReminderType::OneTime => {
                let date = reminder.scheduled_date.unwrap_or_else(|| now.date());
                let fire_at = one_time_fire_at(
                    date,
                    reminder.scheduled_time,
                    settings.reminder_minutes_before,
                    now,
                );
                let clear_of_buffer = now
                    .checked_add_signed(self.near_term_buffer)
                    .is_some_and(|earliest| fire_at > earliest);
                if clear_of_buffer {
                    TriggerPlan::Schedule(vec![Trigger::Instant(InstantTrigger { fire_at })])
                } else {
                    TriggerPlan::TooSoon { fire_at }
                }
            }
        }
    }
}

impl Default for TriggerCalculator {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(NEAR_TERM_BUFFER_SECS))
    }
}

/// One weekly trigger per day, each shifted earlier by the lead time
#[must_use]
pub fn weekly_triggers(
    days: &[DayOfWeek],
    time: NaiveTime,
    minutes_before: u32,
) -> Vec<WeeklyTrigger> {
    days.iter()
        .map(|day| apply_lead_time(*day, time, minutes_before))
        .collect()
}

/// Subtract the lead time from a weekly slot, wrapping into earlier days
#[must_use]
pub fn apply_lead_time(day: DayOfWeek, time: NaiveTime, minutes_before: u32) -> WeeklyTrigger {
    let total =
        i64::from(time.hour()) * 60 + i64::from(time.minute()) - i64::from(minutes_before);
    let days_back = -total.div_euclid(MINUTES_PER_DAY);
    let minute_of_day = total.rem_euclid(MINUTES_PER_DAY);

    let mut weekday = day;
    for _ in 0..days_back.rem_euclid(7) {
        weekday = weekday.previous();
    }

    WeeklyTrigger {
        weekday,
        hour: (minute_of_day / 60) as u32,
        minute: (minute_of_day % 60) as u32,
    }
}

/// Resolve a one-time reminder to a concrete instant
///
/// The lead time is subtracted first; a result at or before `now` moves to
/// tomorrow at the same time of day.
#[must_use]
pub fn one_time_fire_at(
    date: NaiveDate,
    time: NaiveTime,
    minutes_before: u32,
    now: NaiveDateTime,
) -> NaiveDateTime {
    let candidate = date.and_time(time) - Duration::minutes(i64::from(minutes_before));
    if candidate > now {
        return candidate;
    }

    now.date()
        .checked_add_days(Days::new(1))
        .map_or(candidate, |tomorrow| tomorrow.and_time(candidate.time()))
}
