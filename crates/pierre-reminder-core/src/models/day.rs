// ABOUTME: Day-of-week model shared by trigger computation and display formatting
// ABOUTME: Single bidirectional table for names, short labels, and platform weekday numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a recurring reminder fires on
///
/// Stored by its lowercase English name. The platform weekly trigger numbers
/// days from Sunday = 1 through Saturday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

/// (day, full name, short label, platform weekday)
const DAY_TABLE: [(DayOfWeek, &str, &str, u8); 7] = [
    (DayOfWeek::Monday, "monday", "Mon", 2),
    (DayOfWeek::Tuesday, "tuesday", "Tue", 3),
    (DayOfWeek::Wednesday, "wednesday", "Wed", 4),
    (DayOfWeek::Thursday, "thursday", "Thu", 5),
    (DayOfWeek::Friday, "friday", "Fri", 6),
    (DayOfWeek::Saturday, "saturday", "Sat", 7),
    (DayOfWeek::Sunday, "sunday", "Sun", 1),
];

impl DayOfWeek {
    /// All days, Monday first
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    const fn row(self) -> (Self, &'static str, &'static str, u8) {
        DAY_TABLE[self.index()]
    }

    const fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Lowercase English name as stored
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.row().1
    }

    /// Three-letter display label
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        self.row().2
    }

    /// Platform weekday number (Sunday = 1 ... Saturday = 7)
    #[must_use]
    pub const fn platform_weekday(self) -> u8 {
        self.row().3
    }

    /// Inverse of [`Self::platform_weekday`]
    #[must_use]
    pub fn from_platform_weekday(weekday: u8) -> Option<Self> {
        DAY_TABLE
            .iter()
            .find(|(_, _, _, number)| *number == weekday)
            .map(|(day, _, _, _)| *day)
    }

    /// Parse a full or three-letter day name, case-insensitive
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        DAY_TABLE
            .iter()
            .find(|(_, full, short, _)| *full == name || short.to_lowercase() == name)
            .map(|(day, _, _, _)| *day)
    }

    /// The day before this one
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + 6) % 7]
    }

    /// Whether this is Monday through Friday
    #[must_use]
    pub const fn is_weekday(self) -> bool {
        !matches!(self, Self::Saturday | Self::Sunday)
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl From<DayOfWeek> for chrono::Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Self::Mon,
            DayOfWeek::Tuesday => Self::Tue,
            DayOfWeek::Wednesday => Self::Wed,
            DayOfWeek::Thursday => Self::Thu,
            DayOfWeek::Friday => Self::Fri,
            DayOfWeek::Saturday => Self::Sat,
            DayOfWeek::Sunday => Self::Sun,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AppError::invalid_input(format!("Unknown day: {s}")))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
