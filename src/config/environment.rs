// ABOUTME: Environment configuration for the reminder engine
// ABOUTME: Parses store URL, near-term buffer, notification title, and event buffer size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{defaults, env_config, notification, scheduling};
use crate::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Scheduling parameters threaded into the lifecycle manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// One-time triggers must fire later than `now + near_term_buffer`
    pub near_term_buffer: Duration,
    /// Title on every notification payload
    pub notification_title: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            near_term_buffer: Duration::from_secs(scheduling::NEAR_TERM_BUFFER_SECS),
            notification_title: notification::DEFAULT_TITLE.to_owned(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    /// Sqlite URL of the reminder store
    pub database_url: String,
    /// Scheduling parameters
    pub scheduler: SchedulerConfig,
    /// Capacity of the notification event channel
    pub event_buffer: usize,
    /// Active workout plan name
    pub plan_name: Option<String>,
    /// Workout labels from the active plan, in plan order
    pub workout_types: Vec<String>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_owned(),
            scheduler: SchedulerConfig::default(),
            event_buffer: notification::DEFAULT_EVENT_BUFFER,
            plan_name: None,
            workout_types: Vec::new(),
        }
    }
}

impl ReminderConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a numeric variable does not parse
    pub fn from_env() -> AppResult<Self> {
        info!("Loading reminder configuration from environment variables");

        let buffer_secs: u64 = env_parse_or(
            env_config::NEAR_TERM_BUFFER_SECS,
            scheduling::NEAR_TERM_BUFFER_SECS,
        )?;
        let event_buffer: usize =
            env_parse_or(env_config::EVENT_BUFFER, notification::DEFAULT_EVENT_BUFFER)?;
        if event_buffer == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                env_config::EVENT_BUFFER
            )));
        }

        Ok(Self {
            database_url: env_var_or(env_config::DATABASE_URL, defaults::DATABASE_URL),
            scheduler: SchedulerConfig {
                near_term_buffer: Duration::from_secs(buffer_secs),
                notification_title: env_var_or(
                    env_config::NOTIFICATION_TITLE,
                    notification::DEFAULT_TITLE,
                ),
            },
            event_buffer,
            plan_name: env::var(env_config::PLAN_NAME)
                .ok()
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty()),
            workout_types: env::var(env_config::WORKOUT_TYPES)
                .map(|raw| raw.split(',').map(str::to_owned).collect())
                .unwrap_or_default(),
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid value '{raw}' for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
