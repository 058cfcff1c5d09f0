// ABOUTME: Configuration management module for the reminder engine
// ABOUTME: Loads store location, scheduling buffer, and notification presentation from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Pierre reminders
//!
//! - **Environment**: engine configuration from environment variables

/// Environment-driven engine configuration
pub mod environment;

pub use environment::{ReminderConfig, SchedulerConfig};
