// ABOUTME: Core types and constants for the Pierre workout reminder engine
// ABOUTME: Foundation crate with error handling, reminder models, and scheduling constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Reminder Core
//!
//! Foundation crate providing shared types and constants for workout reminder
//! scheduling. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Storage keys, scheduling buffers, and notification defaults
//! - **models**: `Reminder`, `ReminderSettings`, `DayOfWeek` and friends

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Reminder data models
pub mod models;
