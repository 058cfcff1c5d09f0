// ABOUTME: Unified error types for the reminder engine re-exported from pierre-reminder-core
// ABOUTME: Provides AppError, ErrorCode, and AppResult to every module of the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_reminder_core::errors::*;
