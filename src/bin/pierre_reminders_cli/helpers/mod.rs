// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for pierre-reminders
// ABOUTME: Provides argument parsing, database path setup, and display formatting

pub mod display;
pub mod input;
pub mod storage;
