// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for pierre-reminders
// ABOUTME: Provides access to reminder, settings, and workout plan commands

pub mod plan;
pub mod reminder;
pub mod settings;
