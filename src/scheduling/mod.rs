// ABOUTME: Scheduling module for reminder trigger computation
// ABOUTME: Exposes the pure trigger calculator and the clock abstraction it is evaluated against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Wall-clock abstraction
pub mod clock;
/// Trigger calculator
pub mod trigger;

pub use clock::{Clock, FixedClock, SystemClock};
pub use trigger::{
    apply_lead_time, one_time_fire_at, weekly_triggers, InstantTrigger, Trigger,
    TriggerCalculator, TriggerPlan, WeeklyTrigger,
};
