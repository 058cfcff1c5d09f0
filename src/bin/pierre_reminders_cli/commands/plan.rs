// ABOUTME: Workout plan commands for pierre-reminders
// ABOUTME: Lists plan workouts and resolves `add --pick` to a workout label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_reminders::{
    constants::defaults::LOCAL_USER_ID,
    errors::{AppError, AppResult},
    formatters::{format_output, OutputFormat},
    plans::{pick_workout, workout_options, WorkoutPlanSource},
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanWorkouts {
    plan_name: Option<String>,
    workouts: Vec<String>,
}

/// Print the numbered workouts of the active plan
pub async fn list(plans: &dyn WorkoutPlanSource, format: OutputFormat) -> AppResult<()> {
    let listing = PlanWorkouts {
        plan_name: plans.plan_name(LOCAL_USER_ID).await?,
        workouts: workout_options(plans, LOCAL_USER_ID).await?,
    };

    let output = format_output(&listing, format, |listing| {
        if listing.workouts.is_empty() {
            return "No plan workouts configured".to_owned();
        }
        let mut lines = vec![listing
            .plan_name
            .clone()
            .unwrap_or_else(|| "Workouts".to_owned())];
        lines.extend(
            listing
                .workouts
                .iter()
                .enumerate()
                .map(|(index, workout)| format!("  {}. {workout}", index + 1)),
        );
        lines.join("\n")
    })?;
    println!("{output}");
    Ok(())
}

/// Workout label from a typed name or a plan position
pub async fn resolve_workout(
    plans: &dyn WorkoutPlanSource,
    workout_name: Option<String>,
    pick: Option<usize>,
) -> AppResult<String> {
    match (workout_name, pick) {
        (Some(name), _) => Ok(name),
        (None, Some(position)) => pick_workout(plans, LOCAL_USER_ID, position).await,
        (None, None) => Err(AppError::invalid_input(
            "Give a workout name or --pick a plan workout",
        )),
    }
}
