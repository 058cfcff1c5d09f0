// ABOUTME: Workout plan source supplying labels for reminder creation
// ABOUTME: Async trait seam plus a static implementation and label de-duplication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout labels offered when creating a reminder come from the user's
//! active training plan. The reminder engine only needs the labels; where the
//! plan lives is up to the [`WorkoutPlanSource`] implementation.

use crate::config::ReminderConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashSet;

/// Provider of the user's active workout plan
#[async_trait]
pub trait WorkoutPlanSource: Send + Sync {
    /// Workout labels in plan order
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded
    async fn workout_types(&self, user_id: &str) -> AppResult<Vec<String>>;

    /// Name of the active plan, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded
    async fn plan_name(&self, user_id: &str) -> AppResult<Option<String>>;
}

/// Plan source backed by a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticWorkoutPlanSource {
    plan_name: Option<String>,
    workout_types: Vec<String>,
}

impl StaticWorkoutPlanSource {
    /// Create a source with a plan name and its workouts
    #[must_use]
    pub fn new(plan_name: impl Into<String>, workout_types: Vec<String>) -> Self {
        Self {
            plan_name: Some(plan_name.into()),
            workout_types,
        }
    }

    /// Plan configured through `REMINDER_PLAN_NAME` and `REMINDER_WORKOUT_TYPES`
    #[must_use]
    pub fn from_config(config: &ReminderConfig) -> Self {
        Self {
            plan_name: config.plan_name.clone(),
            workout_types: config.workout_types.clone(),
        }
    }
}

#[async_trait]
impl WorkoutPlanSource for StaticWorkoutPlanSource {
    async fn workout_types(&self, _user_id: &str) -> AppResult<Vec<String>> {
        Ok(self.workout_types.clone())
    }

    async fn plan_name(&self, _user_id: &str) -> AppResult<Option<String>> {
        Ok(self.plan_name.clone())
    }
}

/// Selectable workout labels: trimmed, non-empty, first occurrence kept
///
/// # Errors
///
/// Returns an error if the plan source fails
pub async fn workout_options(
    source: &dyn WorkoutPlanSource,
    user_id: &str,
) -> AppResult<Vec<String>> {
    let mut seen = HashSet::new();
    Ok(source
        .workout_types(user_id)
        .await?
        .into_iter()
        .map(|label| label.trim().to_owned())
        .filter(|label| !label.is_empty() && seen.insert(label.clone()))
        .collect())
}

/// Label at 1-based `position` among [`workout_options`]
///
/// # Errors
///
/// Returns `InvalidInput` if `position` is out of range, or the source's error
pub async fn pick_workout(
    source: &dyn WorkoutPlanSource,
    user_id: &str,
    position: usize,
) -> AppResult<String> {
    let options = workout_options(source, user_id).await?;
    position
        .checked_sub(1)
        .and_then(|index| options.get(index))
        .cloned()
        .ok_or_else(|| {
            AppError::invalid_input(format!(
                "No workout #{position}; the plan offers {} option(s)",
                options.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_workout_options_cleans_labels() {
        let source = StaticWorkoutPlanSource::new(
            "5x5 Strength",
            vec![
                " Squat Day ".into(),
                String::new(),
                "Bench Day".into(),
                "Squat Day".into(),
            ],
        );

        let options = workout_options(&source, "user-1").await.unwrap();
        assert_eq!(options, vec!["Squat Day".to_owned(), "Bench Day".to_owned()]);
        assert_eq!(
            source.plan_name("user-1").await.unwrap().as_deref(),
            Some("5x5 Strength")
        );
    }

    #[tokio::test]
    async fn test_pick_workout_is_one_based() {
        let source =
            StaticWorkoutPlanSource::new("PPL", vec!["Push".into(), " ".into(), "Pull".into()]);
        assert_eq!(pick_workout(&source, "u", 2).await.unwrap(), "Pull");
        assert!(pick_workout(&source, "u", 0).await.is_err());
        assert!(pick_workout(&source, "u", 3).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_source_has_no_plan() {
        let source = StaticWorkoutPlanSource::default();
        assert!(workout_options(&source, "u").await.unwrap().is_empty());
        assert!(source.plan_name("u").await.unwrap().is_none());
    }
}
