// ABOUTME: Integration tests for the reminder lifecycle manager
// ABOUTME: Covers CRUD, trigger bookkeeping, master switch, mute, and failure surfacing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{at, date, harness, harness_at, init_test_logging, monday_noon, with_minutes_before};
use pierre_reminders::{
    config::SchedulerConfig,
    errors::ErrorCode,
    formatters::next_fire_time,
    lifecycle::ReminderManager,
    models::{DayOfWeek, NewReminder, ReminderSettings, ReminderType, ReminderUpdate},
    notifications::{InMemoryDispatcher, NotificationDispatcher, NotificationPayload},
    scheduling::{FixedClock, InstantTrigger, Trigger, WeeklyTrigger},
    storage::InMemoryReminderStore,
};
use std::sync::Arc;
use std::time::Duration;

fn push_day() -> NewReminder {
    NewReminder::recurring(
        "Push Day",
        at(18, 0),
        [DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday],
    )
}

#[tokio::test]
async fn test_create_round_trip() -> Result<()> {
    let h = harness();
    let created = h.manager.create(push_day()).await?;

    let stored = h.manager.get_reminder(&created.id).await?.expect("stored");
    assert_eq!(stored.workout_name, "Push Day");
    assert_eq!(stored.scheduled_time, at(18, 0));
    assert_eq!(
        stored.days,
        vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday]
    );
    assert_eq!(stored.reminder_type, ReminderType::Recurring);
    assert!(stored.is_active);
    assert_eq!(stored, created);
    Ok(())
}

#[tokio::test]
async fn test_recurring_reminder_schedules_one_trigger_per_day() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    assert_eq!(reminder.notification_ids.len(), 3);
    let scheduled = h.dispatcher.list_scheduled().await?;
    assert_eq!(scheduled.len(), 3);
    for entry in &scheduled {
        let Trigger::Weekly(weekly) = entry.trigger else {
            panic!("expected weekly trigger, got {:?}", entry.trigger);
        };
        assert_eq!((weekly.hour, weekly.minute), (18, 0));
        assert_eq!(entry.payload.data.reminder_id, reminder.id);
        assert_eq!(entry.payload.body, "Time for your Push Day workout!");
    }
    Ok(())
}

#[tokio::test]
async fn test_lead_time_underflow_wraps_to_previous_day() -> Result<()> {
    let h = harness();
    with_minutes_before(&h, 30).await?;
    h.manager
        .create(NewReminder::recurring("Early Swim", at(0, 10), [DayOfWeek::Monday]))
        .await?;

    let scheduled = h.dispatcher.list_scheduled().await?;
    assert_eq!(scheduled.len(), 1);
    assert_eq!(
        scheduled[0].trigger,
        Trigger::Weekly(WeeklyTrigger {
            weekday: DayOfWeek::Sunday,
            hour: 23,
            minute: 40,
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_one_time_in_the_past_rolls_over_to_tomorrow() -> Result<()> {
    let h = harness();
    let reminder = h
        .manager
        .create(NewReminder::one_time("Long Run", at(7, 30), None))
        .await?;

    assert_eq!(reminder.scheduled_date, Some(date(2025, 3, 10)));
    let scheduled = h.dispatcher.list_scheduled().await?;
    assert_eq!(
        scheduled[0].trigger,
        Trigger::Instant(InstantTrigger {
            fire_at: date(2025, 3, 11).and_time(at(7, 30)),
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_near_term_one_time_is_persisted_but_not_scheduled() -> Result<()> {
    let now = date(2025, 3, 10).and_hms_opt(7, 29, 55).unwrap();
    let h = harness_at(now);

    let reminder = h
        .manager
        .create(NewReminder::one_time("Stretch", at(7, 30), Some(date(2025, 3, 10))))
        .await?;

    assert_eq!(h.dispatcher.schedule_calls(), 0);
    assert!(reminder.notification_ids.is_empty());
    let stored = h.manager.get_reminders().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, reminder.id);
    Ok(())
}

#[tokio::test]
async fn test_deactivating_twice_leaves_no_triggers() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    let off = h.manager.set_active(&reminder.id, false).await?;
    assert!(!off.is_active);
    assert!(off.notification_ids.is_empty());

    h.manager.set_active(&reminder.id, false).await?;
    assert_eq!(h.dispatcher.live_count().await, 0);
    let stored = h.manager.get_reminder(&reminder.id).await?.unwrap();
    assert!(!stored.is_active);
    Ok(())
}

#[tokio::test]
async fn test_toggle_round_trip_does_not_duplicate_triggers() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    let off = h.manager.toggle(&reminder.id).await?;
    assert!(!off.is_active);
    assert_eq!(h.dispatcher.live_count().await, 0);

    let on = h.manager.toggle(&reminder.id).await?;
    assert!(on.is_active);
    assert_eq!(on.notification_ids.len(), 3);
    assert_eq!(h.dispatcher.live_count().await, 3);
    Ok(())
}

#[tokio::test]
async fn test_update_replaces_existing_triggers() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    let updated = h
        .manager
        .update(
            &reminder.id,
            ReminderUpdate {
                workout_name: Some("Pull Day".into()),
                days: Some(vec![DayOfWeek::Tuesday]),
                ..ReminderUpdate::default()
            },
        )
        .await?;

    assert_eq!(updated.workout_name, "Pull Day");
    assert_eq!(updated.created_at, reminder.created_at);
    assert_eq!(updated.notification_ids.len(), 1);
    let scheduled = h.dispatcher.list_scheduled().await?;
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].payload.data.workout_name, "Pull Day");
    Ok(())
}

#[tokio::test]
async fn test_update_to_inactive_cancels_without_rescheduling() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    let updated = h
        .manager
        .update(
            &reminder.id,
            ReminderUpdate {
                is_active: Some(false),
                ..ReminderUpdate::default()
            },
        )
        .await?;

    assert!(!updated.is_active);
    assert_eq!(h.dispatcher.live_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_invalid_update_leaves_record_and_triggers_alone() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    let error = h
        .manager
        .update(
            &reminder.id,
            ReminderUpdate {
                days: Some(Vec::new()),
                ..ReminderUpdate::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(h.manager.get_reminder(&reminder.id).await?.unwrap(), reminder);
    assert_eq!(h.dispatcher.live_count().await, 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_reminder_is_not_found() -> Result<()> {
    let h = harness();

    let error = h.manager.toggle("missing").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let error = h
        .manager
        .update("missing", ReminderUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_delete_is_idempotent() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    assert!(h.manager.delete(&reminder.id).await?);
    assert!(!h.manager.delete(&reminder.id).await?);
    assert!(h.manager.get_reminders().await?.is_empty());
    assert_eq!(h.dispatcher.live_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_delete_sweeps_orphaned_triggers() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    // A trigger the record does not know about
    let payload =
        NotificationPayload::for_reminder(&reminder, &ReminderSettings::default(), "Orphan");
    let orphan = Trigger::Weekly(WeeklyTrigger {
        weekday: DayOfWeek::Sunday,
        hour: 9,
        minute: 0,
    });
    h.dispatcher.schedule(&orphan, &payload).await?;
    assert_eq!(h.dispatcher.live_count().await, 4);

    h.manager.delete(&reminder.id).await?;
    assert_eq!(h.dispatcher.live_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_master_switch_overrides_active_reminders() -> Result<()> {
    let h = harness();
    h.manager
        .save_settings(ReminderSettings {
            enabled: false,
            ..ReminderSettings::default()
        })
        .await?;

    let reminder = h
        .manager
        .create(NewReminder::recurring(
            "Yoga",
            at(6, 30),
            [DayOfWeek::Monday, DayOfWeek::Tuesday],
        ))
        .await?;
    assert!(reminder.is_active);
    assert_eq!(h.dispatcher.live_count().await, 0);

    let summary = h.manager.save_settings(ReminderSettings::default()).await?;
    assert_eq!(summary.scheduled, 1);
    assert_eq!(h.dispatcher.live_count().await, 2);

    // A second pass replaces rather than duplicates
    h.manager.reschedule_all().await?;
    assert_eq!(h.dispatcher.live_count().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_disabling_settings_mutes_existing_triggers() -> Result<()> {
    let h = harness();
    let reminder = h.manager.create(push_day()).await?;

    h.manager
        .save_settings(ReminderSettings {
            enabled: false,
            ..ReminderSettings::default()
        })
        .await?;

    assert_eq!(h.dispatcher.live_count().await, 0);
    let stored = h.manager.get_reminder(&reminder.id).await?.unwrap();
    assert!(stored.is_active);
    assert!(stored.notification_ids.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancel_all_preserves_intent() -> Result<()> {
    let h = harness();
    let active = h.manager.create(push_day()).await?;
    let paused = h
        .manager
        .create(NewReminder::recurring("Core", at(7, 0), [DayOfWeek::Saturday]))
        .await?;
    h.manager.set_active(&paused.id, false).await?;

    h.manager.cancel_all_notifications().await?;

    assert_eq!(h.dispatcher.live_count().await, 0);
    for reminder in h.manager.get_reminders().await? {
        assert!(reminder.notification_ids.is_empty());
        assert_eq!(reminder.is_active, reminder.id == active.id);
    }

    let summary = h.manager.reschedule_all().await?;
    assert_eq!(summary.scheduled, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(h.dispatcher.live_count().await, 3);
    Ok(())
}

#[tokio::test]
async fn test_lead_time_change_reschedules_all() -> Result<()> {
    let h = harness();
    h.manager.create(push_day()).await?;

    with_minutes_before(&h, 15).await?;

    let scheduled = h.dispatcher.list_scheduled().await?;
    assert_eq!(scheduled.len(), 3);
    for entry in scheduled {
        let Trigger::Weekly(weekly) = entry.trigger else {
            panic!("expected weekly trigger");
        };
        assert_eq!((weekly.hour, weekly.minute), (17, 45));
    }
    Ok(())
}

#[tokio::test]
async fn test_permission_denied_is_surfaced_and_record_kept() -> Result<()> {
    let h = harness();
    h.dispatcher.set_permission(false);

    let error = h.manager.create(push_day()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::PermissionDenied);
    assert!(error.user_message().contains("Enable them"));

    let stored = h.manager.get_reminders().await?;
    assert_eq!(stored.len(), 1);
    assert!(stored[0].is_active);
    assert_eq!(h.dispatcher.schedule_calls(), 0);

    let error = h.manager.reschedule_all().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::PermissionDenied);
    Ok(())
}

#[tokio::test]
async fn test_dispatch_failure_is_surfaced_then_recovered() -> Result<()> {
    let h = harness();
    h.dispatcher.set_reject_scheduling(true);

    let error = h.manager.create(push_day()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::DispatchFailure);
    let stored = h.manager.get_reminders().await?;
    assert_eq!(stored.len(), 1);
    assert!(stored[0].notification_ids.is_empty());

    let summary = h.manager.reschedule_all().await?;
    assert_eq!(summary.failed, vec![stored[0].id.clone()]);

    h.dispatcher.set_reject_scheduling(false);
    let summary = h.manager.reschedule_all().await?;
    assert_eq!(summary.scheduled, 1);
    assert_eq!(h.dispatcher.live_count().await, 3);
    Ok(())
}

#[tokio::test]
async fn test_partial_dispatch_keeps_created_handles_for_update() -> Result<()> {
    let h = harness();
    h.dispatcher.set_schedule_limit(Some(2));

    let error = h.manager.create(push_day()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::DispatchFailure);
    let stored = h.manager.get_reminders().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].notification_ids.len(), 2);
    assert_eq!(h.dispatcher.live_count().await, 2);
    let partial = stored[0].notification_ids.clone();

    h.dispatcher.set_schedule_limit(None);
    let updated = h
        .manager
        .update(
            &stored[0].id,
            ReminderUpdate {
                workout_name: Some("Push Day (heavy)".into()),
                ..ReminderUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.notification_ids.len(), 3);
    assert_eq!(h.dispatcher.live_count().await, 3);

    let live: Vec<_> = h
        .dispatcher
        .list_scheduled()
        .await?
        .into_iter()
        .map(|scheduled| scheduled.handle)
        .collect();
    assert!(partial.iter().all(|handle| !live.contains(handle)));
    Ok(())
}

#[tokio::test]
async fn test_partial_dispatch_handles_are_cancelled_on_delete() -> Result<()> {
    let h = harness();
    h.dispatcher.set_schedule_limit(Some(1));

    let error = h.manager.create(push_day()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::DispatchFailure);
    let stored = h.manager.get_reminders().await?;
    assert_eq!(stored[0].notification_ids.len(), 1);
    assert_eq!(h.dispatcher.live_count().await, 1);

    assert!(h.manager.delete(&stored[0].id).await?);
    assert_eq!(h.dispatcher.live_count().await, 0);
    assert!(h.manager.get_reminders().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_configured_buffer_governs_next_fire_time() -> Result<()> {
    init_test_logging();
    let now = monday_noon();
    let config = SchedulerConfig {
        near_term_buffer: Duration::from_secs(120),
        ..SchedulerConfig::default()
    };
    let dispatcher = InMemoryDispatcher::default();
    let manager = ReminderManager::new(
        Arc::new(InMemoryReminderStore::new()),
        Arc::new(dispatcher.clone()),
        &config,
    )
    .with_clock(Arc::new(FixedClock(now)));

    let reminder = manager
        .create(NewReminder::one_time("Stretch", at(12, 1), Some(now.date())))
        .await?;
    assert!(reminder.notification_ids.is_empty());
    assert_eq!(dispatcher.live_count().await, 0);

    let settings = manager.get_settings().await?;
    assert_eq!(
        next_fire_time(manager.calculator(), &reminder, &settings, now),
        None
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_create_stores_nothing() -> Result<()> {
    let h = harness();

    let error = h
        .manager
        .create(NewReminder::recurring("Legs", at(18, 0), Vec::new()))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let error = h
        .manager
        .create(NewReminder::recurring("   ", at(18, 0), [DayOfWeek::Monday]))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    assert!(h.manager.get_reminders().await?.is_empty());
    assert_eq!(h.dispatcher.schedule_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_settings_default_on_first_read() -> Result<()> {
    let h = harness();
    assert!(h.store.is_empty().await);

    let settings = h.manager.get_settings().await?;
    assert_eq!(settings, ReminderSettings::default());
    assert_eq!(h.store.len().await, 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_are_not_lost() -> Result<()> {
    let h = harness();

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let manager = h.manager.clone();
            tokio::spawn(async move {
                manager
                    .create(NewReminder::recurring(
                        format!("Workout {i}"),
                        at(18, 0),
                        [DayOfWeek::Thursday],
                    ))
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await??;
    }

    assert_eq!(h.manager.get_reminders().await?.len(), 10);
    assert_eq!(h.dispatcher.live_count().await, 10);
    Ok(())
}
