// ABOUTME: Reminder lifecycle manager orchestrating store, trigger calculator, and dispatcher
// ABOUTME: Create/update/toggle/delete plus bulk reschedule and mute under a single-writer lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Lifecycle Manager
//!
//! Owns the invariant that a reminder's stored handles reflect its current
//! schedule: every path cancels existing triggers before creating new ones,
//! and cancellation also sweeps platform notifications whose payload names
//! the reminder so no trigger is ever orphaned.
//!
//! Every operation is a read-modify-write of the whole reminder list. A
//! single-writer mutex serializes them, including deletes issued by the
//! fired-event reconciler, so concurrent callers cannot clobber each other.
//!
//! `ReminderSettings::enabled` and `Reminder::is_active` are independent: the
//! first is a global override, the second is user intent. With the master
//! switch off, active reminders stay active in the store but hold no trigger.

use crate::config::SchedulerConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::notifications::{NotificationDispatcher, NotificationPayload};
use crate::scheduling::{Clock, SystemClock, TriggerCalculator, TriggerPlan};
use crate::storage::ReminderStore;
use pierre_reminder_core::models::{
    NewReminder, Reminder, ReminderSettings, ReminderUpdate,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Result of the per-reminder schedule step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Triggers were handed to the dispatcher
    Scheduled(usize),
    /// One-time instant fell inside the near-term buffer
    TooSoon,
    /// Master switch is off
    Disabled,
    /// Reminder is switched off
    Inactive,
}

/// Result of [`ReminderManager::expire_one_time`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// One-time reminder removed along with its triggers
    Expired,
    /// Reminder is recurring and was left untouched
    Retained,
    /// No reminder with this id
    Absent,
}

/// Tally returned by [`ReminderManager::reschedule_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RescheduleSummary {
    /// Reminders that now hold live triggers
    pub scheduled: usize,
    /// Active reminders left without triggers (master switch off, too soon)
    pub skipped: usize,
    /// Reminders whose dispatch failed
    pub failed: Vec<String>,
}

/// Reminder CRUD and scheduling orchestration
pub struct ReminderManager {
    store: Arc<dyn ReminderStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    calculator: TriggerCalculator,
    notification_title: String,
    writer: Mutex<()>,
}

impl ReminderManager {
    /// Create a manager reading the system clock
    #[must_use]
    pub fn new(
        store: Arc<dyn ReminderStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock: Arc::new(SystemClock),
            calculator: TriggerCalculator::new(config.near_term_buffer),
            notification_title: config.notification_title.clone(),
            writer: Mutex::new(()),
        }
    }

    /// Replace the clock used for "now"
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The dispatcher this manager schedules through
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<dyn NotificationDispatcher> {
        &self.dispatcher
    }

    /// The trigger calculator in use
    #[must_use]
    pub const fn calculator(&self) -> &TriggerCalculator {
        &self.calculator
    }

    /// Current local time according to the manager's clock
    #[must_use]
    pub fn now(&self) -> chrono::NaiveDateTime {
        self.clock.now()
    }

    /// Ask the platform for notification permission
    ///
    /// # Errors
    ///
    /// Returns an error if the platform permission API fails
    pub async fn request_permissions(&self) -> AppResult<bool> {
        self.dispatcher.request_permissions().await
    }

    /// All stored reminders
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn get_reminders(&self) -> AppResult<Vec<Reminder>> {
        self.store.load_reminders().await
    }

    /// One reminder by id
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn get_reminder(&self, id: &str) -> AppResult<Option<Reminder>> {
        Ok(self
            .store
            .load_reminders()
            .await?
            .into_iter()
            .find(|reminder| reminder.id == id))
    }

    /// Current settings, defaults materialized on first read
    ///
    /// # Errors
    ///
    /// Returns an error if the store read/write fails
    pub async fn get_settings(&self) -> AppResult<ReminderSettings> {
        self.store.load_settings().await
    }

    /// Persist settings and bring every trigger in line with them
    ///
    /// Enabled settings reschedule every active reminder; disabled settings
    /// mute every trigger while keeping each reminder's intent.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or permission is denied
    pub async fn save_settings(&self, settings: ReminderSettings) -> AppResult<RescheduleSummary> {
        let _guard = self.writer.lock().await;
        self.store.save_settings(&settings).await?;
        info!(
            enabled = settings.enabled,
            minutes_before = settings.reminder_minutes_before,
            "Reminder settings saved"
        );

        if settings.enabled {
            self.reschedule_all_locked(&settings).await
        } else {
            self.cancel_all_locked().await?;
            Ok(RescheduleSummary::default())
        }
    }

    /// Create, persist, and schedule a reminder
    ///
    /// The record is persisted even when scheduling fails so the user keeps
    /// their intent; the error is still returned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an invalid request, `PermissionDenied` or
    /// `DispatchFailure` if scheduling fails, or a storage error
    pub async fn create(&self, request: NewReminder) -> AppResult<Reminder> {
        let mut reminder = Reminder::create(request, self.clock.now().date())?;

        let _guard = self.writer.lock().await;
        let settings = self.store.load_settings().await?;
        let mut reminders = self.store.load_reminders().await?;
        reminders.push(reminder.clone());
        self.store.save_reminders(&reminders).await?;
        info!(
            reminder_id = %reminder.id,
            workout = %reminder.workout_name,
            reminder_type = %reminder.reminder_type,
            "Reminder created"
        );

        let outcome = self.schedule_reminder(&mut reminder, &settings).await;
        self.write_back(&mut reminders, &reminder).await?;
        outcome?;
        Ok(reminder)
    }

    /// Merge a partial update, then reschedule if the result is active
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is absent, `InvalidInput` if the merged
    /// record is invalid, or a scheduling/storage error
    pub async fn update(&self, id: &str, update: ReminderUpdate) -> AppResult<Reminder> {
        let _guard = self.writer.lock().await;
        let settings = self.store.load_settings().await?;
        let mut reminders = self.store.load_reminders().await?;
        let index = Self::position(&reminders, id)?;

        let mut merged = reminders[index].clone();
        merged.apply_update(update, self.clock.now().date())?;
        self.cancel_triggers(&mut merged).await?;
        reminders[index] = merged.clone();
        self.store.save_reminders(&reminders).await?;
        info!(reminder_id = %id, "Reminder updated");

        if !merged.is_active {
            return Ok(merged);
        }
        let outcome = self.schedule_reminder(&mut merged, &settings).await;
        self.write_back(&mut reminders, &merged).await?;
        outcome?;
        Ok(merged)
    }

    /// Flip a reminder between active and inactive
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is absent, or a scheduling/storage error
    pub async fn toggle(&self, id: &str) -> AppResult<Reminder> {
        self.change_activation(id, |active| !active).await
    }

    /// Set a reminder's activation explicitly; repeated calls are no-ops
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is absent, or a scheduling/storage error
    pub async fn set_active(&self, id: &str, active: bool) -> AppResult<Reminder> {
        self.change_activation(id, |_| active).await
    }

    async fn change_activation(
        &self,
        id: &str,
        next: impl FnOnce(bool) -> bool + Send,
    ) -> AppResult<Reminder> {
        let _guard = self.writer.lock().await;
        let settings = self.store.load_settings().await?;
        let mut reminders = self.store.load_reminders().await?;
        let index = Self::position(&reminders, id)?;

        let mut reminder = reminders[index].clone();
        reminder.is_active = next(reminder.is_active);
        info!(reminder_id = %id, active = reminder.is_active, "Reminder activation changed");

        if !reminder.is_active {
            self.cancel_triggers(&mut reminder).await?;
            self.write_back(&mut reminders, &reminder).await?;
            return Ok(reminder);
        }

        let outcome = self.schedule_reminder(&mut reminder, &settings).await;
        self.write_back(&mut reminders, &reminder).await?;
        outcome?;
        Ok(reminder)
    }

    /// Cancel a reminder's triggers and remove it
    ///
    /// Returns whether a record was removed; an absent id is a no-op so a
    /// user delete racing the reconciler's self-expiry never fails.
    ///
    /// # Errors
    ///
    /// Returns an error if cancellation or the store write fails
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let _guard = self.writer.lock().await;
        let mut reminders = self.store.load_reminders().await?;
        let Some(index) = reminders.iter().position(|reminder| reminder.id == id) else {
            debug!(reminder_id = %id, "Delete of absent reminder ignored");
            return Ok(false);
        };

        let mut reminder = reminders.remove(index);
        self.cancel_triggers(&mut reminder).await?;
        self.store.save_reminders(&reminders).await?;
        info!(reminder_id = %id, "Reminder deleted");
        Ok(true)
    }

    /// Remove a fired reminder if, and only if, it is still one-time
    ///
    /// The type check and the removal happen under the writer lock, so an
    /// update that turns the reminder recurring either lands first and keeps
    /// it, or lands after and finds it gone.
    ///
    /// # Errors
    ///
    /// Returns an error if cancellation or the store read/write fails
    pub async fn expire_one_time(&self, id: &str) -> AppResult<Expiry> {
        let _guard = self.writer.lock().await;
        let mut reminders = self.store.load_reminders().await?;
        let Some(index) = reminders.iter().position(|reminder| reminder.id == id) else {
            return Ok(Expiry::Absent);
        };
        if !reminders[index].is_one_time() {
            return Ok(Expiry::Retained);
        }

        let mut reminder = reminders.remove(index);
        self.cancel_triggers(&mut reminder).await?;
        self.store.save_reminders(&reminders).await?;
        info!(reminder_id = %id, "One-time reminder removed after firing");
        Ok(Expiry::Expired)
    }

    /// Re-run the schedule step for every active reminder
    ///
    /// Used after a settings change or an app restart. Individual dispatch
    /// failures are logged and reported in the summary.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` if permission is missing, or a storage error
    pub async fn reschedule_all(&self) -> AppResult<RescheduleSummary> {
        let _guard = self.writer.lock().await;
        let settings = self.store.load_settings().await?;
        self.reschedule_all_locked(&settings).await
    }

    async fn reschedule_all_locked(
        &self,
        settings: &ReminderSettings,
    ) -> AppResult<RescheduleSummary> {
        let mut reminders = self.store.load_reminders().await?;
        let mut summary = RescheduleSummary::default();

        let any_active = reminders.iter().any(|reminder| reminder.is_active);
        if any_active && settings.enabled && !self.dispatcher.request_permissions().await? {
            return Err(AppError::permission_denied());
        }

        for reminder in reminders.iter_mut().filter(|reminder| reminder.is_active) {
            match self.schedule_reminder(reminder, settings).await {
                Ok(ScheduleOutcome::Scheduled(_)) => summary.scheduled += 1,
                Ok(_) => summary.skipped += 1,
                Err(error) => {
                    warn!(reminder_id = %reminder.id, error = %error, "Reschedule failed");
                    summary.failed.push(reminder.id.clone());
                }
            }
        }

        self.store.save_reminders(&reminders).await?;
        info!(
            scheduled = summary.scheduled,
            skipped = summary.skipped,
            failed = summary.failed.len(),
            "Reminders rescheduled"
        );
        Ok(summary)
    }

    /// Cancel every platform trigger, keeping each reminder's intent
    ///
    /// Clears every stored handle but leaves `is_active` untouched so a later
    /// [`Self::reschedule_all`] restores the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform call or the store write fails
    pub async fn cancel_all_notifications(&self) -> AppResult<()> {
        let _guard = self.writer.lock().await;
        self.cancel_all_locked().await
    }

    async fn cancel_all_locked(&self) -> AppResult<()> {
        self.dispatcher.cancel_all().await?;
        let mut reminders = self.store.load_reminders().await?;
        for reminder in &mut reminders {
            reminder.notification_ids.clear();
        }
        self.store.save_reminders(&reminders).await?;
        info!(reminders = reminders.len(), "All reminder notifications cancelled");
        Ok(())
    }

    /// Per-reminder schedule step shared by every operation
    async fn schedule_reminder(
        &self,
        reminder: &mut Reminder,
        settings: &ReminderSettings,
    ) -> AppResult<ScheduleOutcome> {
        if !settings.enabled {
            debug!(reminder_id = %reminder.id, "Reminders disabled globally, not scheduling");
            return Ok(ScheduleOutcome::Disabled);
        }

        self.cancel_triggers(reminder).await?;
        if !reminder.is_active {
            return Ok(ScheduleOutcome::Inactive);
        }

        if !self.dispatcher.request_permissions().await? {
            return Err(AppError::permission_denied().with_reminder_id(reminder.id.clone()));
        }

        let triggers = match self.calculator.plan(reminder, settings, self.clock.now()) {
            TriggerPlan::Schedule(triggers) => triggers,
            TriggerPlan::TooSoon { fire_at } => {
                info!(
                    reminder_id = %reminder.id,
                    fire_at = %fire_at,
                    "Trigger too close to now, not scheduled"
                );
                return Ok(ScheduleOutcome::TooSoon);
            }
        };

        let payload = NotificationPayload::for_reminder(reminder, settings, &self.notification_title);
        for trigger in &triggers {
            let handle = self
                .dispatcher
                .schedule(trigger, &payload)
                .await
                .map_err(|error| Self::as_dispatch_failure(error, &reminder.id))?;
            debug!(reminder_id = %reminder.id, handle = %handle, trigger = %trigger, "Trigger scheduled");
            reminder.notification_ids.push(handle);
        }

        Ok(ScheduleOutcome::Scheduled(triggers.len()))
    }

    /// Cancel stored handles plus any platform trigger carrying this reminder's id
    async fn cancel_triggers(&self, reminder: &mut Reminder) -> AppResult<()> {
        for handle in std::mem::take(&mut reminder.notification_ids) {
            self.dispatcher.cancel(&handle).await?;
        }

        let orphans = self
            .dispatcher
            .list_scheduled()
            .await?
            .into_iter()
            .filter(|scheduled| scheduled.payload.data.reminder_id == reminder.id);
        for orphan in orphans {
            warn!(reminder_id = %reminder.id, handle = %orphan.handle, "Cancelling orphaned trigger");
            self.dispatcher.cancel(&orphan.handle).await?;
        }
        Ok(())
    }

    /// Replace the stored copy of `reminder` and persist the list
    async fn write_back(&self, reminders: &mut [Reminder], reminder: &Reminder) -> AppResult<()> {
        if let Some(slot) = reminders.iter_mut().find(|stored| stored.id == reminder.id) {
            slot.clone_from(reminder);
        }
        self.store.save_reminders(reminders).await
    }

    fn position(reminders: &[Reminder], id: &str) -> AppResult<usize> {
        reminders
            .iter()
            .position(|reminder| reminder.id == id)
            .ok_or_else(|| AppError::not_found(id))
    }

    fn as_dispatch_failure(error: AppError, reminder_id: &str) -> AppError {
        if error.code == ErrorCode::DispatchFailure {
            return error;
        }
        AppError::dispatch_failure(format!("Scheduling failed: {}", error.message))
            .with_reminder_id(reminder_id)
            .with_source(error)
    }
}
