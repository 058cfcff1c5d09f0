// ABOUTME: Notification dispatcher capability over the platform's local notification scheduler
// ABOUTME: Defines payloads, delivered/tapped events, and the schedule/cancel/list contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Notification Dispatcher
//!
//! Thin facade over the platform scheduling primitive. The engine hands it a
//! [`Trigger`] plus a [`NotificationPayload`] and gets back an opaque
//! [`NotificationHandle`]. Delivery after that point is the platform's job.
//!
//! Delivered and tapped notifications are surfaced as [`NotificationEvent`]s on
//! a broadcast channel; both carry the `data` object passed at schedule time.

/// In-memory dispatcher
pub mod memory;

use crate::constants::notification;
use crate::errors::AppResult;
use crate::scheduling::Trigger;
use async_trait::async_trait;
use pierre_reminder_core::models::{NotificationHandle, Reminder, ReminderSettings};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub use memory::InMemoryDispatcher;

/// Data object attached to every workout reminder notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Reminder that scheduled the notification
    pub reminder_id: String,
    /// Workout label at schedule time
    pub workout_name: String,
    /// Always `workout_reminder` for notifications owned by this engine
    #[serde(rename = "type")]
    pub kind: String,
}

impl NotificationData {
    /// Whether this payload belongs to the reminder engine
    #[must_use]
    pub fn is_workout_reminder(&self) -> bool {
        self.kind == notification::WORKOUT_REMINDER_KIND
    }
}

/// Everything the platform needs to present a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
    /// Play a sound
    pub sound: bool,
    /// Vibrate
    pub vibrate: bool,
    /// Data echoed back in delivered/tapped events
    pub data: NotificationData,
}

impl NotificationPayload {
    /// Build the payload for a reminder under the current settings
    #[must_use]
    pub fn for_reminder(reminder: &Reminder, settings: &ReminderSettings, title: &str) -> Self {
        Self {
            title: title.to_owned(),
            body: notification::body_for(&reminder.workout_name),
            sound: settings.sound_enabled,
            vibrate: settings.vibration_enabled,
            data: NotificationData {
                reminder_id: reminder.id.clone(),
                workout_name: reminder.workout_name.clone(),
                kind: notification::WORKOUT_REMINDER_KIND.to_owned(),
            },
        }
    }
}

/// A notification currently registered with the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    /// Handle returned at schedule time
    pub handle: NotificationHandle,
    /// When it fires
    pub trigger: Trigger,
    /// What it shows
    pub payload: NotificationPayload,
}

/// How the platform reported a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEventKind {
    /// Shown to the user, app foregrounded or backgrounded
    Delivered,
    /// User tapped the notification
    Tapped,
}

/// Platform notification event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Delivered or tapped
    pub kind: NotificationEventKind,
    /// Handle of the notification, when the platform reports it
    pub handle: Option<NotificationHandle>,
    /// Raw `data` object from the payload
    pub data: serde_json::Value,
}

impl NotificationEvent {
    /// Decode the reminder data, `None` if the payload is not ours
    #[must_use]
    pub fn reminder_data(&self) -> Option<NotificationData> {
        serde_json::from_value::<NotificationData>(self.data.clone())
            .ok()
            .filter(NotificationData::is_workout_reminder)
    }
}

/// Platform local-notification capability
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Ask the user for notification permission
    ///
    /// # Errors
    ///
    /// Returns an error if the platform permission API fails
    async fn request_permissions(&self) -> AppResult<bool>;

    /// Register a notification with the platform
    ///
    /// # Errors
    ///
    /// Returns `DispatchFailure` if the platform rejects the trigger
    async fn schedule(
        &self,
        trigger: &Trigger,
        payload: &NotificationPayload,
    ) -> AppResult<NotificationHandle>;

    /// Cancel one notification; unknown handles are ignored
    ///
    /// # Errors
    ///
    /// Returns `DispatchFailure` if the platform call fails
    async fn cancel(&self, handle: &NotificationHandle) -> AppResult<()>;

    /// Cancel every notification scheduled by this app
    ///
    /// # Errors
    ///
    /// Returns `DispatchFailure` if the platform call fails
    async fn cancel_all(&self) -> AppResult<()>;

    /// List every notification still registered
    ///
    /// # Errors
    ///
    /// Returns `DispatchFailure` if the platform call fails
    async fn list_scheduled(&self) -> AppResult<Vec<ScheduledNotification>>;

    /// Subscribe to delivered/tapped events
    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent>;
}
