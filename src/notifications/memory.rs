// ABOUTME: In-memory notification dispatcher that records scheduled triggers
// ABOUTME: Simulates delivery and taps on a broadcast channel for hosts without a platform scheduler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    NotificationDispatcher, NotificationEvent, NotificationEventKind, NotificationPayload,
    ScheduledNotification,
};
use crate::errors::{AppError, AppResult};
use crate::scheduling::Trigger;
use async_trait::async_trait;
use pierre_reminder_core::models::NotificationHandle;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

/// Dispatcher that keeps scheduled notifications in memory
///
/// Clones share state. Permission and rejection switches let callers
/// exercise the failure paths of the lifecycle manager.
#[derive(Clone)]
pub struct InMemoryDispatcher {
    scheduled: Arc<RwLock<Vec<ScheduledNotification>>>,
    events: broadcast::Sender<NotificationEvent>,
    permission_granted: Arc<AtomicBool>,
    reject_scheduling: Arc<AtomicBool>,
    schedule_limit: Arc<AtomicUsize>,
    schedule_calls: Arc<AtomicUsize>,
}

impl InMemoryDispatcher {
    /// Create a dispatcher with permission granted
    #[must_use]
    pub fn new(event_buffer: usize) -> Self {
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Self {
            scheduled: Arc::new(RwLock::new(Vec::new())),
            events,
            permission_granted: Arc::new(AtomicBool::new(true)),
            reject_scheduling: Arc::new(AtomicBool::new(false)),
            schedule_limit: Arc::new(AtomicUsize::new(usize::MAX)),
            schedule_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Grant or revoke notification permission
    pub fn set_permission(&self, granted: bool) {
        self.permission_granted.store(granted, Ordering::SeqCst);
    }

    /// Make every subsequent `schedule` call fail
    pub fn set_reject_scheduling(&self, reject: bool) {
        self.reject_scheduling.store(reject, Ordering::SeqCst);
    }

    /// Accept only `limit` more `schedule` calls, then reject; `None` lifts the limit
    pub fn set_schedule_limit(&self, limit: Option<usize>) {
        self.schedule_limit
            .store(limit.unwrap_or(usize::MAX), Ordering::SeqCst);
    }

    /// Number of `schedule` calls made, including rejected ones
    #[must_use]
    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    /// Number of notifications currently registered
    pub async fn live_count(&self) -> usize {
        self.scheduled.read().await.len()
    }

    /// Simulate the platform delivering a notification
    ///
    /// One-shot notifications are removed once delivered.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no notification has this handle
    pub async fn deliver(&self, handle: &NotificationHandle) -> AppResult<()> {
        let mut scheduled = self.scheduled.write().await;
        let position = scheduled
            .iter()
            .position(|entry| &entry.handle == handle)
            .ok_or_else(|| AppError::not_found(handle.as_str()))?;

        let entry = if matches!(scheduled[position].trigger, Trigger::Instant(_)) {
            scheduled.remove(position)
        } else {
            scheduled[position].clone()
        };
        drop(scheduled);

        self.emit(NotificationEventKind::Delivered, &entry)
    }

    /// Simulate the user tapping a notification
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no notification has this handle
    pub async fn tap(&self, handle: &NotificationHandle) -> AppResult<()> {
        let entry = self
            .scheduled
            .read()
            .await
            .iter()
            .find(|entry| &entry.handle == handle)
            .cloned()
            .ok_or_else(|| AppError::not_found(handle.as_str()))?;

        self.emit(NotificationEventKind::Tapped, &entry)
    }

    fn emit(&self, kind: NotificationEventKind, entry: &ScheduledNotification) -> AppResult<()> {
        let event = NotificationEvent {
            kind,
            handle: Some(entry.handle.clone()),
            data: serde_json::to_value(&entry.payload.data)?,
        };
        // No subscribers is not an error: nobody is reconciling yet
        match self.events.send(event) {
            Ok(receivers) => {
                debug!(?kind, handle = %entry.handle, receivers, "Notification event emitted");
            }
            Err(_) => {
                debug!(?kind, handle = %entry.handle, "Notification event dropped, no subscribers");
            }
        }
        Ok(())
    }
}

impl Default for InMemoryDispatcher {
    fn default() -> Self {
        Self::new(crate::constants::notification::DEFAULT_EVENT_BUFFER)
    }
}

#[async_trait]
impl NotificationDispatcher for InMemoryDispatcher {
    async fn request_permissions(&self) -> AppResult<bool> {
        Ok(self.permission_granted.load(Ordering::SeqCst))
    }

    async fn schedule(
        &self,
        trigger: &Trigger,
        payload: &NotificationPayload,
    ) -> AppResult<NotificationHandle> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        let within_limit = self
            .schedule_limit
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                usize::MAX => Some(usize::MAX),
                0 => None,
                left => Some(left - 1),
            })
            .is_ok();
        if !within_limit || self.reject_scheduling.load(Ordering::SeqCst) {
            return Err(AppError::dispatch_failure(format!(
                "Platform rejected trigger {trigger}"
            ))
            .with_reminder_id(payload.data.reminder_id.clone()));
        }

        let handle = NotificationHandle::generate();
        info!(
            handle = %handle,
            reminder_id = %payload.data.reminder_id,
            trigger = %trigger,
            "Notification scheduled"
        );
        self.scheduled.write().await.push(ScheduledNotification {
            handle: handle.clone(),
            trigger: *trigger,
            payload: payload.clone(),
        });
        Ok(handle)
    }

    async fn cancel(&self, handle: &NotificationHandle) -> AppResult<()> {
        let mut scheduled = self.scheduled.write().await;
        let before = scheduled.len();
        scheduled.retain(|entry| &entry.handle != handle);
        if scheduled.len() < before {
            debug!(handle = %handle, "Notification cancelled");
        }
        Ok(())
    }

    async fn cancel_all(&self) -> AppResult<()> {
        let mut scheduled = self.scheduled.write().await;
        let removed = scheduled.len();
        scheduled.clear();
        drop(scheduled);
        info!(removed, "All notifications cancelled");
        Ok(())
    }

    async fn list_scheduled(&self) -> AppResult<Vec<ScheduledNotification>> {
        Ok(self.scheduled.read().await.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }
}
