// ABOUTME: Fired-event reconciler retiring one-time reminders after delivery or tap
// ABOUTME: Consumes dispatcher events on a background task and never propagates errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fired-Event Reconciler
//!
//! Delivered and tapped events both route to [`FiredEventReconciler::handle_event`].
//! One-time reminders are deleted through
//! [`ReminderManager::expire_one_time`], which checks the type and removes the
//! record in one locked step; recurring reminders are left untouched. A reminder that is already gone is the
//! expected outcome of a race with a user delete and is logged at debug level.
//!
//! Store or dispatcher failures are logged and reported as
//! [`ReconcileOutcome::Failed`]; nothing is retried and nothing propagates back
//! into the event path.

use crate::lifecycle::{Expiry, ReminderManager};
use crate::notifications::NotificationEvent;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// What the reconciler did with one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// One-time reminder deleted
    Expired(String),
    /// Recurring reminder left in place
    Retained(String),
    /// Reminder no longer exists
    AlreadyRemoved(String),
    /// Event payload is not a workout reminder
    Ignored,
    /// Lookup or delete failed; the error was logged
    Failed(String),
}

/// Applies self-expiry to fired notifications
#[derive(Clone)]
pub struct FiredEventReconciler {
    manager: Arc<ReminderManager>,
}

impl FiredEventReconciler {
    /// Create a reconciler bound to a lifecycle manager
    #[must_use]
    pub const fn new(manager: Arc<ReminderManager>) -> Self {
        Self { manager }
    }

    /// Reconcile one delivered or tapped event
    pub async fn handle_event(&self, event: &NotificationEvent) -> ReconcileOutcome {
        let Some(data) = event.reminder_data() else {
            debug!(kind = ?event.kind, "Ignoring notification event without reminder data");
            return ReconcileOutcome::Ignored;
        };
        let id = data.reminder_id;

        match self.manager.expire_one_time(&id).await {
            Ok(Expiry::Expired) => {
                info!(reminder_id = %id, kind = ?event.kind, "One-time reminder expired");
                ReconcileOutcome::Expired(id)
            }
            Ok(Expiry::Retained) => {
                debug!(reminder_id = %id, kind = ?event.kind, "Recurring reminder fired");
                ReconcileOutcome::Retained(id)
            }
            Ok(Expiry::Absent) => {
                debug!(reminder_id = %id, "Fired reminder already removed");
                ReconcileOutcome::AlreadyRemoved(id)
            }
            Err(e) => {
                error!(reminder_id = %id, error = %e, "Failed to expire one-time reminder");
                ReconcileOutcome::Failed(id)
            }
        }
    }

    /// Run the reconciler over an event stream on a background task
    ///
    /// The task ends when the stream closes or the returned handle is shut down.
    #[must_use]
    pub fn spawn(self, mut events: broadcast::Receiver<NotificationEvent>) -> ReconcilerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    received = events.recv() => match received {
                        Ok(event) => {
                            self.handle_event(&event).await;
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Reconciler lagged behind notification events");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            debug!("Notification event stream closed");
                            break;
                        }
                    },
                    _ = shutdown_rx.recv() => {
                        debug!("Reconciler received shutdown signal");
                        break;
                    }
                }
            }
        });

        ReconcilerHandle { shutdown_tx, task }
    }
}

/// Handle to a running reconciler task
pub struct ReconcilerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ReconcilerHandle {
    /// Stop the task and wait for it to finish
    pub async fn shutdown(self) {
        if let Err(e) = self.shutdown_tx.send(()).await {
            debug!(error = ?e, "Reconciler already stopped");
        }
        if let Err(e) = self.task.await {
            warn!(error = %e, "Reconciler task ended abnormally");
        }
    }

    /// Whether the task has exited
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
