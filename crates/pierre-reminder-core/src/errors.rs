// ABOUTME: Unified error types for the reminder engine with standard error codes
// ABOUTME: Covers missing reminders, notification permission, dispatch, and storage failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the reminder engine returns [`AppResult`]. The
//! [`ErrorCode`] classifies the failure so callers can decide how loudly to
//! surface it: permission and dispatch failures need an actionable message,
//! a missing reminder during reconciliation is silent.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the reminder engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied an invalid value
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// Referenced reminder does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Platform notifications (5000-5999)
    /// Notification permission has not been granted
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 5000,
    /// The platform rejected a scheduling call
    #[serde(rename = "DISPATCH_FAILURE")]
    DispatchFailure = 5001,

    // Configuration (6000-6999)
    /// Configuration could not be loaded
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Reminder store read/write failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Stored JSON could not be (de)serialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a generic description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested reminder was not found",
            Self::PermissionDenied => "Notification permission has not been granted",
            Self::DispatchFailure => "The notification could not be scheduled",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Reminder storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the failure should be shown to the user with a call to action
    #[must_use]
    pub const fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::DispatchFailure | Self::InvalidInput
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Reminder ID if applicable
    pub reminder_id: Option<String>,
    /// Additional key-value context
    pub details: Option<serde_json::Value>,
}

/// Unified error type for the reminder engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a reminder ID to the error context
    #[must_use]
    pub fn with_reminder_id(mut self, reminder_id: impl Into<String>) -> Self {
        self.context.reminder_id = Some(reminder_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = Some(details);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Message suitable for showing to the end user
    ///
    /// Permission and dispatch failures carry an explicit next step.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.code {
            ErrorCode::PermissionDenied => {
                "Notifications are turned off for this app. Enable them in your device settings to receive workout reminders.".to_owned()
            }
            ErrorCode::DispatchFailure => {
                "Your reminder was saved but could not be scheduled. Try turning it off and on again.".to_owned()
            }
            ErrorCode::InvalidInput => self.message.clone(),
            _ => self.code.description().to_owned(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Reminder not found
    pub fn not_found(reminder_id: impl Into<String>) -> Self {
        let reminder_id = reminder_id.into();
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("Reminder {reminder_id} not found"),
        )
        .with_reminder_id(reminder_id)
    }

    /// Notification permission denied
    pub fn permission_denied() -> Self {
        Self::new(
            ErrorCode::PermissionDenied,
            "Notification permission was not granted",
        )
    }

    /// Platform scheduling call rejected
    pub fn dispatch_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DispatchFailure, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("Invalid stored JSON: {error}"),
        )
        .with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::storage(format!("Database operation failed: {error}")).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_reminder_id() {
        let error = AppError::not_found("abc");
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.context.reminder_id.as_deref(), Some("abc"));
        assert!(error.to_string().contains("abc"));
    }

    #[test]
    fn test_actionable_messages() {
        assert!(AppError::permission_denied()
            .user_message()
            .contains("device settings"));
        assert!(AppError::dispatch_failure("rejected")
            .user_message()
            .contains("saved"));
        assert!(!ErrorCode::ResourceNotFound.is_user_actionable());
        assert!(ErrorCode::PermissionDenied.is_user_actionable());
    }

    #[test]
    fn test_serde_json_conversion() {
        let parse_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: AppError = parse_error.into();
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(std::error::Error::source(&error).is_some());
    }
}
