// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Database location helpers for pierre-reminders
// ABOUTME: Creates the parent directory of a file-backed sqlite URL

use pierre_reminders::errors::{AppError, AppResult};
use std::path::Path;

/// Create the directory holding a `sqlite:` database file
///
/// In-memory URLs and bare filenames need nothing.
pub fn ensure_database_dir(database_url: &str) -> AppResult<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            }),
        _ => Ok(()),
    }
}
