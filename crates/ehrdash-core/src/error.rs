// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the EHR dashboard.

use thiserror::Error;

/// Top-level error type for all dashboard operations.
#[derive(Debug, Error)]
pub enum EhrDashError {
    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    // -- Data ingestion --
    /// Only raised by the strict CSV mode; the default scanner never fails.
    #[error("CSV error on line {line}: {reason}")]
    Csv { line: usize, reason: String },

    // -- HTTP surface --
    #[error("malformed HTTP request: {0}")]
    Http(String),

    #[error("dashboard server error: {0}")]
    Server(String),

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Notifications --
    #[error("notification failed: {0}")]
    Notify(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, EhrDashError>;
