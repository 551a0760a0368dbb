// SPDX-License-Identifier: GPL-3.0-only
//! Error types for the subsystem
//!
//! Validation errors at the configuration boundary are returned
//! synchronously and have no side effects. Failures inside the deferred
//! worker are never surfaced to callers; they show up in logs only.

use thiserror::Error;

/// Main subsystem error type
#[derive(Error, Debug)]
pub enum LiveDisplayError {
    /// Panel, context or attribute is absent or already torn down
    #[error("no such device: {0}")]
    NoSuchDevice(&'static str),

    /// Out-of-range value or malformed/oversized input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Attribute installation on a panel device failed
    #[error("failed to register attribute {name}")]
    Registration { name: &'static str },

    /// Color pipeline programming error
    #[error("color pipeline error: {0}")]
    Pipeline(#[from] anyhow::Error),
}

/// Result type alias for LiveDisplayError
pub type Result<T> = std::result::Result<T, LiveDisplayError>;
