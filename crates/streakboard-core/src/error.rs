//! Core error types for streakboard-core.
//!
//! This module defines the error hierarchy using thiserror. Each subsystem
//! owns a focused enum; [`CoreError`] wraps them for callers that do not
//! care which layer failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for streakboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Tracker lifecycle errors
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// REST API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config directory could not be created or located
    #[error("Config directory unavailable at {path}: {source}")]
    DirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Timestamp could not be parsed into an instant
    #[error("Invalid date: {0:?}")]
    InvalidTimestamp(String),

    /// Epoch value outside the representable range
    #[error("Epoch milliseconds out of range: {0}")]
    EpochOutOfRange(i64),

    /// Instant lies in the future where only past instants are allowed
    #[error("Cannot select a future date: {0}")]
    FutureInstant(chrono::DateTime<chrono::Utc>),

    /// Required field left empty
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    /// Password shorter than the minimum
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Password confirmation differs
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Avatar upload rejected before sending
    #[error("{0}")]
    Avatar(String),
}

/// Tracker lifecycle errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// `activate` was called outside a Tokio runtime, so no timer can run
    #[error("no Tokio runtime available to schedule the streak timer")]
    NoRuntime,

    /// A zero refresh period would spin
    #[error("tick period must be greater than zero")]
    ZeroPeriod,
}

/// REST API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("{detail} (HTTP {status})")]
    Status { status: u16, detail: String },

    /// Endpoint requires a bearer token and none is stored
    #[error("Not logged in")]
    NotAuthenticated,

    /// Base URL could not be joined with an endpoint path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Local file for upload could not be read
    #[error("Failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request rejected client-side before sending
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_shows_backend_detail() {
        let err = ApiError::Status {
            status: 404,
            detail: "User not found".into(),
        };
        assert_eq!(err.to_string(), "User not found (HTTP 404)");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::PasswordMismatch.into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Passwords do not match");
    }
}
