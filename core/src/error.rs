//! Error types for the friends client.
//!
//! # Design
//! The three variants of `ApiError` never overlap. `Transport` means no
//! response arrived at all. `Status` means a response arrived with a status
//! of 300 or more, and it wins over any body, valid JSON or not. `Decode`
//! only ever follows a successful status.

use thiserror::Error;

/// Errors returned by friends operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The call never completed: DNS, connect, TLS, timeout or a broken read.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a status of 300 or more.
    #[error("HTTP {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    /// The body of a successful response did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The HTTP status for `Status` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors raised while reading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be an http or https URL, got {value:?}")]
    InvalidBaseUrl { var: &'static str, value: String },
}
