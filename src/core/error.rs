//! Error types for form validation, remote calls and the embedding surface.
//!
//! The `Display` output of [`ApiError`] is what the views show under the
//! triggering form, so it stays short: `HTTP 500`, the transport error's own
//! description, or the validation message.

use thiserror::Error;

/// Local validation failure detected before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("x and y are required")]
    MissingAxes,

    #[error("{field} must be a number")]
    InvalidNumber { field: &'static str },

    #[error("{field} must be a whole number of at least 0")]
    OutOfRange { field: &'static str },
}

/// Failure of a single submission.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the failure happened locally, without touching the network.
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

/// Failure while mounting or opening an embedded document.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open {path}: {reason}")]
    Open { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
