//! Error types shared across Huelock crates.

use std::path::PathBuf;

/// Top-level error type for Huelock operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Actuation error: {message}")]
    Actuation { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid profile name: {name:?}")]
    InvalidProfileName { name: String },

    #[error("Profile not found: {path}")]
    ProfileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using TrackError.
pub type TrackResult<T> = Result<T, TrackError>;

impl TrackError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn actuation(msg: impl Into<String>) -> Self {
        Self::Actuation {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
