//! Unified error types for Warden platform services.
//!
//! Both the review gate and the log aggregator follow a no-throw policy at
//! their public surface: a missing active user, a missing counter, or an
//! empty log entry silently skips the operation. Infrastructure errors from
//! collaborators (settings storage, config files) are therefore handled
//! fail-open: log a warning and fall back to a safe default rather than
//! surfacing a failure to the host application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Warden operations.
#[derive(Error, Debug)]
pub enum WardenError {
    /// I/O errors from settings file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for Warden operations.
pub type Result<T> = std::result::Result<T, WardenError>;

impl WardenError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<io::Error> for WardenError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for WardenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Provides methods for degrading errors to safe defaults: log a warning
/// and keep going. The review gate uses this so that a broken settings
/// store reads as "no counts recorded" instead of panicking or erroring
/// in the middle of a user-facing flow.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}
