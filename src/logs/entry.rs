//! A single captured diagnostic entry.

use std::error::Error;
use std::fmt;

/// The outcome of an operation worth surfacing in a diagnostic report.
///
/// Either side may be absent. Entries where both sides are absent (or the
/// message is empty and there is no error) carry no information and are
/// rejected by the aggregator.
pub struct LoggableResult {
    /// Human-readable description of what happened.
    pub message: Option<String>,
    /// The error that occurred, if any.
    pub error: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl LoggableResult {
    /// Build an entry from a message alone.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    /// Build an entry from an error alone.
    pub fn from_error(error: impl Error + Send + Sync + 'static) -> Self {
        Self {
            message: None,
            error: Some(Box::new(error)),
        }
    }

    /// Build an entry carrying both a message and an error.
    pub fn new(
        message: impl Into<String>,
        error: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: Some(message.into()),
            error: Some(Box::new(error)),
        }
    }

    /// Whether this entry carries nothing worth reporting.
    ///
    /// True when the message is absent or empty and there is no error.
    pub fn has_nothing_to_capture(&self) -> bool {
        let message_is_blank = self.message.as_deref().map_or(true, str::is_empty);
        message_is_blank && self.error.is_none()
    }
}

impl fmt::Debug for LoggableResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggableResult")
            .field("message", &self.message)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

/// Render an error and its source chain as a single string.
///
/// The error's display form comes first, followed by one "caused by" line
/// per source in the chain.
pub fn format_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str("\ncaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
