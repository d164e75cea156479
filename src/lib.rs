//! Warden - review prompt gating and diagnostic log aggregation
//!
//! Warden decides when a password-manager client should ask its user for an
//! app-store review, and collects diagnostic log entries into a bounded
//! buffer for one-shot publication. Qualifying actions are counted per user
//! up to a configurable threshold; the prompt fires at most once per user,
//! and only while an alternate input method is enabled.

pub mod auth;
pub mod config;
pub mod error;
pub mod logs;
pub mod review;
pub mod settings;

pub use auth::{ActiveUserSource, AuthState};
pub use config::{Config, LogsConfig, ReviewConfig};
pub use error::{FailOpen, Result, WardenError};
pub use logs::{
    certificate_chain_text, format_error_chain, BoundedBuffer, CertPathValidationError,
    CertificateInfo, LogAggregator, LogCaptureLayer, LoggableResult,
};
pub use review::{FlagSignal, ReviewPromptGate};
pub use settings::{ActionKind, FileSettingsStore, MemorySettingsStore, SettingsStore, UserSettings};
