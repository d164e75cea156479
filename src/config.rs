//! Configuration loading for Warden platform services.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.warden/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The components run with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FailOpen, Result, WardenError};
use crate::settings::ActionKind;

/// Main configuration struct for Warden platform services.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Review prompt gate configuration.
    pub review: ReviewConfig,
    /// Log aggregator configuration.
    pub logs: LogsConfig,
}

/// Review prompt gate configuration.
///
/// Each action kind carries its own threshold. They all default to the same
/// value but are independently configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewConfig {
    /// Add actions required before the add counter counts as met.
    pub add_threshold: u32,
    /// Copy actions required before the copy counter counts as met.
    pub copy_threshold: u32,
    /// Create actions required before the create counter counts as met.
    pub create_threshold: u32,
}

/// Default action count required for each action kind.
pub const DEFAULT_ACTION_THRESHOLD: u32 = 3;

/// Minimum valid threshold value (0 would mean "always met").
pub const MIN_THRESHOLD: u32 = 1;

impl ReviewConfig {
    /// Check if a threshold value is valid (must be >= 1).
    pub fn is_valid_threshold(value: u32) -> bool {
        value >= MIN_THRESHOLD
    }

    /// Get the threshold for a specific action kind.
    pub fn threshold(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Add => self.add_threshold,
            ActionKind::Copy => self.copy_threshold,
            ActionKind::Create => self.create_threshold,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            add_threshold: DEFAULT_ACTION_THRESHOLD,
            copy_threshold: DEFAULT_ACTION_THRESHOLD,
            create_threshold: DEFAULT_ACTION_THRESHOLD,
        }
    }
}

/// Log aggregator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogsConfig {
    /// Ring buffer capacity for retained loggable results.
    pub buffer_capacity: usize,
    /// Publish channel capacity for reports awaiting a subscriber.
    pub publish_capacity: usize,
}

/// Minimum valid capacity for the ring buffer and the publish channel.
pub const MIN_CAPACITY: usize = 1;

impl LogsConfig {
    /// Check if a capacity value is valid (must be >= 1).
    pub fn is_valid_capacity(value: usize) -> bool {
        value >= MIN_CAPACITY
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 1,
            publish_capacity: 64,
        }
    }
}

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. User config (`~/.warden/config.toml`)
    /// 3. Defaults
    pub fn load() -> Self {
        let mut config = Self::load_user_config().unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// Load config with fail-open behavior.
    ///
    /// If loading fails for any reason, returns defaults.
    pub fn load_fail_open() -> Self {
        let result: Result<Self> = Ok(Self::load());
        result.fail_open_default("loading config")
    }

    /// Load user config from `<warden_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = warden_home()?;
        let config_path = home.join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load config from a specific file path.
    fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| WardenError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| WardenError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        for (var, slot) in [
            ("WARDEN_ADD_THRESHOLD", &mut self.review.add_threshold),
            ("WARDEN_COPY_THRESHOLD", &mut self.review.copy_threshold),
            ("WARDEN_CREATE_THRESHOLD", &mut self.review.create_threshold),
        ] {
            if let Ok(val) = env::var(var) {
                match val.parse::<u32>() {
                    Ok(n) if ReviewConfig::is_valid_threshold(n) => *slot = n,
                    Ok(n) => eprintln!(
                        "Warning: Invalid {} value '{}'. Must be >= {}. Using default '{}'.",
                        var, n, MIN_THRESHOLD, slot
                    ),
                    Err(_) => eprintln!(
                        "Warning: Invalid {} value '{}'. \
                        Expected a positive integer. Using default '{}'.",
                        var, val, slot
                    ),
                }
            }
        }

        for (var, slot) in [
            ("WARDEN_LOG_BUFFER_CAPACITY", &mut self.logs.buffer_capacity),
            (
                "WARDEN_LOG_PUBLISH_CAPACITY",
                &mut self.logs.publish_capacity,
            ),
        ] {
            if let Ok(val) = env::var(var) {
                match val.parse::<usize>() {
                    Ok(n) if LogsConfig::is_valid_capacity(n) => *slot = n,
                    Ok(n) => eprintln!(
                        "Warning: Invalid {} value '{}'. Must be >= {}. Using default '{}'.",
                        var, n, MIN_CAPACITY, slot
                    ),
                    Err(_) => eprintln!(
                        "Warning: Invalid {} value '{}'. \
                        Expected a positive integer. Using default '{}'.",
                        var, val, slot
                    ),
                }
            }
        }
    }
}

/// Get the Warden home directory.
///
/// Checks the `WARDEN_HOME` environment variable first, then falls back to
/// `~/.warden`.
///
/// If `WARDEN_HOME` is set it must be non-empty; relative paths are
/// canonicalized when possible. Invalid values are ignored and we fall back
/// to the default.
pub fn warden_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("WARDEN_HOME") {
        if home.is_empty() {
            tracing::warn!("WARDEN_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("WARDEN_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".warden"));
    }

    // Fallback for containerized/minimal environments without HOME
    let fallback_path = fallback_warden_home();
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Get fallback warden home path when HOME is unavailable.
#[cfg(unix)]
fn fallback_warden_home() -> PathBuf {
    use std::os::unix::fs::MetadataExt;
    // Get UID for unique temp directory
    let uid = std::fs::metadata("/").map(|m| m.uid()).unwrap_or(0);
    PathBuf::from(format!("/tmp/warden-{}", uid))
}

/// Get fallback warden home path when HOME is unavailable.
#[cfg(not(unix))]
fn fallback_warden_home() -> PathBuf {
    std::env::temp_dir().join("warden")
}

/// Get the per-user settings directory.
///
/// Returns `<warden_home>/settings/`.
pub fn settings_dir() -> Option<PathBuf> {
    warden_home().map(|h| h.join("settings"))
}
