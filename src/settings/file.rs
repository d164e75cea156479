//! File-based settings storage.
//!
//! Per-user settings are stored as JSON files in `~/.warden/settings/`.
//! Atomic writes are achieved via temp file + rename pattern. An internal
//! mutex serializes increments so in-process concurrent increments for the
//! same user cannot lose an update.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::settings_dir;
use crate::error::{Result, WardenError};
use crate::settings::model::{ActionKind, UserSettings};
use crate::settings::SettingsStore;

/// File-based settings storage.
///
/// Stores each user's settings as a JSON file in a configurable directory.
#[derive(Debug)]
pub struct FileSettingsStore {
    /// Directory where settings files are stored.
    settings_dir: PathBuf,
    /// Serializes read-modify-write sequences within this process.
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Create a new file settings store with the default directory.
    ///
    /// Uses `~/.warden/settings/` or `$WARDEN_HOME/settings/`.
    pub fn new() -> Result<Self> {
        let dir = settings_dir().ok_or_else(|| {
            WardenError::config("Could not determine settings directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a new file settings store with a custom directory.
    pub fn with_dir(settings_dir: impl Into<PathBuf>) -> Result<Self> {
        let settings_dir = settings_dir.into();

        // Create the directory if it doesn't exist
        if !settings_dir.exists() {
            fs::create_dir_all(&settings_dir)
                .map_err(|e| WardenError::storage(&settings_dir, e))?;
        }

        Ok(Self {
            settings_dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Get the path for a user's settings file.
    fn user_path(&self, user_id: &str) -> PathBuf {
        self.settings_dir.join(format!("{}.json", user_id))
    }

    /// Get the path for a temp file used during atomic writes.
    fn temp_path(&self, user_id: &str) -> PathBuf {
        self.settings_dir.join(format!(".{}.json.tmp", user_id))
    }

    /// Read a user's settings, or `None` if no file exists.
    fn read_user(&self, user_id: &str) -> Result<Option<UserSettings>> {
        let path = self.user_path(user_id);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| WardenError::storage(&path, e))?;
        let settings: UserSettings = serde_json::from_str(&content)?;

        Ok(Some(settings))
    }

    /// Write a user's settings atomically using temp file + rename.
    fn write_user(&self, user_id: &str, settings: &UserSettings) -> Result<()> {
        let final_path = self.user_path(user_id);
        let temp_path = self.temp_path(user_id);

        let json = serde_json::to_string_pretty(settings)?;

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| WardenError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| WardenError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| WardenError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path).map_err(|e| WardenError::storage(&final_path, e))?;

        Ok(())
    }

    /// Update a user's settings through a closure, creating them if absent.
    fn update_user<F>(&self, user_id: &str, update: F) -> Result<()>
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut settings = self.read_user(user_id)?.unwrap_or_default();
        update(&mut settings);
        self.write_user(user_id, &settings)
    }

    /// Delete a user's settings file.
    ///
    /// The review gate never calls this; it exists for account removal.
    /// Returns `Ok(())` even if no file exists.
    pub fn delete(&self, user_id: &str) -> Result<()> {
        let path = self.user_path(user_id);

        if path.exists() {
            fs::remove_file(&path).map_err(|e| WardenError::storage(&path, e))?;
        }

        // Also clean up any temp file
        let temp_path = self.temp_path(user_id);
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn action_count(&self, user_id: &str, kind: ActionKind) -> Result<Option<u32>> {
        Ok(self.read_user(user_id)?.and_then(|s| s.action_count(kind)))
    }

    fn set_action_count(&self, user_id: &str, kind: ActionKind, count: u32) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        self.update_user(user_id, |s| s.set_action_count(kind, count))
    }

    fn increment_action_count(&self, user_id: &str, kind: ActionKind, cap: u32) -> Result<u32> {
        // Hold the lock across read + write, not around each half.
        let _guard = self.write_lock.lock().unwrap();

        let mut settings = self.read_user(user_id)?.unwrap_or_default();
        let current = settings.action_count(kind).unwrap_or(0);
        if current >= cap {
            return Ok(current);
        }
        settings.set_action_count(kind, current + 1);
        self.write_user(user_id, &settings)?;
        Ok(current + 1)
    }

    fn has_been_prompted_for_review(&self, user_id: &str) -> Result<Option<bool>> {
        Ok(self
            .read_user(user_id)?
            .and_then(|s| s.has_been_prompted_for_review))
    }

    fn set_prompted_for_review(&self, user_id: &str, prompted: bool) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        self.update_user(user_id, |s| s.set_prompted_for_review(prompted))
    }
}
