//! In-memory settings storage.
//!
//! This module provides a thread-safe in-memory implementation of the
//! SettingsStore trait, used in unit tests and as the backing store when
//! the host application manages persistence itself.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::settings::model::{ActionKind, UserSettings};
use crate::settings::SettingsStore;

/// In-memory settings store.
///
/// Thread-safe implementation using `RwLock<HashMap>`. Settings are lost
/// when the store is dropped.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    /// Settings keyed by user identifier.
    users: RwLock<HashMap<String, UserSettings>>,
}

impl MemorySettingsStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Get the number of users with stored settings.
    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.users.read().unwrap().is_empty()
    }

    /// Clear all settings from the store.
    pub fn clear(&self) {
        self.users.write().unwrap().clear();
    }
}

impl SettingsStore for MemorySettingsStore {
    fn action_count(&self, user_id: &str, kind: ActionKind) -> Result<Option<u32>> {
        let users = self.users.read().unwrap();
        Ok(users.get(user_id).and_then(|s| s.action_count(kind)))
    }

    fn set_action_count(&self, user_id: &str, kind: ActionKind, count: u32) -> Result<()> {
        let mut users = self.users.write().unwrap();
        users
            .entry(user_id.to_string())
            .or_default()
            .set_action_count(kind, count);
        Ok(())
    }

    fn increment_action_count(&self, user_id: &str, kind: ActionKind, cap: u32) -> Result<u32> {
        // Hold the write lock across the whole read-modify-write so
        // concurrent increments for the same user cannot lose an update.
        let mut users = self.users.write().unwrap();
        let settings = users.entry(user_id.to_string()).or_default();
        let current = settings.action_count(kind).unwrap_or(0);
        if current >= cap {
            return Ok(current);
        }
        settings.set_action_count(kind, current + 1);
        Ok(current + 1)
    }

    fn has_been_prompted_for_review(&self, user_id: &str) -> Result<Option<bool>> {
        let users = self.users.read().unwrap();
        Ok(users
            .get(user_id)
            .and_then(|s| s.has_been_prompted_for_review))
    }

    fn set_prompted_for_review(&self, user_id: &str, prompted: bool) -> Result<()> {
        let mut users = self.users.write().unwrap();
        users
            .entry(user_id.to_string())
            .or_default()
            .set_prompted_for_review(prompted);
        Ok(())
    }
}
