//! Active-user resolution for Warden platform services.
//!
//! The host application tracks which account is currently unlocked and
//! selected. Both per-user components resolve the active user through the
//! `ActiveUserSource` boundary; when no user is active, their operations
//! silently no-op.

use std::sync::{Arc, RwLock};

/// Trait for resolving the currently active user.
pub trait ActiveUserSource: Send + Sync {
    /// Get the active user's identifier, or `None` when nobody is logged in.
    fn active_user_id(&self) -> Option<String>;
}

/// Blanket implementation of ActiveUserSource for Arc-wrapped sources.
///
/// This allows sharing one source between the review gate and the host
/// application without wrapper types.
impl<T: ActiveUserSource + ?Sized> ActiveUserSource for Arc<T> {
    fn active_user_id(&self) -> Option<String> {
        (**self).active_user_id()
    }
}

/// Thread-safe in-memory active-user state.
///
/// The host application updates this on login, account switch, and logout.
#[derive(Debug, Default)]
pub struct AuthState {
    active_user_id: RwLock<Option<String>>,
}

impl AuthState {
    /// Create a new state with no active user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state with the given user already active.
    pub fn with_active_user(user_id: impl Into<String>) -> Self {
        Self {
            active_user_id: RwLock::new(Some(user_id.into())),
        }
    }

    /// Mark a user as active.
    pub fn set_active_user(&self, user_id: impl Into<String>) {
        *self.active_user_id.write().unwrap() = Some(user_id.into());
    }

    /// Clear the active user (logout / vault lock).
    pub fn clear_active_user(&self) {
        *self.active_user_id.write().unwrap() = None;
    }
}

impl ActiveUserSource for AuthState {
    fn active_user_id(&self) -> Option<String> {
        self.active_user_id.read().unwrap().clone()
    }
}
