//! Settings storage traits for Warden platform services.
//!
//! This module defines the `SettingsStore` trait for per-user counter and
//! flag persistence.

use std::sync::Arc;

use crate::error::Result;
use crate::settings::model::ActionKind;

/// Trait for per-user settings storage backends.
///
/// Implementations hold one integer counter per (user, action kind) pair and
/// one boolean prompted-for-review flag per user. Counters are created
/// implicitly on first increment and are never deleted through this trait;
/// account removal is the host application's concern.
pub trait SettingsStore: Send + Sync {
    /// Get the stored count for a user's action kind.
    ///
    /// Returns `Ok(None)` if the counter was never written.
    fn action_count(&self, user_id: &str, kind: ActionKind) -> Result<Option<u32>>;

    /// Store the count for a user's action kind.
    fn set_action_count(&self, user_id: &str, kind: ActionKind, count: u32) -> Result<()>;

    /// Increment a user's action counter, capped at `cap`.
    ///
    /// Reads the current value (absent counts as 0), leaves the stored value
    /// untouched once it has reached `cap`, and otherwise writes value + 1.
    /// Returns the stored value after the operation.
    ///
    /// The default implementation is a plain read-modify-write; backends
    /// override it to serialize the sequence so concurrent increments for
    /// the same user cannot lose an update.
    fn increment_action_count(&self, user_id: &str, kind: ActionKind, cap: u32) -> Result<u32> {
        let current = self.action_count(user_id, kind)?.unwrap_or(0);
        if current >= cap {
            return Ok(current);
        }
        self.set_action_count(user_id, kind, current + 1)?;
        Ok(current + 1)
    }

    /// Get whether the review prompt has been shown to a user.
    ///
    /// Returns `Ok(None)` if the flag was never written.
    fn has_been_prompted_for_review(&self, user_id: &str) -> Result<Option<bool>>;

    /// Store the prompted-for-review flag for a user.
    fn set_prompted_for_review(&self, user_id: &str, prompted: bool) -> Result<()>;
}

/// Blanket implementation of SettingsStore for Arc-wrapped stores.
///
/// This allows using `Arc<T>` where `T: SettingsStore` is expected, which is
/// useful for sharing stores between the gate and the host application.
impl<T: SettingsStore + ?Sized> SettingsStore for Arc<T> {
    fn action_count(&self, user_id: &str, kind: ActionKind) -> Result<Option<u32>> {
        (**self).action_count(user_id, kind)
    }

    fn set_action_count(&self, user_id: &str, kind: ActionKind, count: u32) -> Result<()> {
        (**self).set_action_count(user_id, kind, count)
    }

    fn increment_action_count(&self, user_id: &str, kind: ActionKind, cap: u32) -> Result<u32> {
        (**self).increment_action_count(user_id, kind, cap)
    }

    fn has_been_prompted_for_review(&self, user_id: &str) -> Result<Option<bool>> {
        (**self).has_been_prompted_for_review(user_id)
    }

    fn set_prompted_for_review(&self, user_id: &str, prompted: bool) -> Result<()> {
        (**self).set_prompted_for_review(user_id, prompted)
    }
}
