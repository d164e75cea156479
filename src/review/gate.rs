//! Review prompt gate for Warden.
//!
//! The gate tracks qualifying user actions per account and decides whether
//! the app-store review prompt should be shown. A user is prompted at most
//! once, only while an alternate input method (autofill or accessibility) is
//! enabled, and only after at least one action kind has reached its
//! threshold.

use crate::auth::ActiveUserSource;
use crate::config::ReviewConfig;
use crate::error::FailOpen;
use crate::review::signals::FlagSignal;
use crate::settings::{ActionKind, SettingsStore};

/// Review prompt gate.
///
/// All operations resolve the active user first and silently no-op (or
/// answer `false`) when nobody is logged in. Settings store failures are
/// handled fail-open: an increment is dropped with a warning, and the
/// prompt query reads broken state as "no counts recorded".
#[derive(Debug)]
pub struct ReviewPromptGate<U, S> {
    /// Resolves the currently active user.
    users: U,
    /// Per-user counter and flag persistence.
    settings: S,
    /// Whether the autofill service is currently enabled.
    autofill_enabled: FlagSignal,
    /// Whether the accessibility input method is currently enabled.
    accessibility_enabled: FlagSignal,
    /// Per-action-kind thresholds.
    thresholds: ReviewConfig,
}

impl<U: ActiveUserSource, S: SettingsStore> ReviewPromptGate<U, S> {
    /// Create a new review prompt gate.
    pub fn new(
        users: U,
        settings: S,
        autofill_enabled: FlagSignal,
        accessibility_enabled: FlagSignal,
        thresholds: ReviewConfig,
    ) -> Self {
        Self {
            users,
            settings,
            autofill_enabled,
            accessibility_enabled,
            thresholds,
        }
    }

    /// Increment the add action count for the active user.
    pub fn increment_add_action_count(&self) {
        self.increment(ActionKind::Add);
    }

    /// Increment the copy action count for the active user.
    pub fn increment_copy_action_count(&self) {
        self.increment(ActionKind::Copy);
    }

    /// Increment the create action count for the active user.
    pub fn increment_create_action_count(&self) {
        self.increment(ActionKind::Create);
    }

    /// Check whether the active user should be prompted to review the app.
    ///
    /// Returns `false` when no user is active. Otherwise the decision is
    /// exactly: an alternate input method is enabled, AND at least one
    /// action threshold has been met, AND the prompt has not been shown to
    /// this user before.
    pub fn should_prompt_for_app_review(&self) -> bool {
        let Some(user_id) = self.users.active_user_id() else {
            return false;
        };

        let prompt_has_not_been_shown = self
            .settings
            .has_been_prompted_for_review(&user_id)
            .fail_open_default("reading review prompt flag")
            != Some(true);
        let autofill_enabled = self.autofill_enabled.get();
        let accessibility_enabled = self.accessibility_enabled.get();
        let min_add_actions_met = self.is_met(&user_id, ActionKind::Add);
        let min_copy_actions_met = self.is_met(&user_id, ActionKind::Copy);
        let min_create_actions_met = self.is_met(&user_id, ActionKind::Create);

        (autofill_enabled || accessibility_enabled)
            && (min_add_actions_met || min_copy_actions_met || min_create_actions_met)
            && prompt_has_not_been_shown
    }

    /// Record that the review prompt was shown to the active user.
    ///
    /// Set once; nothing in this component ever resets it.
    pub fn record_prompt_shown(&self) {
        let Some(user_id) = self.users.active_user_id() else {
            return;
        };

        if let Err(err) = self.settings.set_prompted_for_review(&user_id, true) {
            tracing::warn!("failed to record review prompt for {}: {}", user_id, err);
        }
    }

    /// Check whether the active user has met the threshold for an action kind.
    ///
    /// Returns `false` when no user is active.
    pub fn is_minimum_met(&self, kind: ActionKind) -> bool {
        let Some(user_id) = self.users.active_user_id() else {
            return false;
        };
        self.is_met(&user_id, kind)
    }

    fn increment(&self, kind: ActionKind) {
        let Some(user_id) = self.users.active_user_id() else {
            return;
        };

        let cap = self.thresholds.threshold(kind);
        if let Err(err) = self.settings.increment_action_count(&user_id, kind, cap) {
            tracing::warn!(
                "failed to increment {} action count for {}: {}",
                kind.as_str(),
                user_id,
                err
            );
        }
    }

    fn is_met(&self, user_id: &str, kind: ActionKind) -> bool {
        let count = self
            .settings
            .action_count(user_id, kind)
            .fail_open_default("reading action count")
            .unwrap_or(0);
        count >= self.thresholds.threshold(kind)
    }
}
