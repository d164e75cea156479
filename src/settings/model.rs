//! Persisted per-user settings types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of qualifying user action tracked by the review prompt gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// An item was added to the vault.
    Add,
    /// A credential was copied to the clipboard.
    Copy,
    /// A credential was generated/created.
    Create,
}

impl ActionKind {
    /// All tracked action kinds.
    pub const ALL: [ActionKind; 3] = [ActionKind::Add, ActionKind::Copy, ActionKind::Create];

    /// Get the action kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Copy => "copy",
            Self::Create => "create",
        }
    }
}

/// Settings persisted for a single user.
///
/// Counters are absent until the first increment; the review gate treats an
/// absent counter as zero. The prompted flag is set once and never reset by
/// the gate itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    /// Count of add actions, capped at the configured threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_action_count: Option<u32>,
    /// Count of copy actions, capped at the configured threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_action_count: Option<u32>,
    /// Count of create actions, capped at the configured threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_action_count: Option<u32>,
    /// Whether the app review prompt has been shown to this user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_been_prompted_for_review: Option<bool>,
    /// Timestamp of the last write.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            add_action_count: None,
            copy_action_count: None,
            create_action_count: None,
            has_been_prompted_for_review: None,
            updated_at: Utc::now(),
        }
    }
}

impl UserSettings {
    /// Get the stored count for an action kind.
    pub fn action_count(&self, kind: ActionKind) -> Option<u32> {
        match kind {
            ActionKind::Add => self.add_action_count,
            ActionKind::Copy => self.copy_action_count,
            ActionKind::Create => self.create_action_count,
        }
    }

    /// Set the stored count for an action kind and touch `updated_at`.
    pub fn set_action_count(&mut self, kind: ActionKind, count: u32) {
        match kind {
            ActionKind::Add => self.add_action_count = Some(count),
            ActionKind::Copy => self.copy_action_count = Some(count),
            ActionKind::Create => self.create_action_count = Some(count),
        }
        self.updated_at = Utc::now();
    }

    /// Set the prompted-for-review flag and touch `updated_at`.
    pub fn set_prompted_for_review(&mut self, prompted: bool) {
        self.has_been_prompted_for_review = Some(prompted);
        self.updated_at = Utc::now();
    }
}
