//! Per-user settings storage for Warden platform services.
//!
//! This module provides the counter and flag store behind the review prompt
//! gate, with file-based and in-memory backends.

pub mod file;
pub mod memory;
pub mod model;
pub mod traits;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;
pub use model::{ActionKind, UserSettings};
pub use traits::SettingsStore;
