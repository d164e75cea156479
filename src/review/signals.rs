//! Observable boolean capability signals.
//!
//! The review gate reads two signals at query time: whether autofill is
//! enabled and whether the accessibility input method is enabled. The host
//! application flips them as platform state changes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable boolean signal readable at any time.
///
/// Clones share state: setting the value through one handle is visible
/// through every other.
#[derive(Debug, Clone, Default)]
pub struct FlagSignal {
    inner: Arc<AtomicBool>,
}

impl FlagSignal {
    /// Create a new signal with the given initial value.
    pub fn new(initial: bool) -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(initial)),
        }
    }

    /// Read the current value.
    pub fn get(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }

    /// Set the value.
    pub fn set(&self, value: bool) {
        self.inner.store(value, Ordering::Relaxed);
    }
}
