//! App review prompting for Warden.
//!
//! This module decides when to surface an app-store review prompt based on
//! sustained user engagement: per-user action counters with fixed
//! thresholds, two capability signals, and a once-per-user prompt flag.

pub mod gate;
pub mod signals;

pub use gate::ReviewPromptGate;
pub use signals::FlagSignal;
