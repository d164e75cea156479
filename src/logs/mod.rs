//! Diagnostic log aggregation.
//!
//! Collects loggable results into a bounded in-memory buffer and publishes
//! them as a single formatted report over a broadcast channel. A
//! [`tracing_subscriber`] layer is provided to feed warning and error
//! events into an aggregator automatically.

mod aggregator;
mod buffer;
mod capture;
mod certs;
mod entry;

pub use aggregator::LogAggregator;
pub use buffer::BoundedBuffer;
pub use capture::LogCaptureLayer;
pub use certs::{certificate_chain_text, CertPathValidationError, CertificateInfo};
pub use entry::{format_error_chain, LoggableResult};
