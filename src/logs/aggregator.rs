//! Bounded log aggregation and publication.

use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::config::LogsConfig;
use crate::logs::buffer::BoundedBuffer;
use crate::logs::certs::certificate_chain_text;
use crate::logs::entry::{format_error_chain, LoggableResult};

/// Collects diagnostic entries and publishes them as formatted reports.
///
/// Entries accumulate in a bounded FIFO buffer; when full, the oldest entry
/// is dropped. [`publish_logs`](Self::publish_logs) formats everything
/// buffered into one report, clears the buffer, and broadcasts the report
/// to all current subscribers. Publication never blocks: when a subscriber
/// falls behind the channel drops its oldest pending report, and a report
/// published with no subscribers at all is discarded.
#[derive(Debug)]
pub struct LogAggregator {
    buffer: Mutex<BoundedBuffer<LoggableResult>>,
    published_tx: broadcast::Sender<String>,
}

impl LogAggregator {
    /// Create an aggregator from config.
    pub fn new(config: &LogsConfig) -> Self {
        Self::with_capacities(config.buffer_capacity, config.publish_capacity)
    }

    /// Create an aggregator with explicit buffer and channel capacities.
    ///
    /// Both capacities are clamped to at least 1.
    pub fn with_capacities(buffer_capacity: usize, publish_capacity: usize) -> Self {
        let (published_tx, _) = broadcast::channel(publish_capacity.max(1));
        Self {
            buffer: Mutex::new(BoundedBuffer::new(buffer_capacity)),
            published_tx,
        }
    }

    /// Subscribe to published reports.
    ///
    /// Each subscriber sees every report published after it subscribes,
    /// except reports dropped because the subscriber lagged behind the
    /// channel capacity.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.published_tx.subscribe()
    }

    /// Buffer a diagnostic entry.
    ///
    /// Entries with nothing to capture (no error, and a missing or empty
    /// message) are rejected. When the buffer is full the oldest entry is
    /// evicted to make room.
    pub fn register_loggable_result(&self, entry: LoggableResult) {
        if entry.has_nothing_to_capture() {
            return;
        }
        self.buffer.lock().unwrap().push(entry);
    }

    /// Number of currently buffered entries.
    pub fn buffered_len(&self) -> usize {
        self.buffer.lock().unwrap().len()
    }

    /// Drop all buffered entries without publishing.
    pub fn clear_logs(&self) {
        self.buffer.lock().unwrap().clear();
    }

    /// Format all buffered entries into one report, clear the buffer, and
    /// broadcast the report.
    ///
    /// Does nothing when the buffer is empty. The send is fire-and-forget;
    /// a report with no subscribers is dropped.
    pub fn publish_logs(&self) {
        let entries = self.buffer.lock().unwrap().drain();
        if entries.is_empty() {
            return;
        }

        let report = format_report(&entries);
        let _ = self.published_tx.send(report);
    }
}

/// Render entries into a report, one block per entry, blocks separated by a
/// blank line.
fn format_report(entries: &[LoggableResult]) -> String {
    let blocks: Vec<String> = entries.iter().map(format_entry).collect();
    blocks.join("\n")
}

fn format_entry(entry: &LoggableResult) -> String {
    let mut block = String::new();
    if let Some(message) = &entry.message {
        block.push_str("Message: ");
        block.push_str(message);
        block.push('\n');
    }
    if let Some(error) = &entry.error {
        let error: &(dyn std::error::Error + 'static) = error.as_ref();
        block.push_str("Stacktrace: ");
        block.push_str(&format_error_chain(error));
        block.push('\n');
        block.push_str(&certificate_chain_text(error));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WardenError;
    use crate::logs::certs::{CertPathValidationError, CertificateInfo};
    use tokio::sync::broadcast::error::TryRecvError;

    fn aggregator() -> LogAggregator {
        LogAggregator::with_capacities(4, 16)
    }

    #[test]
    fn test_register_buffers_entry() {
        let agg = aggregator();
        agg.register_loggable_result(LoggableResult::from_message("sync failed"));
        assert_eq!(agg.buffered_len(), 1);
    }

    #[test]
    fn test_register_rejects_empty_entry() {
        let agg = aggregator();
        agg.register_loggable_result(LoggableResult {
            message: None,
            error: None,
        });
        agg.register_loggable_result(LoggableResult::from_message(""));
        assert_eq!(agg.buffered_len(), 0);
    }

    #[test]
    fn test_buffer_evicts_oldest_when_full() {
        let agg = LogAggregator::with_capacities(1, 16);
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_message("first"));
        agg.register_loggable_result(LoggableResult::from_message("second"));
        agg.publish_logs();

        assert_eq!(rx.try_recv().unwrap(), "Message: second\n");
    }

    #[test]
    fn test_publish_message_only_entry() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_message("m"));
        agg.publish_logs();

        assert_eq!(rx.try_recv().unwrap(), "Message: m\n");
    }

    #[test]
    fn test_publish_error_only_entry() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_error(WardenError::config(
            "bad threshold",
        )));
        agg.publish_logs();

        let report = rx.try_recv().unwrap();
        assert_eq!(report, "Stacktrace: config error: bad threshold\n");
    }

    #[test]
    fn test_publish_entry_with_message_and_error() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::new(
            "loading config",
            WardenError::config("bad threshold"),
        ));
        agg.publish_logs();

        let report = rx.try_recv().unwrap();
        assert_eq!(
            report,
            "Message: loading config\nStacktrace: config error: bad threshold\n"
        );
    }

    #[test]
    fn test_publish_joins_entries_with_blank_line() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_message("a"));
        agg.register_loggable_result(LoggableResult::from_message("b"));
        agg.publish_logs();

        assert_eq!(rx.try_recv().unwrap(), "Message: a\n\nMessage: b\n");
    }

    #[test]
    fn test_publish_includes_certificate_chain() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        let chain = vec![CertificateInfo {
            subject: "CN=vault.example.com".into(),
            issuer: "CN=Example Root".into(),
            serial: "01".into(),
        }];
        agg.register_loggable_result(LoggableResult::from_error(
            CertPathValidationError::new("untrusted root", chain),
        ));
        agg.publish_logs();

        let report = rx.try_recv().unwrap();
        assert!(report.starts_with(
            "Stacktrace: certificate path validation failed: untrusted root\n"
        ));
        assert!(report.contains("Certificate chain:\n"));
        assert!(report.contains("0: subject=CN=vault.example.com"));
    }

    #[test]
    fn test_publish_clears_buffer() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_message("once"));
        agg.publish_logs();
        rx.try_recv().unwrap();

        // Second publish has nothing buffered and sends nothing
        agg.publish_logs();
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(agg.buffered_len(), 0);
    }

    #[test]
    fn test_publish_empty_buffer_is_noop() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        agg.publish_logs();

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_clear_logs_discards_buffered_entries() {
        let agg = aggregator();
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_message("stale"));
        agg.clear_logs();
        agg.publish_logs();

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_publish_without_subscribers_does_not_panic() {
        let agg = aggregator();
        agg.register_loggable_result(LoggableResult::from_message("nobody listening"));
        agg.publish_logs();
        assert_eq!(agg.buffered_len(), 0);
    }

    #[test]
    fn test_all_subscribers_receive_report() {
        let agg = aggregator();
        let mut rx1 = agg.subscribe();
        let mut rx2 = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_message("m"));
        agg.publish_logs();

        assert_eq!(rx1.try_recv().unwrap(), "Message: m\n");
        assert_eq!(rx2.try_recv().unwrap(), "Message: m\n");
    }

    #[test]
    fn test_lagging_subscriber_drops_oldest_report() {
        let agg = LogAggregator::with_capacities(4, 1);
        let mut rx = agg.subscribe();

        agg.register_loggable_result(LoggableResult::from_message("a"));
        agg.publish_logs();
        agg.register_loggable_result(LoggableResult::from_message("b"));
        agg.publish_logs();

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(1))));
        assert_eq!(rx.try_recv().unwrap(), "Message: b\n");
    }

    #[test]
    fn test_subscriber_only_sees_reports_after_subscribing() {
        let agg = aggregator();

        agg.register_loggable_result(LoggableResult::from_message("before"));
        agg.publish_logs();

        let mut rx = agg.subscribe();
        agg.register_loggable_result(LoggableResult::from_message("after"));
        agg.publish_logs();

        assert_eq!(rx.try_recv().unwrap(), "Message: after\n");
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}
