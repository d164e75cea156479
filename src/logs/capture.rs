//! Feeding tracing events into a log aggregator.

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::logs::aggregator::LogAggregator;
use crate::logs::entry::LoggableResult;

/// A [`tracing_subscriber`] layer that buffers warning and error events.
///
/// Install it alongside the normal subscriber stack; every event at
/// `WARN` or `ERROR` has its message registered with the aggregator, so
/// the next published report includes it. Events below `WARN` are
/// ignored.
pub struct LogCaptureLayer {
    aggregator: Arc<LogAggregator>,
}

impl LogCaptureLayer {
    pub fn new(aggregator: Arc<LogAggregator>) -> Self {
        Self { aggregator }
    }
}

impl<S: Subscriber> Layer<S> for LogCaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Level orders ERROR lowest, so "more severe than INFO" is `<= WARN`.
        if *event.metadata().level() > Level::WARN {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.aggregator
                .register_loggable_result(LoggableResult::from_message(message));
        }
    }
}

/// Extracts the `message` field from an event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }
}
