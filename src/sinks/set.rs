//! # Fan-out to multiple sinks.
//!
//! [`SinkSet`] forwards every callback to each inner sink in insertion order.
//!
//! ## Rules
//! - **Ordered**: sink A always sees a callback before sink B if A was added first
//! - **Isolation**: a panicking sink is logged and skipped; the rest still run
//! - **Synchronous**: the set returns once every sink has returned

use std::sync::Arc;

use crate::error::ProcessError;
use crate::sinks::notifier::isolate;
use crate::sinks::{Control, Sink};

/// Ordered collection of sinks that itself acts as a [`Sink`].
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use procvisor::{Control, ProcessError, Sink, SinkSet};
///
/// struct Quiet;
/// impl Sink for Quiet {
///     fn on_error(&self, _: &str, _: &ProcessError) {}
///     fn on_control(&self, _: &str, _: Control) {}
///     fn on_info(&self, _: &str) {}
/// }
///
/// let set = SinkSet::new(vec![Arc::new(Quiet), Arc::new(Quiet)]);
/// assert_eq!(set.len(), 2);
/// set.on_info("hello");
/// ```
#[derive(Clone, Default)]
pub struct SinkSet {
    sinks: Vec<Arc<dyn Sink>>,
}

impl SinkSet {
    /// Creates a set from the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Sink>>) -> Self {
        Self { sinks }
    }

    /// Appends a sink.
    pub fn push(&mut self, sink: Arc<dyn Sink>) {
        self.sinks.push(sink);
    }

    /// Number of sinks in the set.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// True when the set holds no sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Sink for SinkSet {
    fn on_error(&self, process: &str, err: &ProcessError) {
        for sink in &self.sinks {
            isolate(sink.as_ref(), || sink.on_error(process, err));
        }
    }

    fn on_control(&self, process: &str, control: Control) {
        for sink in &self.sinks {
            isolate(sink.as_ref(), || sink.on_control(process, control));
        }
    }

    fn on_info(&self, msg: &str) {
        for sink in &self.sinks {
            isolate(sink.as_ref(), || sink.on_info(msg));
        }
    }

    fn name(&self) -> &'static str {
        "SinkSet"
    }
}
