//! Panic-isolated dispatch to an optional [`Sink`].
//!
//! Every callback runs inside `catch_unwind`. A panicking sink is reported
//! with `tracing::warn!` and the caller carries on, so a broken sink can never
//! keep a process from reporting `Stopped` or firing its completion signal.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::error::{ProcessError, panic_message};
use crate::sinks::{Control, Sink};

/// Runs one sink callback, swallowing (and logging) a panic.
pub(crate) fn isolate(sink: &dyn Sink, f: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        let info = panic_message(payload.as_ref()).unwrap_or_else(|| "unknown panic".into());
        tracing::warn!(sink = sink.name(), info = %info, "sink panicked");
    }
}

/// Handle used by the supervisor and process tasks to reach the sink.
///
/// Cheap to clone. With no sink every method is a no-op.
#[derive(Clone, Default)]
pub(crate) struct Notifier {
    sink: Option<Arc<dyn Sink>>,
}

impl Notifier {
    pub(crate) fn new(sink: Option<Arc<dyn Sink>>) -> Self {
        Self { sink }
    }

    pub(crate) fn error(&self, process: &str, err: &ProcessError) {
        if let Some(sink) = &self.sink {
            isolate(sink.as_ref(), || sink.on_error(process, err));
        }
    }

    pub(crate) fn control(&self, process: &str, control: Control) {
        if let Some(sink) = &self.sink {
            isolate(sink.as_ref(), || sink.on_control(process, control));
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        if let Some(sink) = &self.sink {
            isolate(sink.as_ref(), || sink.on_info(msg));
        }
    }
}
