//! # LogWriter: tracing-backed sink
//!
//! Renders sink callbacks as `tracing` events. Install any subscriber
//! (e.g. `tracing_subscriber::fmt`) in the binary to see them.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO procvisor: process state process="http" state="running"
//! ERROR procvisor: process failed process="cron" label="process_panicked" error=internal failure: boom
//! INFO procvisor: received os signal SIGTERM
//! INFO procvisor: process state process="http" state="stopped"
//! ```

use crate::error::ProcessError;
use crate::sinks::{Control, Sink};

/// Sink that writes every callback through `tracing`.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Sink for LogWriter {
    fn on_error(&self, process: &str, err: &ProcessError) {
        tracing::error!(
            target: "procvisor",
            process = process,
            label = err.as_label(),
            error = %err,
            "process failed"
        );
    }

    fn on_control(&self, process: &str, control: Control) {
        tracing::info!(
            target: "procvisor",
            process = process,
            state = control.as_label(),
            "process state"
        );
    }

    fn on_info(&self, msg: &str) {
        tracing::info!(target: "procvisor", "{msg}");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
