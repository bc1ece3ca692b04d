//! # Core sink trait
//!
//! `Sink` is the extension point for plugging custom observers into the
//! supervisor. All methods are invoked synchronously from process tasks and
//! from [`App::run`](crate::App::run).
//!
//! ## Example
//! ```rust
//! use procvisor::{Control, ProcessError, Sink};
//!
//! struct Stderr;
//!
//! impl Sink for Stderr {
//!     fn on_error(&self, process: &str, err: &ProcessError) {
//!         eprintln!("{process}: {err}");
//!     }
//!     fn on_control(&self, process: &str, control: Control) {
//!         eprintln!("{process} {control}");
//!     }
//!     fn on_info(&self, msg: &str) {
//!         eprintln!("{msg}");
//!     }
//! }
//! ```

use std::fmt;

use crate::error::ProcessError;

/// Control transition of a supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// The process task started and is about to call its entry.
    Started,
    /// The process entry returned (normally, with an error, or by panic).
    Stopped,
}

impl Control {
    /// Returns a short stable label for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Control::Started => "running",
            Control::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Contract for observability sinks.
///
/// Implementations must not block indefinitely. A panic inside a callback is
/// caught by the supervisor and logged; it never affects the process being observed.
pub trait Sink: Send + Sync + 'static {
    /// A process failed: it returned an error or panicked.
    fn on_error(&self, process: &str, err: &ProcessError);

    /// A process started or stopped.
    fn on_control(&self, process: &str, control: Control);

    /// Informational message from the supervisor (e.g. which trigger fired).
    fn on_info(&self, msg: &str);

    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_labels() {
        assert_eq!(Control::Started.to_string(), "running");
        assert_eq!(Control::Stopped.as_label(), "stopped");
    }
}
