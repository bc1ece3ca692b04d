//! Error types used by the procvisor runtime and by supervised processes.
//!
//! This module defines two error enums:
//!
//! - [`RuntimeError`]: faults of the supervisor itself (trigger installation, runtime construction).
//! - [`ProcessError`]: faults of an individual process entry (returned or raised by a panic).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::fmt::Display;

use thiserror::Error;

/// # Errors produced by the procvisor runtime.
///
/// A worker fault is never a `RuntimeError`; those are isolated and delivered
/// to the [`Sink`](crate::Sink) as [`ProcessError`]s.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The shutdown trigger could not be installed or failed while waiting.
    #[error("shutdown trigger failed: {source}")]
    Trigger {
        /// Underlying I/O error (usually signal registration).
        #[source]
        source: std::io::Error,
    },

    /// The tokio runtime backing [`App::run_blocking`](crate::App::run_blocking) could not be built.
    #[error("failed to build runtime: {source}")]
    Runtime {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procvisor::RuntimeError;
    ///
    /// let err = RuntimeError::Trigger { source: std::io::Error::other("no signals") };
    /// assert_eq!(err.as_label(), "runtime_trigger_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Trigger { .. } => "runtime_trigger_failed",
            RuntimeError::Runtime { .. } => "runtime_build_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Trigger { source } => format!("trigger: {source}"),
            RuntimeError::Runtime { source } => format!("runtime: {source}"),
        }
    }
}

/// # Errors produced by a supervised process.
///
/// An entry either returns one of these or panics; a panic is converted into
/// one of these at the task boundary (see [`ProcessError::from_panic`]).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The process reported a failure.
    #[error("execution failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The process panicked with a payload that carried no error of its own.
    #[error("internal failure: {reason}")]
    Panicked {
        /// Panic message, or `"panic occurred"` when the payload is opaque.
        reason: String,
    },

    /// The process observed cancellation and stopped. Not reported as an error.
    #[error("context cancelled")]
    Canceled,
}

impl ProcessError {
    /// Shorthand for [`ProcessError::Failed`].
    pub fn fail(error: impl Display) -> Self {
        ProcessError::Failed {
            error: error.to_string(),
        }
    }

    /// Converts a caught panic payload into a `ProcessError`.
    ///
    /// - `ProcessError` payloads (raised with [`std::panic::panic_any`]) are kept as-is.
    /// - boxed `std::error::Error` payloads become [`ProcessError::Failed`].
    /// - string payloads become [`ProcessError::Panicked`] with the message.
    /// - anything else becomes [`ProcessError::Panicked`] with `"panic occurred"`.
    ///
    /// # Example
    /// ```
    /// use procvisor::ProcessError;
    ///
    /// let payload = std::panic::catch_unwind(|| { panic!("boom"); }).unwrap_err();
    /// assert_eq!(
    ///     ProcessError::from_panic(payload),
    ///     ProcessError::Panicked { reason: "boom".into() },
    /// );
    /// ```
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let payload = match payload.downcast::<ProcessError>() {
            Ok(err) => return *err,
            Err(other) => other,
        };
        let payload = match payload.downcast::<Box<dyn std::error::Error + Send + Sync>>() {
            Ok(err) => return ProcessError::fail(err),
            Err(other) => other,
        };
        ProcessError::Panicked {
            reason: panic_message(payload.as_ref()).unwrap_or_else(|| "panic occurred".into()),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procvisor::ProcessError;
    ///
    /// assert_eq!(ProcessError::fail("boom").as_label(), "process_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ProcessError::Failed { .. } => "process_failed",
            ProcessError::Panicked { .. } => "process_panicked",
            ProcessError::Canceled => "process_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ProcessError::Failed { error } => format!("error: {error}"),
            ProcessError::Panicked { reason } => format!("panic: {reason}"),
            ProcessError::Canceled => "context cancelled".to_string(),
        }
    }

    /// Whether this value should reach [`Sink::on_error`](crate::Sink::on_error).
    ///
    /// [`ProcessError::Canceled`] is a graceful exit and is not reported.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, ProcessError::Canceled)
    }
}

/// Extracts the message of a `panic!("...")` payload, if it has one.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> Option<String> {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        Some((*msg).to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        ProcessError::fail(err)
    }
}

impl From<String> for ProcessError {
    fn from(error: String) -> Self {
        ProcessError::Failed { error }
    }
}

impl From<&str> for ProcessError {
    fn from(error: &str) -> Self {
        ProcessError::fail(error)
    }
}
