//! # Run a single process inside its failure-isolation boundary.
//!
//! ## Event flow
//! ```text
//! Started ─► entry(ctx) ─┬─ Ok(())                 ─► Stopped ─► fire completion
//!                        ├─ Err(Canceled)          ─► Stopped ─► fire completion
//!                        ├─ Err(e)        ─► on_error(e) ─► Stopped ─► fire completion
//!                        └─ panic ─► from_panic ─► on_error ─► Stopped ─► fire completion
//! ```
//!
//! ## Rules
//! - Always emits **exactly one** `Started` and **exactly one** `Stopped`
//! - A panic never leaves this function; it becomes a [`ProcessError`]
//! - The completion signal fires last, after `Stopped` has been delivered

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::error::ProcessError;
use crate::processes::ProcessTask;
use crate::sinks::{Control, Notifier};

/// Executes one process to completion and returns its outcome.
///
/// The returned value is informational; everything the caller of
/// [`App::run`](crate::App::run) may observe has already been sent to the sink.
pub(crate) async fn run_process(
    task: ProcessTask,
    ctx: CancellationToken,
    notifier: Notifier,
    trace: bool,
) -> Result<(), ProcessError> {
    let ProcessTask {
        name,
        entry,
        stopped,
    } = task;

    notifier.control(&name, Control::Started);
    if trace {
        tracing::debug!(process = %name, "process started");
    }

    let outcome = match AssertUnwindSafe(async move { entry(ctx).await })
        .catch_unwind()
        .await
    {
        Ok(res) => res,
        Err(payload) => Err(ProcessError::from_panic(payload)),
    };

    match &outcome {
        Err(err) if err.is_reportable() => notifier.error(&name, err),
        _ => {}
    }
    notifier.control(&name, Control::Stopped);
    if trace {
        tracing::debug!(process = %name, outcome = ?outcome, "process stopped");
    }

    stopped.fire();
    outcome
}
