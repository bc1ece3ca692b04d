//! # Process record and its completion signal.
//!
//! A [`Process`] pairs a name with an [`Entry`] and a one-shot completion
//! channel. When the supervisor starts it, the record splits in two:
//!
//! ```text
//! Process ──start()──► ProcessTask { name, entry, StoppedSignal }   (moved into the spawned task)
//!                  └─► Completion  { name, rx }                      (kept by App::run)
//! ```
//!
//! ## Rules
//! - The signal fires **exactly once**, on every exit path of the task.
//!   [`StoppedSignal`] sends on drop, so an unwinding or aborted task still fires it.
//! - [`Completion::wait`] resolves on the send or on the sender being dropped.

use std::borrow::Cow;

use futures::future::BoxFuture;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::error::ProcessError;

/// Type-erased process entry, consumed by its single run.
pub(crate) type Entry =
    Box<dyn FnOnce(CancellationToken) -> BoxFuture<'static, Result<(), ProcessError>> + Send>;

/// A registered process.
pub(crate) struct Process {
    name: Cow<'static, str>,
    entry: Entry,
    stopped_tx: oneshot::Sender<()>,
    stopped_rx: oneshot::Receiver<()>,
}

impl Process {
    pub(crate) fn new(name: impl Into<Cow<'static, str>>, entry: Entry) -> Self {
        let (stopped_tx, stopped_rx) = oneshot::channel();
        Self {
            name: name.into(),
            entry,
            stopped_tx,
            stopped_rx,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Splits the record into the part the task owns and the part the supervisor waits on.
    pub(crate) fn start(self) -> (ProcessTask, Completion) {
        let task = ProcessTask {
            name: self.name.clone(),
            entry: self.entry,
            stopped: StoppedSignal(Some(self.stopped_tx)),
        };
        let done = Completion {
            name: self.name,
            rx: self.stopped_rx,
        };
        (task, done)
    }
}

/// Task-side half of a started [`Process`].
pub(crate) struct ProcessTask {
    pub(crate) name: Cow<'static, str>,
    pub(crate) entry: Entry,
    pub(crate) stopped: StoppedSignal,
}

/// Write end of the completion signal. Fires on [`fire`](Self::fire) or drop.
pub(crate) struct StoppedSignal(Option<oneshot::Sender<()>>);

impl StoppedSignal {
    pub(crate) fn fire(mut self) {
        self.send();
    }

    fn send(&mut self) {
        if let Some(tx) = self.0.take() {
            // receiver gone means nobody waits anymore
            let _ = tx.send(());
        }
    }
}

impl Drop for StoppedSignal {
    fn drop(&mut self) {
        self.send();
    }
}

/// Supervisor-side half of a started [`Process`].
pub(crate) struct Completion {
    name: Cow<'static, str>,
    rx: oneshot::Receiver<()>,
}

impl Completion {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Waits until the owning task has finished.
    pub(crate) async fn wait(self) {
        let _ = self.rx.await;
    }
}
