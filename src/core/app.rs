//! # App: runs named processes and coordinates their shutdown.
//!
//! The [`App`] owns the process registry, one shared [`CancellationToken`]
//! and the shutdown [`Trigger`].
//!
//! ## High-level architecture
//! ```text
//! add_process / add_worker ──► Vec<Process>            (registration order)
//!
//! App::run():
//!   Process[0]  Process[1]  ...  Process[N-1]
//!       │           │                 │
//!       └──► tokio::spawn(run_process(task, token.clone(), notifier))
//!                   └──► Started ─► entry(ctx) ─► [on_error] ─► Stopped ─► fire completion
//!
//!   wait_for_exit():
//!       select { trigger.wait(), token.cancelled() }
//!             └─► Sink::on_info(what fired)
//!             └─► token.cancel()            → every process observes ctx.cancelled()
//!
//!   wait_for_processes():
//!       Completion[0].wait() ─► Completion[1].wait() ─► ... ─► return
//! ```
//!
//! - A process fault is isolated in its own task and reported to the sink.
//! - There is no timeout: a process that ignores cancellation keeps `run` pending.
//!
//! ## Example
//! ```rust
//! use procvisor::{App, ProcessError};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stop = CancellationToken::new();
//!     let mut app = App::builder().with_trigger(stop.clone()).build();
//!
//!     app.add_process("ticker", |ctx: CancellationToken| async move {
//!         ctx.cancelled().await;
//!         Ok::<(), ProcessError>(())
//!     });
//!
//!     stop.cancel();
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::core::builder::AppBuilder;
use crate::core::runner::run_process;
use crate::core::{Config, Trigger};
use crate::error::{ProcessError, RuntimeError};
use crate::processes::{Completion, Entry, Process, Worker};
use crate::sinks::{Notifier, Sink};

/// Collection of processes that run for the lifetime of the host process.
pub struct App {
    cfg: Config,
    processes: Vec<Process>,
    token: CancellationToken,
    notifier: Notifier,
    trigger: Box<dyn Trigger>,
}

impl App {
    /// Creates an app whose context is a child of `parent`, reporting to `sink`.
    ///
    /// Shutdown is triggered by the default OS signals. Use [`App::builder`]
    /// for anything else.
    pub fn new(parent: CancellationToken, sink: Option<Arc<dyn Sink>>) -> Self {
        let mut builder = App::builder().with_parent(parent);
        if let Some(sink) = sink {
            builder = builder.with_sink(sink);
        }
        builder.build()
    }

    /// Returns a builder with [`Config::default`].
    pub fn builder() -> AppBuilder {
        AppBuilder::new(Config::default())
    }

    pub(crate) fn new_internal(
        cfg: Config,
        token: CancellationToken,
        notifier: Notifier,
        trigger: Box<dyn Trigger>,
    ) -> Self {
        Self {
            cfg,
            processes: Vec::new(),
            token,
            notifier,
            trigger,
        }
    }

    /// Registers a closure-backed process.
    ///
    /// Names are for observability only; empty and duplicate names are accepted.
    pub fn add_process<F, Fut>(&mut self, name: impl Into<Cow<'static, str>>, f: F) -> &mut Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ProcessError>> + Send + 'static,
    {
        let entry: Entry = Box::new(move |ctx: CancellationToken| f(ctx).boxed());
        self.processes.push(Process::new(name, entry));
        self
    }

    /// Registers a [`Worker`] implementation.
    pub fn add_worker<W: Worker>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        worker: W,
    ) -> &mut Self {
        self.add_process(name, move |ctx| async move { worker.run(ctx).await })
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// True when no process is registered.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Names of registered processes, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.processes.iter().map(Process::name).collect()
    }

    /// Clone of the shared cancellation token.
    ///
    /// Cancelling it starts the same shutdown as the trigger firing.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Starts every process and blocks until shutdown completes.
    ///
    /// 1. spawns one task per process
    /// 2. waits for the trigger (or for the token to be cancelled elsewhere)
    /// 3. cancels the shared token
    /// 4. waits for every process, in registration order
    ///
    /// Process faults never surface here. `Err` is returned only when the
    /// trigger itself failed; processes are still cancelled and awaited first.
    pub async fn run(self) -> Result<(), RuntimeError> {
        let App {
            cfg,
            processes,
            token,
            notifier,
            trigger,
        } = self;

        let completions = spawn_processes(&cfg, processes, &token, &notifier);
        let exit = wait_for_exit(trigger.as_ref(), &token, &notifier).await;
        wait_for_processes(completions, cfg.log_lifecycle).await;
        exit
    }

    /// Runs the app on a fresh multi-threaded tokio runtime, blocking the calling thread.
    ///
    /// Must not be called from within an async context.
    pub fn run_blocking(self) -> Result<(), RuntimeError> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|source| RuntimeError::Runtime { source })?;
        rt.block_on(self.run())
    }
}

/// Spawns one task per process; returns their completions in registration order.
fn spawn_processes(
    cfg: &Config,
    processes: Vec<Process>,
    token: &CancellationToken,
    notifier: &Notifier,
) -> Vec<Completion> {
    let mut completions = Vec::with_capacity(processes.len());
    for process in processes {
        let (task, done) = process.start();
        tokio::spawn(run_process(
            task,
            token.clone(),
            notifier.clone(),
            cfg.log_lifecycle,
        ));
        completions.push(done);
    }
    completions
}

/// Consumes the trigger once, reports what fired, then cancels the shared token.
async fn wait_for_exit(
    trigger: &dyn Trigger,
    token: &CancellationToken,
    notifier: &Notifier,
) -> Result<(), RuntimeError> {
    let fired = tokio::select! {
        res = trigger.wait() => res,
        _ = token.cancelled() => Ok("cancellation context cancelled".to_string()),
    };

    match &fired {
        Ok(msg) => notifier.info(msg),
        Err(err) => {
            tracing::warn!(error = %err, "shutdown trigger failed; stopping processes");
            notifier.info(&format!("shutdown trigger failed: {err}"));
        }
    }
    token.cancel();
    fired.map(|_| ())
}

/// Waits for every completion signal, in order.
async fn wait_for_processes(completions: Vec<Completion>, trace: bool) {
    for done in completions {
        if trace {
            tracing::debug!(process = done.name(), "waiting for process");
        }
        done.wait().await;
    }
}
