//! # procvisor
//!
//! **procvisor** runs a set of named, long-lived async processes inside one
//! host process and shuts them down together when the host is asked to stop.
//!
//! It provides the supervision protocol only: start every process, broadcast
//! one shared cancellation, isolate per-process failures, and block until
//! every process has actually finished. What a process does, where
//! termination requests come from, and how diagnostics are rendered are
//! plugged in through [`Worker`], [`Trigger`] and [`Sink`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Process    │   │   Process    │   │   Process    │
//!     │ (name+entry) │   │ (name+entry) │   │ (name+entry) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  App (supervisor)                                                 │
//! │  - CancellationToken (child of caller's parent, shared by all)    │
//! │  - Trigger (OsSignals by default, injectable)                     │
//! │  - Sink (optional; LogWriter, SinkSet, custom)                    │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ tokio task   │   │ tokio task   │   │ tokio task   │
//!     │ catch_unwind │   │ catch_unwind │   │ catch_unwind │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ on_control(Started/Stopped), on_error(..)
//!            ▼
//!          Sink          completion (oneshot) ──► App::run waits in order
//! ```
//!
//! ### Lifecycle
//! ```text
//! add_process(..) × N ──► run()
//!   ├─► spawn N tasks            (Started → entry(ctx) → [on_error] → Stopped → completion)
//!   ├─► trigger.wait()           (one signal, or the token cancelled elsewhere)
//!   ├─► on_info(what fired); token.cancel()
//!   └─► await completion[0..N]   (registration order)
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                  |
//! |-------------------|----------------------------------------------------------|-------------------------------------|
//! | **Supervision**   | Register processes, run them, coordinate shutdown.       | [`App`], [`AppBuilder`]             |
//! | **Processes**     | Closures or structs that run until cancelled.            | [`Worker`]                          |
//! | **Triggers**      | Where "shut down" comes from.                            | [`Trigger`], [`OsSignals`]          |
//! | **Sinks**         | Observe start/stop/error/info callbacks.                 | [`Sink`], [`SinkSet`], [`Control`]  |
//! | **Errors**        | Typed errors for the runtime and for processes.          | [`RuntimeError`], [`ProcessError`]  |
//! | **Configuration** | Runtime settings.                                        | [`Config`]                          |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], a sink that writes through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use procvisor::{App, ProcessError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stop = CancellationToken::new();
//!
//!     let mut builder = App::builder().with_trigger(stop.clone());
//!     #[cfg(feature = "logging")]
//!     {
//!         builder = builder.with_sink(Arc::new(procvisor::LogWriter::new()));
//!     }
//!     let mut app = builder.build();
//!
//!     app.add_process("ticker", |ctx: CancellationToken| async move {
//!         while !ctx.is_cancelled() {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!         }
//!         Ok::<(), ProcessError>(())
//!     });
//!
//!     tokio::spawn(async move {
//!         tokio::time::sleep(Duration::from_millis(50)).await;
//!         stop.cancel();
//!     });
//!
//!     app.run().await?;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod processes;
mod sinks;

// ---- Public re-exports ----

pub use crate::core::{App, AppBuilder, Config, OsSignals, ShutdownSignal, Trigger};
pub use error::{ProcessError, RuntimeError};
pub use processes::Worker;
pub use sinks::{Control, Sink, SinkSet};

// Optional: a tracing-backed sink.
// Enabled by default via the `logging` feature.
#[cfg(feature = "logging")]
pub use sinks::LogWriter;
