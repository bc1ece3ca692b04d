//! # Struct-based process entry.
//!
//! Closures are registered with [`App::add_process`](crate::App::add_process).
//! Types that carry their own state implement [`Worker`] and are registered
//! with [`App::add_worker`](crate::App::add_worker).

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ProcessError;

/// # Asynchronous, cancelable process entry.
///
/// `run` is called once per [`App::run`](crate::App::run). It should keep
/// working until `ctx` is cancelled and then return promptly; the supervisor
/// waits for it without a timeout.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use procvisor::{ProcessError, Worker};
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Worker for Heartbeat {
///     async fn run(&self, ctx: CancellationToken) -> Result<(), ProcessError> {
///         ctx.cancelled().await;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    /// Executes the process until cancellation (or until it has nothing left to do).
    async fn run(&self, ctx: CancellationToken) -> Result<(), ProcessError>;
}

#[async_trait]
impl<W: Worker + ?Sized> Worker for Arc<W> {
    async fn run(&self, ctx: CancellationToken) -> Result<(), ProcessError> {
        (**self).run(ctx).await
    }
}
