//! # Shutdown triggers.
//!
//! [`App::run`](crate::App::run) blocks on exactly one [`Trigger::wait`] before
//! it cancels every process. The trigger is injected, so tests and embedders
//! can fire it programmatically; production code uses [`OsSignals`].
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` / `SIGHUP` (opt-in via [`Config::signals`](crate::Config::signals))
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::error::RuntimeError;

/// A one-shot source of "please shut down".
///
/// `wait` resolves with a short description of what fired; the supervisor
/// forwards it to [`Sink::on_info`](crate::Sink::on_info).
#[async_trait]
pub trait Trigger: Send + Sync + 'static {
    /// Waits until the trigger fires.
    ///
    /// Returns `Err` if the trigger cannot be armed (e.g. signal registration fails).
    async fn wait(&self) -> Result<String, RuntimeError>;
}

/// Fires when the token is cancelled.
#[async_trait]
impl Trigger for CancellationToken {
    async fn wait(&self) -> Result<String, RuntimeError> {
        self.cancelled().await;
        Ok("shutdown requested".to_string())
    }
}

/// Host termination signals a [`OsSignals`] trigger can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutdownSignal {
    /// `SIGINT`
    Interrupt,
    /// `SIGTERM`
    Terminate,
    /// `SIGQUIT`
    Quit,
    /// `SIGHUP`
    Hangup,
}

impl ShutdownSignal {
    /// Signals used when none are configured.
    pub const DEFAULT: [ShutdownSignal; 2] = [ShutdownSignal::Interrupt, ShutdownSignal::Terminate];

    /// Conventional signal name, e.g. `"SIGTERM"`.
    pub fn as_label(&self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Quit => "SIGQUIT",
            ShutdownSignal::Hangup => "SIGHUP",
        }
    }

    #[cfg(unix)]
    fn kind(&self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;

        match self {
            ShutdownSignal::Interrupt => SignalKind::interrupt(),
            ShutdownSignal::Terminate => SignalKind::terminate(),
            ShutdownSignal::Quit => SignalKind::quit(),
            ShutdownSignal::Hangup => SignalKind::hangup(),
        }
    }
}

/// Trigger backed by host termination signals.
///
/// Each [`wait`](Trigger::wait) call installs its own listeners and resolves
/// on the first matching signal.
#[derive(Debug, Clone)]
pub struct OsSignals {
    signals: Vec<ShutdownSignal>,
}

impl OsSignals {
    /// Listens to `signals`; an empty list falls back to [`ShutdownSignal::DEFAULT`].
    pub fn new(signals: impl IntoIterator<Item = ShutdownSignal>) -> Self {
        let mut unique: Vec<ShutdownSignal> = Vec::new();
        for sig in signals {
            if !unique.contains(&sig) {
                unique.push(sig);
            }
        }
        if unique.is_empty() {
            unique = ShutdownSignal::DEFAULT.to_vec();
        }
        Self { signals: unique }
    }

    /// Listens to the signals configured in `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.signals_or_default())
    }

    /// Signals this trigger listens to.
    pub fn signals(&self) -> &[ShutdownSignal] {
        &self.signals
    }
}

impl Default for OsSignals {
    fn default() -> Self {
        Self::new(ShutdownSignal::DEFAULT)
    }
}

#[cfg(unix)]
#[async_trait]
impl Trigger for OsSignals {
    async fn wait(&self) -> Result<String, RuntimeError> {
        use futures::future::{FutureExt, select_all};
        use tokio::signal::unix::signal;

        let mut listeners = Vec::with_capacity(self.signals.len());
        for sig in &self.signals {
            let stream = signal(sig.kind()).map_err(|source| RuntimeError::Trigger { source })?;
            listeners.push((*sig, stream));
        }

        let pending = listeners.iter_mut().map(|(sig, stream)| {
            let sig = *sig;
            async move {
                stream.recv().await;
                sig
            }
            .boxed()
        });
        let (sig, _, _) = select_all(pending).await;
        Ok(format!("received os signal {}", sig.as_label()))
    }
}

#[cfg(not(unix))]
#[async_trait]
impl Trigger for OsSignals {
    async fn wait(&self) -> Result<String, RuntimeError> {
        tokio::signal::ctrl_c()
            .await
            .map_err(|source| RuntimeError::Trigger { source })?;
        Ok("received os signal ctrl-c".to_string())
    }
}
