//! # Global runtime configuration.
//!
//! Provides [`Config`], the settings consumed by [`AppBuilder`](crate::AppBuilder).
//!
//! ## Sentinel values
//! - `signals = []` → [`ShutdownSignal::DEFAULT`] (SIGINT + SIGTERM)

use crate::core::shutdown::ShutdownSignal;

/// Configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `signals`: host signals the default [`OsSignals`](crate::OsSignals) trigger listens to
/// - `log_lifecycle`: emit `tracing::debug!` for every spawn/completion, independent of the sink
///
/// ## Example
/// ```
/// use procvisor::{Config, ShutdownSignal};
///
/// let mut cfg = Config::default();
/// cfg.signals.push(ShutdownSignal::Hangup);
/// assert_eq!(cfg.signals_or_default().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Termination signals that start a shutdown.
    pub signals: Vec<ShutdownSignal>,

    /// Whether the supervisor itself traces process lifecycle at debug level.
    pub log_lifecycle: bool,
}

impl Config {
    /// Returns the configured signals, or the defaults when the list is empty.
    #[inline]
    pub fn signals_or_default(&self) -> Vec<ShutdownSignal> {
        if self.signals.is_empty() {
            ShutdownSignal::DEFAULT.to_vec()
        } else {
            self.signals.clone()
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `signals = [SIGINT, SIGTERM]`
    /// - `log_lifecycle = true`
    fn default() -> Self {
        Self {
            signals: ShutdownSignal::DEFAULT.to_vec(),
            log_lifecycle: true,
        }
    }
}
