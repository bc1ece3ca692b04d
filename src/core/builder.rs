use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::sinks::{Notifier, Sink, SinkSet};

use super::{App, Config, OsSignals, Trigger};

/// Builder for constructing an [`App`] with optional parent context, sinks and trigger.
pub struct AppBuilder {
    cfg: Config,
    parent: Option<CancellationToken>,
    sinks: Vec<Arc<dyn Sink>>,
    trigger: Option<Box<dyn Trigger>>,
}

impl AppBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            parent: None,
            sinks: Vec::new(),
            trigger: None,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Derives the app's cancellation context from `parent`.
    ///
    /// Cancelling `parent` cancels every process; cancelling the app never
    /// touches `parent`.
    pub fn with_parent(mut self, parent: CancellationToken) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Adds a sink. Two or more sinks are combined into a [`SinkSet`].
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Overrides the shutdown trigger (default: [`OsSignals`] from the config).
    pub fn with_trigger(mut self, trigger: impl Trigger) -> Self {
        self.trigger = Some(Box::new(trigger));
        self
    }

    /// Builds the app. No process runs until [`App::run`].
    pub fn build(self) -> App {
        let token = match self.parent {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };

        let mut sinks = self.sinks;
        let sink: Option<Arc<dyn Sink>> = match sinks.len() {
            0 => None,
            1 => sinks.pop(),
            _ => Some(Arc::new(SinkSet::new(sinks))),
        };

        let trigger: Box<dyn Trigger> = match self.trigger {
            Some(trigger) => trigger,
            None => Box::new(OsSignals::from_config(&self.cfg)),
        };

        App::new_internal(self.cfg, token, Notifier::new(sink), trigger)
    }
}
