#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use procvisor::{Control, ProcessError, Sink};

/// Upper bound for any single test step.
pub const BOUND: Duration = Duration::from_secs(2);

/// Sink that records every callback for later assertions.
#[derive(Default)]
pub struct Recorder {
    pub started: Mutex<Vec<String>>,
    pub stopped: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<(String, ProcessError)>>,
    pub infos: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    pub fn stopped(&self) -> Vec<String> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(String, ProcessError)> {
        self.errors.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }
}

impl Sink for Recorder {
    fn on_error(&self, process: &str, err: &ProcessError) {
        self.errors
            .lock()
            .unwrap()
            .push((process.to_string(), err.clone()));
    }

    fn on_control(&self, process: &str, control: Control) {
        match control {
            Control::Started => self.started.lock().unwrap().push(process.to_string()),
            Control::Stopped => self.stopped.lock().unwrap().push(process.to_string()),
        }
    }

    fn on_info(&self, msg: &str) {
        self.infos.lock().unwrap().push(msg.to_string());
    }
}

/// Sorted copy, for order-independent comparisons.
pub fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort_unstable();
    v
}

/// Installs a test tracing subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
