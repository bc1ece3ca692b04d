//! Runtime core: orchestration and lifecycle.
//!
//! Internal modules:
//! - [`app`]: the supervisor; registration, run loop, shutdown;
//! - [`builder`]: assembles an app from config, parent context, sinks and trigger;
//! - [`runner`]: runs one process inside its panic boundary;
//! - [`shutdown`]: injectable shutdown triggers and the OS-signal adapter;
//! - [`config`]: runtime settings.

mod app;
mod builder;
mod config;
mod runner;
mod shutdown;

pub use app::App;
pub use builder::AppBuilder;
pub use config::Config;
pub use shutdown::{OsSignals, ShutdownSignal, Trigger};
