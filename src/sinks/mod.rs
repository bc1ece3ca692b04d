//! # Observability sinks for the procvisor runtime.
//!
//! A [`Sink`] receives three kinds of callbacks from the supervisor:
//! process errors, process control transitions ([`Control`]) and free-form
//! informational messages.
//!
//! ## Architecture
//! ```text
//! process task ──► Notifier ──► Sink::on_control(name, Started)
//!                     │    ──► Sink::on_error(name, &err)
//!                     │    ──► Sink::on_control(name, Stopped)
//! App::run ───────────┘    ──► Sink::on_info(msg)
//!                               │
//!                          ┌────┴─────┬──────────┐
//!                          ▼          ▼          ▼
//!                      LogWriter   SinkSet    Custom ...
//! ```
//!
//! Callbacks are synchronous. Implementations must return promptly, otherwise
//! they stall startup and shutdown of the processes they observe.

#[cfg(feature = "logging")]
mod log;
mod notifier;
mod set;
mod sink;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use notifier::Notifier;
pub use set::SinkSet;
pub use sink::{Control, Sink};
