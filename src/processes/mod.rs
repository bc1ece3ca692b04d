//! # Process abstractions.
//!
//! - [`Worker`]: trait for struct-based process entries (async, cancelable)
//! - `Process`: the record the supervisor keeps per registration (name, entry, completion signal)

mod process;
mod worker;

pub(crate) use process::{Completion, Entry, Process, ProcessTask};
pub use worker::Worker;
