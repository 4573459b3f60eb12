//! # Adapters Layer
//!
//! In-memory value ledger and event sinks.

pub mod event_log;
pub mod ledger;

pub use event_log::*;
pub use ledger::*;
