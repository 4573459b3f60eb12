//! # Adapters Layer
//!
//! Concrete event sinks for the relay.

pub mod event_log;

pub use event_log::*;
