//! # Integration Tests
//!
//! Flows that cross the relay, governance and node crates.

pub mod lifecycle;
