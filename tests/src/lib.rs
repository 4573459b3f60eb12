//! # Quorum-DAO Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Relay + governance wired like the node does it
//! ├── exploits/         # Attack simulations
//! │   ├── reentrancy.rs # Recipients calling back during payout
//! │   └── replay.rs     # Signature replay, forgery, malleability
//! └── integration/      # Cross-crate flows
//!     ├── lifecycle.rs  # Fund, propose, vote, execute
//!     ├── relayed.rs    # Everything above through the relay
//!     └── node.rs       # JSON-lines node end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qd-tests
//!
//! # By category
//! cargo test -p qd-tests integration::
//! cargo test -p qd-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p qd-tests
//! ```

#![allow(dead_code)]

pub mod harness;
pub mod integration;
