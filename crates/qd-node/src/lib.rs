//! # Quorum-DAO Node
//!
//! Wires the relay to the governance core and puts both behind a
//! single-writer actor.
//!
//! ## Modules
//!
//! - `config` - defaults and `QD_*` environment overrides
//! - `commands` - JSON command and reply types
//! - `runtime` - the actor and its handle
//! - `serve` - JSON-lines loop over any async reader/writer
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment and validate it
//! 2. Build the ledger, governance service and relay
//! 3. Register governance as the relay's target
//! 4. Spawn the runtime and serve stdin until EOF or Ctrl+C

pub mod commands;
pub mod config;
pub mod runtime;
pub mod serve;

pub use commands::{Command, Reply};
pub use config::{ConfigError, NodeConfig, DEFAULT_FORWARDER_ADDRESS};
pub use runtime::{GovernanceRuntime, RuntimeError, RuntimeHandle};
pub use serve::{serve, ServeError};
