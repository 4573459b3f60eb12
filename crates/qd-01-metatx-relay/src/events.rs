//! # Relay Events
//!
//! Emitted once per forwarded call, after the nonce has been consumed.

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// Events published by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RelayEvent {
    /// A signed request was forwarded to its target.
    Executed {
        /// Signer of the request.
        from: Address,
        /// Target of the forwarded call.
        to: Address,
        /// Nonce consumed by the request.
        nonce: U256,
        /// Whether the target accepted the call.
        success: bool,
    },
}
