//! # Outbound Ports
//!
//! What the governance core needs from its host.

use crate::events::GovernanceEvent;
use shared_types::{Address, U256};
use thiserror::Error;

/// Why a value transfer failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    /// The recipient refused the value.
    #[error("recipient rejected transfer: {0}")]
    Rejected(String),

    /// The sending side could not cover the amount.
    #[error("transfer source underfunded")]
    Underfunded,
}

/// Sends native value out of the treasury.
///
/// Implementations may run recipient code synchronously, and that code may
/// call back into governance before `transfer` returns.
pub trait ValueTransfer: Send + Sync {
    /// Credits `amount` to `to`.
    ///
    /// # Errors
    ///
    /// Any error means `to` received nothing.
    fn transfer(&self, to: Address, amount: U256) -> Result<(), TransferError>;
}

/// Receives committed events.
pub trait EventSink: Send + Sync {
    /// Publishes one event.
    fn publish(&self, event: GovernanceEvent);
}
