//! # In-Memory Ledger
//!
//! Native-value balances of payees. A recipient may register a hook that runs
//! before it is credited; the hook can refuse the value or call back into
//! governance, which is how rollback and reentrancy are exercised.

use crate::ports::outbound::{TransferError, ValueTransfer};
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Code run when a recipient receives value.
pub trait RecipientHook: Send + Sync {
    /// Returning an error refuses the transfer.
    ///
    /// # Errors
    ///
    /// A human-readable refusal reason.
    fn on_receive(&self, amount: U256) -> Result<(), String>;
}

impl<F> RecipientHook for F
where
    F: Fn(U256) -> Result<(), String> + Send + Sync,
{
    fn on_receive(&self, amount: U256) -> Result<(), String> {
        self(amount)
    }
}

/// Hook that refuses every transfer.
#[derive(Debug, Clone)]
pub struct RejectingRecipient {
    reason: String,
}

impl RejectingRecipient {
    /// Refuses with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RecipientHook for RejectingRecipient {
    fn on_receive(&self, _amount: U256) -> Result<(), String> {
        Err(self.reason.clone())
    }
}

/// Recipient balances plus optional per-recipient hooks.
#[derive(Default)]
pub struct InMemoryLedger {
    balances: RwLock<HashMap<Address, U256>>,
    hooks: RwLock<HashMap<Address, Arc<dyn RecipientHook>>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `address`.
    #[must_use]
    pub fn balance_of(&self, address: &Address) -> U256 {
        self.balances
            .read()
            .get(address)
            .copied()
            .unwrap_or_default()
    }

    /// Runs `hook` on every future transfer to `address`.
    pub fn set_hook(&self, address: Address, hook: Arc<dyn RecipientHook>) {
        self.hooks.write().insert(address, hook);
    }

    /// Removes the hook of `address`.
    pub fn clear_hook(&self, address: &Address) {
        self.hooks.write().remove(address);
    }
}

impl ValueTransfer for InMemoryLedger {
    fn transfer(&self, to: Address, amount: U256) -> Result<(), TransferError> {
        // No lock may be held while the hook runs: it can call back in.
        let hook = self.hooks.read().get(&to).cloned();
        if let Some(hook) = hook {
            hook.on_receive(amount).map_err(TransferError::Rejected)?;
        }

        let mut balances = self.balances.write();
        let balance = balances.entry(to).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("recipient balance overflow".into()))?;
        debug!(%to, %amount, "ledger credited");
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLedger")
            .field("accounts", &self.balances.read().len())
            .field("hooks", &self.hooks.read().len())
            .finish()
    }
}
