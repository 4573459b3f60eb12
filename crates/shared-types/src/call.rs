//! # Call Model
//!
//! A call is the only way state changes enter a component. The context names
//! the direct sender; components that trust a relay may reinterpret the
//! trailing 20 bytes of calldata as the original signer (ERC-2771 layout):
//!
//! ```text
//! calldata = encoded_call ++ signer_address (20 bytes)
//! ```

use crate::entities::{Address, Bytes, U256};
use crate::errors::CallError;
use serde::{Deserialize, Serialize};

/// Everything a component learns about an incoming call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Direct sender of the call (a relay address for forwarded calls).
    pub sender: Address,
    /// Native value attached to the call.
    pub value: U256,
    /// Gas allowance for the call.
    pub gas_limit: u64,
    /// Encoded operation, plus the signer suffix for forwarded calls.
    pub calldata: Bytes,
}

impl CallContext {
    /// Gas allowance used when the caller does not specify one.
    pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

    /// A direct call with no value and no calldata.
    #[must_use]
    pub fn direct(sender: Address) -> Self {
        Self {
            sender,
            value: U256::zero(),
            gas_limit: Self::DEFAULT_GAS_LIMIT,
            calldata: Bytes::new(),
        }
    }

    /// A direct call carrying encoded calldata.
    #[must_use]
    pub fn with_calldata(sender: Address, calldata: Vec<u8>) -> Self {
        Self {
            calldata: Bytes(calldata),
            ..Self::direct(sender)
        }
    }

    /// A call made by `relay` on behalf of `signer`.
    ///
    /// The signer is appended to `data` so the target can recover it.
    #[must_use]
    pub fn forwarded(
        relay: Address,
        signer: Address,
        value: U256,
        gas_limit: u64,
        data: &[u8],
    ) -> Self {
        let mut calldata = Vec::with_capacity(data.len() + Address::LEN);
        calldata.extend_from_slice(data);
        calldata.extend_from_slice(signer.as_bytes());
        Self {
            sender: relay,
            value,
            gas_limit,
            calldata: Bytes(calldata),
        }
    }

    /// Attaches native value to the call.
    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Splits calldata into `(payload, signer)` when it carries a suffix.
    ///
    /// Returns None when calldata is shorter than an address. Callers must
    /// only use this for calls whose sender is a trusted relay.
    #[must_use]
    pub fn split_signer_suffix(&self) -> Option<(&[u8], Address)> {
        let data = self.calldata.as_slice();
        if data.len() < Address::LEN {
            return None;
        }
        let (payload, suffix) = data.split_at(data.len() - Address::LEN);
        Address::from_slice(suffix).map(|signer| (payload, signer))
    }
}

/// A component that can receive calls, directly or through the relay.
pub trait CallTarget: Send + Sync {
    /// Address the component is reachable at.
    fn address(&self) -> Address;

    /// Executes the call atomically.
    ///
    /// # Errors
    ///
    /// Any error means the call applied no state change.
    fn call(&self, ctx: CallContext) -> Result<Bytes, CallError>;
}
