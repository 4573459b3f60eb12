//! # Error Types
//!
//! Errors that cross subsystem boundaries through [`crate::CallTarget`].

use thiserror::Error;

/// Failure of a call into a [`crate::CallTarget`].
///
/// A target that returns any of these has applied no state change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    /// Calldata could not be decoded into an operation.
    #[error("malformed calldata: {0}")]
    MalformedCalldata(String),

    /// The call ran out of its gas allowance.
    #[error("out of gas: required {required}, limit {limit}")]
    OutOfGas { required: u64, limit: u64 },

    /// The target rejected the call.
    #[error("reverted: {0}")]
    Reverted(String),

    /// No target is registered at the requested address.
    #[error("unknown call target: {0}")]
    UnknownTarget(String),
}

impl CallError {
    /// Encodes the failure as return data for callers that only see bytes.
    #[must_use]
    pub fn to_revert_data(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}
