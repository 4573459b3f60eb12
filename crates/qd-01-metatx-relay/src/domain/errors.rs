//! # Relay Errors
//!
//! Every error here is raised before the forwarded call is made, so a failed
//! verification never consumes a nonce.

use shared_types::{Address, U256};
use thiserror::Error;

/// Errors that can occur during signature recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (zero or out-of-range scalars)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Signing backend rejected the digest
    #[error("Signing failed")]
    SigningFailed,
}

/// Reasons a forward request is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// `now > request.deadline`.
    #[error("request expired at {deadline}, now {now}")]
    Expired { deadline: u64, now: u64 },

    /// `request.nonce` is not the signer's current nonce.
    #[error("nonce mismatch: expected {expected}, got {provided}")]
    NonceMismatch { expected: U256, provided: U256 },

    /// Signature could not be recovered at all.
    #[error("bad signature: {0}")]
    BadSignature(#[from] SignatureError),

    /// Signature recovered to someone other than `request.from`.
    #[error("signer mismatch: expected {expected:?}, recovered {recovered:?}")]
    SignerMismatch { expected: Address, recovered: Address },

    /// Value attached by the relayer differs from `request.value`.
    #[error("value mismatch: request carries {requested}, relayer attached {attached}")]
    ValueMismatch { requested: U256, attached: U256 },

    /// `request.to` is not registered with the relay.
    #[error("unknown target: {0:?}")]
    UnknownTarget(Address),
}

impl RelayError {
    /// Returns true for failures tied to authorization of the signer.
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            Self::Expired { .. }
                | Self::NonceMismatch { .. }
                | Self::BadSignature(_)
                | Self::SignerMismatch { .. }
        )
    }
}
