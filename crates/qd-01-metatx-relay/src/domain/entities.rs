//! # Domain Entities
//!
//! Core data structures for signed forward requests.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes, U256};

// =============================================================================
// ECDSA SIGNATURE (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Encoded length: `r ++ s ++ v`.
    pub const LEN: usize = 65;

    /// Parses the 65-byte `r ++ s ++ v` wire form.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::LEN {
            return None;
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Some(Self { r, s, v: bytes[64] })
    }

    /// Returns the 65-byte `r ++ s ++ v` wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// FORWARD REQUEST
// =============================================================================

/// A call a signer authorises someone else to submit.
///
/// Constructed off-system by a client, consumed exactly once by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRequest {
    /// Claimed signer.
    pub from: Address,
    /// Target component.
    pub to: Address,
    /// Native value forwarded with the call.
    pub value: U256,
    /// Gas allowance for the forwarded call.
    pub gas: u64,
    /// Must equal the signer's current nonce.
    pub nonce: U256,
    /// Last unix second at which the request is valid.
    pub deadline: u64,
    /// Opaque payload for the target.
    pub data: Bytes,
}

// =============================================================================
// SIGNING DOMAIN
// =============================================================================

/// EIP-712 domain that scopes signatures to one relay on one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwarderDomain {
    /// Human readable signing domain.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain the relay lives on.
    pub chain_id: u64,
    /// Address of the relay itself.
    pub verifying_contract: Address,
}

impl ForwarderDomain {
    /// Default domain name.
    pub const DEFAULT_NAME: &'static str = "QuorumForwarder";
    /// Default domain version.
    pub const DEFAULT_VERSION: &'static str = "1";

    /// Domain with the default name and version.
    #[must_use]
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            version: Self::DEFAULT_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }
}

// =============================================================================
// RELAY OUTCOME
// =============================================================================

/// Result of a forwarded call. Failure is reported, never masked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayOutcome {
    /// Whether the target accepted the call.
    pub success: bool,
    /// Return data on success, revert data on failure.
    pub result: Bytes,
}
