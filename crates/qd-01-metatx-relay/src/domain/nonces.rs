//! # Nonce Registry
//!
//! Per-signer monotonic counters. A nonce starts at zero, moves up by exactly
//! one per consumed request, and is never reset or decremented.

use super::errors::RelayError;
use shared_types::{Address, U256};
use std::collections::HashMap;

/// Tracks the next expected nonce of every signer.
#[derive(Debug, Default, Clone)]
pub struct NonceRegistry {
    nonces: HashMap<Address, U256>,
}

impl NonceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nonce of `signer` (zero if never seen).
    #[must_use]
    pub fn get(&self, signer: &Address) -> U256 {
        self.nonces.get(signer).copied().unwrap_or_default()
    }

    /// Checks that `provided` is the signer's current nonce.
    ///
    /// # Errors
    ///
    /// [`RelayError::NonceMismatch`] otherwise.
    pub fn check(&self, signer: &Address, provided: U256) -> Result<(), RelayError> {
        let expected = self.get(signer);
        if expected == provided {
            Ok(())
        } else {
            Err(RelayError::NonceMismatch { expected, provided })
        }
    }

    /// Consumes `provided` and returns the new current nonce.
    ///
    /// # Errors
    ///
    /// [`RelayError::NonceMismatch`] if `provided` is not current.
    pub fn consume(&mut self, signer: Address, provided: U256) -> Result<U256, RelayError> {
        self.check(&signer, provided)?;
        let next = provided.saturating_add(U256::one());
        self.nonces.insert(signer, next);
        Ok(next)
    }

    /// Number of signers that have consumed at least one nonce.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nonces.len()
    }

    /// Returns true if no nonce has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nonces.is_empty()
    }
}
