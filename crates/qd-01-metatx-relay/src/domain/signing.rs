//! # Client-Side Signing
//!
//! Helpers for wallets and tests that produce signatures the relay accepts.
//! Signatures are always emitted in low-S form with `v` in {27, 28}.

use super::ecdsa::{address_from_pubkey, invert_s, is_low_s};
use super::entities::{EcdsaSignature, ForwardRequest, ForwarderDomain};
use super::errors::SignatureError;
use super::typed_data::typed_data_digest;
use k256::ecdsa::SigningKey;
use shared_types::{Address, Hash};

/// Address controlled by `key`.
#[must_use]
pub fn address_of(key: &SigningKey) -> Address {
    address_from_pubkey(key.verifying_key())
}

/// Signs a 32-byte digest.
///
/// # Errors
///
/// Returns [`SignatureError::SigningFailed`] if the backend rejects the digest.
pub fn sign_digest(key: &SigningKey, digest: &Hash) -> Result<EcdsaSignature, SignatureError> {
    let (sig, recid) = key
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|_| SignatureError::SigningFailed)?;

    let sig_bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    let signature = if is_low_s(&s) {
        EcdsaSignature {
            r,
            s,
            v: recid.to_byte() + 27,
        }
    } else {
        // Negating s flips the parity of the recovered point.
        EcdsaSignature {
            r,
            s: invert_s(&s),
            v: if recid.to_byte() == 0 { 28 } else { 27 },
        }
    };
    Ok(signature)
}

/// Signs `request` under `domain`.
///
/// # Errors
///
/// See [`sign_digest`].
pub fn sign_request(
    key: &SigningKey,
    domain: &ForwarderDomain,
    request: &ForwardRequest,
) -> Result<EcdsaSignature, SignatureError> {
    sign_digest(key, &typed_data_digest(&domain.separator(), request))
}
