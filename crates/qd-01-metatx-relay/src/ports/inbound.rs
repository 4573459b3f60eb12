//! # Inbound Ports (Driving Ports / API)
//!
//! The public surface of the relay.

use crate::domain::entities::{EcdsaSignature, ForwardRequest, RelayOutcome};
use crate::domain::errors::RelayError;
use shared_types::{Address, CallContext, U256};

/// Meta-transaction relay API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait MetaTxRelayApi: Send + Sync {
    /// Current nonce of `signer`.
    fn get_nonce(&self, signer: &Address) -> U256;

    /// Checks deadline, nonce and signature, in that order.
    ///
    /// # Errors
    ///
    /// The first failed check as a [`RelayError`].
    fn verify(&self, request: &ForwardRequest, signature: &EcdsaSignature) -> Result<(), RelayError>;

    /// Boolean form of [`MetaTxRelayApi::verify`].
    fn is_valid(&self, request: &ForwardRequest, signature: &EcdsaSignature) -> bool {
        self.verify(request, signature).is_ok()
    }

    /// Verifies, consumes the nonce, then forwards the call.
    ///
    /// `relayer` is the context of the party submitting and paying for the
    /// request; its value must equal `request.value`.
    ///
    /// # Errors
    ///
    /// A [`RelayError`] if the request is refused before forwarding. A
    /// forwarded call that fails is reported in the returned outcome.
    fn execute(
        &self,
        relayer: &CallContext,
        request: &ForwardRequest,
        signature: &EcdsaSignature,
    ) -> Result<RelayOutcome, RelayError>;
}
