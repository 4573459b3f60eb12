//! # Forwarder Service
//!
//! Application service implementing [`MetaTxRelayApi`].
//!
//! ## Ordering
//!
//! 1. Relayer value must match `request.value`; target must be registered
//! 2. `now <= request.deadline`
//! 3. `request.nonce == nonces[request.from]`
//! 4. Typed-data signature recovers to `request.from`
//! 5. Nonce consumed (checked and written under one lock)
//! 6. Call forwarded with the signer appended to calldata
//!
//! Consuming the nonce before the outbound call closes the replay window: a
//! target that calls back into the relay sees the request as spent.

use crate::domain::ecdsa;
use crate::domain::entities::{EcdsaSignature, ForwardRequest, ForwarderDomain, RelayOutcome};
use crate::domain::errors::RelayError;
use crate::domain::nonces::NonceRegistry;
use crate::domain::typed_data::typed_data_digest;
use crate::events::RelayEvent;
use crate::ports::inbound::MetaTxRelayApi;
use crate::ports::outbound::RelayEventSink;
use parking_lot::{Mutex, RwLock};
use shared_types::{Address, Bytes, CallContext, CallTarget, Clock, Hash, U256};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Meta-transaction relay.
pub struct Forwarder {
    domain: ForwarderDomain,
    separator: Hash,
    nonces: Mutex<NonceRegistry>,
    targets: RwLock<HashMap<Address, Arc<dyn CallTarget>>>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn RelayEventSink>,
}

impl Forwarder {
    /// Creates a relay for `domain`.
    pub fn new(
        domain: ForwarderDomain,
        clock: Arc<dyn Clock>,
        events: Arc<dyn RelayEventSink>,
    ) -> Self {
        let separator = domain.separator();
        Self {
            domain,
            separator,
            nonces: Mutex::new(NonceRegistry::new()),
            targets: RwLock::new(HashMap::new()),
            clock,
            events,
        }
    }

    /// Address of the relay (the `verifyingContract` of its domain).
    #[must_use]
    pub fn address(&self) -> Address {
        self.domain.verifying_contract
    }

    /// Signing domain clients must use.
    #[must_use]
    pub fn domain(&self) -> &ForwarderDomain {
        &self.domain
    }

    /// Makes `target` reachable at `target.address()`.
    pub fn register_target(&self, target: Arc<dyn CallTarget>) {
        let address = target.address();
        info!(%address, "registered relay target");
        self.targets.write().insert(address, target);
    }

    /// Digest a signer must sign for `request`.
    #[must_use]
    pub fn digest(&self, request: &ForwardRequest) -> Hash {
        typed_data_digest(&self.separator, request)
    }

    fn check(&self, request: &ForwardRequest, signature: &EcdsaSignature, nonces: &NonceRegistry) -> Result<(), RelayError> {
        let now = self.clock.now();
        if now > request.deadline {
            return Err(RelayError::Expired {
                deadline: request.deadline,
                now,
            });
        }

        nonces.check(&request.from, request.nonce)?;

        let recovered = ecdsa::recover_address(&self.digest(request), signature)?;
        if recovered != request.from {
            return Err(RelayError::SignerMismatch {
                expected: request.from,
                recovered,
            });
        }
        Ok(())
    }

    fn target(&self, address: Address) -> Result<Arc<dyn CallTarget>, RelayError> {
        self.targets
            .read()
            .get(&address)
            .cloned()
            .ok_or(RelayError::UnknownTarget(address))
    }
}

impl MetaTxRelayApi for Forwarder {
    fn get_nonce(&self, signer: &Address) -> U256 {
        self.nonces.lock().get(signer)
    }

    fn verify(&self, request: &ForwardRequest, signature: &EcdsaSignature) -> Result<(), RelayError> {
        let nonces = self.nonces.lock();
        self.check(request, signature, &nonces)
    }

    #[instrument(skip_all, fields(from = %request.from, to = %request.to, nonce = %request.nonce))]
    fn execute(
        &self,
        relayer: &CallContext,
        request: &ForwardRequest,
        signature: &EcdsaSignature,
    ) -> Result<RelayOutcome, RelayError> {
        if relayer.value != request.value {
            return Err(RelayError::ValueMismatch {
                requested: request.value,
                attached: relayer.value,
            });
        }
        let target = self.target(request.to)?;

        {
            let mut nonces = self.nonces.lock();
            if let Err(err) = self.check(request, signature, &nonces) {
                warn!(error = %err, "relay request rejected");
                return Err(err);
            }
            let next = nonces.consume(request.from, request.nonce)?;
            debug!(next_nonce = %next, "nonce consumed");
        }

        let ctx = CallContext::forwarded(
            self.address(),
            request.from,
            request.value,
            request.gas,
            request.data.as_slice(),
        );

        let outcome = match target.call(ctx) {
            Ok(result) => RelayOutcome {
                success: true,
                result,
            },
            Err(err) => {
                warn!(error = %err, "forwarded call failed");
                RelayOutcome {
                    success: false,
                    result: Bytes(err.to_revert_data()),
                }
            }
        };

        self.events.publish(RelayEvent::Executed {
            from: request.from,
            to: request.to,
            nonce: request.nonce,
            success: outcome.success,
        });
        Ok(outcome)
    }
}

// =============================================================================
// TESTS
// =============================================================================
