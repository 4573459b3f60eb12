//! # Calldata Dispatch
//!
//! Makes the governance service a [`CallTarget`], so it can be called with
//! raw calldata directly or through the relay.
//!
//! 1. Resolve identity and strip the signer suffix of trusted relay calls
//! 2. Decode the payload (empty payload = treasury deposit)
//! 3. Charge intrinsic plus operation gas against the call's limit
//! 4. Run the typed operation and bincode-encode its result

use crate::domain::entities::{gas, GovernanceCall};
use crate::domain::value_objects::GasCounter;
use crate::ports::inbound::GovernanceApi;
use crate::service::GovernanceService;
use serde::Serialize;
use shared_types::{Address, Bytes, CallContext, CallError, CallTarget};
use tracing::{debug, instrument};

impl CallTarget for GovernanceService {
    fn address(&self) -> Address {
        self.config().governance_address
    }

    #[instrument(skip(self, ctx), fields(sender = %ctx.sender, gas_limit = ctx.gas_limit))]
    fn call(&self, ctx: CallContext) -> Result<Bytes, CallError> {
        let resolved = self.identity().resolve(&ctx);
        let call = if resolved.payload.is_empty() {
            GovernanceCall::Fund
        } else {
            GovernanceCall::decode(resolved.payload)
                .map_err(|e| CallError::MalformedCalldata(e.to_string()))?
        };

        let required = gas::intrinsic(ctx.calldata.as_slice()).saturating_add(call.gas_cost());
        let mut meter = GasCounter::new(ctx.gas_limit);
        if !meter.consume(required) {
            return Err(CallError::OutOfGas {
                required,
                limit: ctx.gas_limit,
            });
        }
        debug!(caller = %resolved.caller, relayed = resolved.relayed, ?call, gas_used = meter.used(), "dispatching");

        match call {
            GovernanceCall::CreateProposal {
                recipient,
                amount,
                deadline,
            } => encode_output(&self.create_proposal(&ctx, recipient, amount, deadline)?),
            GovernanceCall::Vote {
                proposal_id,
                choice,
            } => encode_output(&self.vote(&ctx, proposal_id, choice)?),
            GovernanceCall::ExecuteProposal { proposal_id } => {
                encode_output(&self.execute_proposal(&ctx, proposal_id)?)
            }
            GovernanceCall::Fund => encode_output(&self.fund(&ctx)?),
        }
    }
}

fn encode_output<T: Serialize>(value: &T) -> Result<Bytes, CallError> {
    bincode::serialize(value)
        .map(Bytes)
        .map_err(|e| CallError::Reverted(format!("output encoding failed: {e}")))
}
