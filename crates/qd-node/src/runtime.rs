//! # Governance Runtime
//!
//! Owns the governance service and the relay on one tokio task. Callers talk
//! to it through a cloneable [`RuntimeHandle`]; commands queue on a bounded
//! channel and are handled one at a time, so exactly one call is in flight
//! system-wide.

use crate::commands::{Command, Reply};
use crate::config::NodeConfig;
use qd_01_metatx_relay::{
    EcdsaSignature, Forwarder, MetaTxRelayApi, RelayError, RelayOutcome, TracingRelaySink,
};
use qd_02_governance::{
    GovernanceApi, GovernanceError, GovernanceService, InMemoryLedger, TracingEventSink,
};
use serde::Serialize;
use serde_json::{json, Value};
use shared_types::{CallContext, Clock};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Failure to reach the runtime.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// The runtime task has stopped.
    #[error("governance runtime stopped")]
    Stopped,
}

struct Envelope {
    correlation_id: Uuid,
    command: Command,
    reply: oneshot::Sender<Reply>,
}

/// Cloneable sender side of the runtime.
#[derive(Clone, Debug)]
pub struct RuntimeHandle {
    sender: mpsc::Sender<Envelope>,
}

impl RuntimeHandle {
    /// Queues `command` and waits for its reply.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Stopped`] if the runtime is gone.
    pub async fn submit(&self, command: Command) -> Result<Reply, RuntimeError> {
        let (reply, response) = oneshot::channel();
        let envelope = Envelope {
            correlation_id: Uuid::new_v4(),
            command,
            reply,
        };
        self.sender
            .send(envelope)
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        response.await.map_err(|_| RuntimeError::Stopped)
    }
}

/// Failed command: error kind and message.
type Failure = (&'static str, String);

/// The single writer.
pub struct GovernanceRuntime {
    config: NodeConfig,
    governance: Arc<GovernanceService>,
    forwarder: Arc<Forwarder>,
    ledger: Arc<InMemoryLedger>,
    receiver: mpsc::Receiver<Envelope>,
}

impl GovernanceRuntime {
    /// Wires the relay to governance and returns the runtime with its handle.
    #[must_use]
    pub fn new(config: &NodeConfig, clock: Arc<dyn Clock>) -> (Self, RuntimeHandle) {
        let ledger = Arc::new(InMemoryLedger::new());
        let governance = Arc::new(
            GovernanceService::new(
                config.governance_config(),
                clock.clone(),
                ledger.clone(),
                Arc::new(TracingEventSink),
            )
            .with_treasury(config.governance.initial_treasury),
        );
        let forwarder = Arc::new(Forwarder::new(
            config.forwarder_domain(),
            clock,
            Arc::new(TracingRelaySink),
        ));
        forwarder.register_target(governance.clone());

        let (sender, receiver) = mpsc::channel(config.runtime.command_queue);
        let runtime = Self {
            config: config.clone(),
            governance,
            forwarder,
            ledger,
            receiver,
        };
        (runtime, RuntimeHandle { sender })
    }

    /// Ledger recipients are paid into.
    #[must_use]
    pub fn ledger(&self) -> Arc<InMemoryLedger> {
        self.ledger.clone()
    }

    /// Governance service, for inspection.
    #[must_use]
    pub fn governance(&self) -> Arc<GovernanceService> {
        self.governance.clone()
    }

    /// Runs the loop on a new task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Handles commands until every handle is dropped.
    pub async fn run(mut self) {
        info!(
            chain_id = self.config.chain.chain_id,
            forwarder = %self.forwarder.address(),
            governance = %self.config.chain.governance_address,
            "governance runtime started"
        );
        while let Some(envelope) = self.receiver.recv().await {
            let span = info_span!(
                "command",
                correlation_id = %envelope.correlation_id,
                command = envelope.command.name()
            );
            let reply = span.in_scope(|| self.handle(envelope.correlation_id, envelope.command));
            if envelope.reply.send(reply).is_err() {
                debug!(correlation_id = %envelope.correlation_id, "caller dropped before reply");
            }
        }
        let stats = self.governance.stats();
        info!(
            committed = stats.committed,
            rejected = stats.rejected,
            "governance runtime stopped"
        );
    }

    /// Handles one command synchronously.
    pub fn handle(&self, correlation_id: Uuid, command: Command) -> Reply {
        let id = correlation_id.to_string();
        match self.dispatch(command) {
            Ok(result) => Reply::Ok { id, result },
            Err((kind, message)) => {
                debug!(kind, %message, "command failed");
                Reply::Error {
                    id,
                    kind: kind.to_string(),
                    message,
                }
            }
        }
    }

    fn dispatch(&self, command: Command) -> Result<Value, Failure> {
        let governance = self.governance.as_ref();
        match command {
            Command::Fund { from, amount } => {
                let ctx = CallContext::direct(from).with_value(amount);
                let balance = governance.fund(&ctx).map_err(governance_failure)?;
                to_json(&json!({ "treasury": balance }))
            }
            Command::CreateProposal {
                from,
                recipient,
                amount,
                deadline,
            } => {
                let ctx = CallContext::direct(from);
                let id = governance
                    .create_proposal(&ctx, recipient, amount, deadline)
                    .map_err(governance_failure)?;
                Ok(json!({ "proposal_id": id }))
            }
            Command::Vote {
                from,
                proposal_id,
                choice,
            } => {
                let tally = governance
                    .vote(&CallContext::direct(from), proposal_id, choice)
                    .map_err(governance_failure)?;
                to_json(&tally)
            }
            Command::ExecuteProposal { from, proposal_id } => {
                let receipt = governance
                    .execute_proposal(&CallContext::direct(from), proposal_id)
                    .map_err(governance_failure)?;
                to_json(&receipt)
            }
            Command::Relay {
                relayer,
                request,
                signature,
                value,
            } => {
                let signature = parse_signature(signature.as_slice())?;
                let ctx = CallContext::direct(relayer).with_value(value.unwrap_or(request.value));
                let outcome = self
                    .forwarder
                    .execute(&ctx, &request, &signature)
                    .map_err(relay_failure)?;
                if !outcome.success {
                    warn!(from = %request.from, "forwarded call failed");
                }
                to_json(&outcome_json(&outcome))
            }
            Command::GetProposal { proposal_id } => to_json(&governance.get_proposal(proposal_id)),
            Command::GetVote { proposal_id, voter } => {
                to_json(&governance.get_vote(proposal_id, &voter))
            }
            Command::TreasuryBalance => to_json(&governance.treasury_balance()),
            Command::ProposalCount => to_json(&governance.proposal_count()),
            Command::ProposalStatus { proposal_id } => {
                to_json(&governance.proposal_status(proposal_id))
            }
            Command::GetNonce { signer } => to_json(&self.forwarder.get_nonce(&signer)),
            Command::VerifyRelay { request, signature } => {
                let signature = parse_signature(signature.as_slice())?;
                match self.forwarder.verify(&request, &signature) {
                    Ok(()) => Ok(json!({ "valid": true })),
                    Err(err) => Ok(json!({ "valid": false, "reason": err.to_string() })),
                }
            }
            Command::NodeInfo => to_json(&json!({
                "chain_id": self.config.chain.chain_id,
                "forwarder": self.forwarder.address(),
                "governance": self.config.chain.governance_address,
                "domain": self.forwarder.domain(),
                "safety_period_secs": self.config.governance.safety_period_secs,
            })),
        }
    }
}

fn governance_failure(err: GovernanceError) -> Failure {
    (err.category().as_str(), err.to_string())
}

fn relay_failure(err: RelayError) -> Failure {
    let kind = if err.is_authorization_failure() {
        "authorization"
    } else {
        "validation"
    };
    (kind, err.to_string())
}

fn parse_signature(bytes: &[u8]) -> Result<EcdsaSignature, Failure> {
    EcdsaSignature::from_slice(bytes).ok_or_else(|| {
        (
            "validation",
            format!("signature must be {} bytes, got {}", EcdsaSignature::LEN, bytes.len()),
        )
    })
}

/// Failed forwarded calls carry their revert reason as text.
fn outcome_json(outcome: &RelayOutcome) -> Value {
    if outcome.success {
        json!({ "success": true, "result": outcome.result })
    } else {
        json!({
            "success": false,
            "reason": String::from_utf8_lossy(outcome.result.as_slice()),
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, Failure> {
    serde_json::to_value(value).map_err(|e| ("internal", e.to_string()))
}
