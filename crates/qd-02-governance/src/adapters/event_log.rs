//! # Governance Event Sinks

use crate::events::GovernanceEvent;
use crate::ports::outbound::EventSink;
use parking_lot::Mutex;
use tracing::info;

/// Keeps every event in memory, in publication order.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<GovernanceEvent>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all published events.
    #[must_use]
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().clone()
    }

    /// Number of published events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: GovernanceEvent) {
        self.events.lock().push(event);
    }
}

/// Writes events to the tracing subscriber at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: GovernanceEvent) {
        match event {
            GovernanceEvent::ProposalCreated {
                id,
                creator,
                recipient,
                amount,
                deadline,
            } => info!(id, %creator, %recipient, %amount, deadline, "proposal created"),
            GovernanceEvent::VoteCast {
                id,
                voter,
                choice,
                for_votes,
                against_votes,
                abstain_votes,
            } => info!(
                id,
                %voter,
                %choice,
                %for_votes,
                %against_votes,
                %abstain_votes,
                "vote cast"
            ),
            GovernanceEvent::ProposalExecuted {
                id,
                success,
                amount,
                recipient,
            } => info!(id, success, %amount, %recipient, "proposal executed"),
            GovernanceEvent::FundsReceived { from, amount } => {
                info!(%from, %amount, "funds received");
            }
        }
    }
}
