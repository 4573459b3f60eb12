//! # Relay Event Sinks

use crate::events::RelayEvent;
use crate::ports::outbound::RelayEventSink;
use parking_lot::Mutex;
use tracing::info;

/// Keeps every event in memory, in publication order.
#[derive(Debug, Default)]
pub struct InMemoryRelayLog {
    events: Mutex<Vec<RelayEvent>>,
}

impl InMemoryRelayLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all published events.
    #[must_use]
    pub fn events(&self) -> Vec<RelayEvent> {
        self.events.lock().clone()
    }
}

impl RelayEventSink for InMemoryRelayLog {
    fn publish(&self, event: RelayEvent) {
        self.events.lock().push(event);
    }
}

/// Writes events to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRelaySink;

impl RelayEventSink for TracingRelaySink {
    fn publish(&self, event: RelayEvent) {
        match event {
            RelayEvent::Executed {
                from,
                to,
                nonce,
                success,
            } => info!(%from, %to, %nonce, success, "relay executed"),
        }
    }
}
