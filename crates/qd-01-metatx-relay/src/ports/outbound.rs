//! # Outbound Ports (Driven Ports / SPI)

use crate::events::RelayEvent;

/// Destination for relay events.
pub trait RelayEventSink: Send + Sync {
    /// Publishes an event.
    fn publish(&self, event: RelayEvent);
}
