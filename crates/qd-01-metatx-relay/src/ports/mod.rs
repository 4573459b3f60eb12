//! # Ports Layer
//!
//! - **Driving Port (Inbound)**: `MetaTxRelayApi`
//! - **Driven Port (Outbound)**: `RelayEventSink`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
