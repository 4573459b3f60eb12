//! # Ports Layer
//!
//! - **Inbound** (`inbound.rs`): `GovernanceApi`
//! - **Outbound** (`outbound.rs`): `ValueTransfer`, `EventSink`

pub mod inbound;
pub mod outbound;
