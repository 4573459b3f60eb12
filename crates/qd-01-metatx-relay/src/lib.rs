//! # QD-01 MetaTx Relay
//!
//! Lets a third party submit, and pay for, a call authorised by a signer who
//! only produced an EIP-712 signature.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): typed-data hashing, secp256k1 recovery,
//!   nonce registry. No I/O.
//! - **Ports Layer** (`ports/`): `MetaTxRelayApi` (inbound), `RelayEventSink`
//!   (outbound)
//! - **Service Layer** (`service.rs`): the `Forwarder`
//!
//! ## Security Notes
//!
//! - **Replay Protection**: each signer has a monotonic nonce; it is consumed
//!   before the forwarded call is made
//! - **Domain Binding**: signatures are scoped to one relay address and chain id
//! - **Expiry**: requests carry a deadline checked at submission time
//! - **Malleability Prevention (EIP-2)**: high-S signatures are rejected
//!
//! ## Forwarded Call Layout
//!
//! Targets receive `request.data ++ request.from` with the relay as direct
//! sender. Only targets that trust this relay may read the suffix.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{InMemoryRelayLog, TracingRelaySink};
pub use domain::ecdsa::{address_from_pubkey, recover_address};
pub use domain::entities::{EcdsaSignature, ForwardRequest, ForwarderDomain, RelayOutcome};
pub use domain::errors::{RelayError, SignatureError};
pub use domain::nonces::NonceRegistry;
pub use domain::signing::{address_of, sign_digest, sign_request};
pub use domain::typed_data::{struct_hash, typed_data_digest};
pub use events::RelayEvent;
pub use ports::inbound::MetaTxRelayApi;
pub use ports::outbound::RelayEventSink;
pub use service::Forwarder;

/// Key type wallets sign with.
pub use k256::ecdsa::SigningKey;
