//! # QD-02 Governance
//!
//! Proposal store, voting ledger, execution gate and treasury of Quorum-DAO.
//!
//! ## Purpose
//!
//! Members propose payouts from a shared treasury, vote for, against or
//! abstain (and may change their vote until the deadline), and anyone may
//! trigger an approved payout once a safety period after the deadline has
//! passed.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Ids start at 1 and increase by 1 | `domain/state.rs` - `next_proposal_id()` |
//! | Tallies equal distinct voters per choice | `service.rs` - `apply_vote()`, `domain/invariants.rs` |
//! | Voting closes at the deadline instant | `domain/entities.rs` - `Proposal::is_voting_open()` |
//! | Execution needs `now > deadline + safety` and `for > against` | `service.rs` - `execute_inner()` |
//! | `executed` flips once, never back | `service.rs` - `execute_inner()` |
//! | No partial effects on failure | `store.rs` - `Transaction` rollback on drop |
//! | No nested entry into a mutator | `guard.rs` - `ReentrancyGuard` |
//!
//! ## Identity
//!
//! Exactly one relay address may be trusted. Calls from it act for the signer
//! carried in the last 20 bytes of calldata; every other call acts for its
//! direct sender. See `domain/identity.rs`.
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `Clock` | Unix time for deadlines |
//! | `ValueTransfer` | Pays recipients; may call back in |
//! | `EventSink` | Receives committed events |
//!
//! ## Usage Example
//!
//! ```ignore
//! use qd_02_governance::prelude::*;
//!
//! let id = service.create_proposal(&ctx, recipient, amount, deadline)?;
//! service.vote(&voter_ctx, id, VoteChoice::For)?;
//! // ... after deadline + safety period
//! service.execute_proposal(&anyone, id)?;
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ports;
pub mod service;
pub mod store;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        gas, ExecutionReceipt, GovernanceCall, Proposal, ProposalStatus,
    };
    pub use crate::domain::identity::{IdentityResolver, ResolvedCall};
    pub use crate::domain::invariants::{check_all_invariants, check_tally_invariant};
    pub use crate::domain::state::GovernanceState;
    pub use crate::domain::value_objects::{GasCounter, Tally, VoteChoice};

    pub use crate::ports::inbound::GovernanceApi;
    pub use crate::ports::outbound::{EventSink, TransferError, ValueTransfer};

    pub use crate::events::GovernanceEvent;
    pub use crate::errors::{ErrorCategory, GovernanceError};

    pub use crate::adapters::{
        InMemoryEventLog, InMemoryLedger, RecipientHook, RejectingRecipient, TracingEventSink,
    };

    pub use crate::service::{
        create_test_service, GovernanceConfig, GovernanceService, GovernanceStats, TestService,
        DEFAULT_GOVERNANCE_ADDRESS, DEFAULT_SAFETY_PERIOD_SECS, TEST_START_TIME,
    };
}

pub use prelude::*;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
