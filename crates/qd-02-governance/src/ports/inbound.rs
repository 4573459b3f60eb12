//! # Inbound Ports (Driving Ports / API)
//!
//! Typed entry points. Each write takes the full [`CallContext`] so the
//! effective caller is resolved the same way for direct and relayed calls.

use crate::domain::entities::{ExecutionReceipt, Proposal, ProposalStatus};
use crate::domain::value_objects::{Tally, VoteChoice};
use crate::errors::GovernanceError;
use shared_types::{Address, CallContext, U256};

/// Governance API.
///
/// Every write is atomic: it either commits all of its effects and events or
/// returns an error with state unchanged.
pub trait GovernanceApi: Send + Sync {
    // --- writes ---

    /// Stores a new proposal and returns its id.
    ///
    /// # Errors
    ///
    /// Validation errors for a zero recipient, zero amount, a deadline not
    /// strictly in the future, or configured limits.
    fn create_proposal(
        &self,
        ctx: &CallContext,
        recipient: Address,
        amount: U256,
        deadline: u64,
    ) -> Result<u64, GovernanceError>;

    /// Casts or changes the caller's vote and returns the updated tallies.
    ///
    /// # Errors
    ///
    /// Unknown proposal, voting closed, or `VoteChoice::None`.
    fn vote(
        &self,
        ctx: &CallContext,
        proposal_id: u64,
        choice: VoteChoice,
    ) -> Result<Tally, GovernanceError>;

    /// Pays out an approved proposal after its safety period.
    ///
    /// # Errors
    ///
    /// Any failed eligibility check, a failed transfer (fully rolled back),
    /// or a reentrant call.
    fn execute_proposal(
        &self,
        ctx: &CallContext,
        proposal_id: u64,
    ) -> Result<ExecutionReceipt, GovernanceError>;

    /// Deposits `ctx.value` into the treasury and returns the new balance.
    ///
    /// # Errors
    ///
    /// Zero value or balance overflow.
    fn fund(&self, ctx: &CallContext) -> Result<U256, GovernanceError>;

    // --- reads ---

    /// Proposal by id.
    fn get_proposal(&self, proposal_id: u64) -> Option<Proposal>;

    /// Recorded choice of `voter` (`VoteChoice::None` if never voted).
    fn get_vote(&self, proposal_id: u64, voter: &Address) -> VoteChoice;

    /// Current treasury balance.
    fn treasury_balance(&self) -> U256;

    /// Number of proposals ever created.
    fn proposal_count(&self) -> u64;

    /// Lifecycle position of a proposal right now.
    fn proposal_status(&self, proposal_id: u64) -> Option<ProposalStatus>;
}
