//! # Domain Entities
//!
//! Proposals and the calls that act on them.

use super::value_objects::{Tally, VoteChoice};
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

// =============================================================================
// PROPOSAL
// =============================================================================

/// A request to pay `amount` from the treasury to `recipient`.
///
/// Created once, tallies mutated by votes, `executed` flipped at most once.
/// Never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// 1-indexed, strictly increasing.
    pub id: u64,
    /// Effective caller that created the proposal.
    pub creator: Address,
    /// Payee on execution.
    pub recipient: Address,
    /// Native value paid on execution.
    pub amount: U256,
    /// Voting closes at this unix timestamp.
    pub deadline: u64,
    /// Unix timestamp of creation.
    pub created_at: u64,
    /// Distinct-voter counts.
    pub tally: Tally,
    /// Set once the payout has gone through.
    pub executed: bool,
}

impl Proposal {
    /// Voting is open strictly before the deadline.
    #[must_use]
    pub fn is_voting_open(&self, now: u64) -> bool {
        now < self.deadline
    }

    /// Execution is allowed strictly after this instant.
    #[must_use]
    pub fn executable_after(&self, safety_period_secs: u64) -> u64 {
        self.deadline.saturating_add(safety_period_secs)
    }

    /// Lifecycle position at `now`.
    #[must_use]
    pub fn status(&self, now: u64, safety_period_secs: u64) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if self.is_voting_open(now) {
            ProposalStatus::Active
        } else if now <= self.executable_after(safety_period_secs) {
            ProposalStatus::Cooldown
        } else if self.tally.is_approved() {
            ProposalStatus::Executable
        } else {
            ProposalStatus::Defeated
        }
    }
}

/// Where a proposal is in its lifecycle.
///
/// `Executable` does not consider the treasury balance, which is only known
/// at execution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes.
    Active,
    /// Voting closed, safety period running.
    Cooldown,
    /// Approved and past the safety period.
    Executable,
    /// Past the safety period without a strict majority for.
    Defeated,
    /// Paid out.
    Executed,
}

// =============================================================================
// CALLS
// =============================================================================

/// Operations reachable through calldata.
///
/// Encoded with bincode. A relayed call appends the signer after the encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceCall {
    /// See [`crate::GovernanceApi::create_proposal`].
    CreateProposal {
        /// Payout recipient.
        recipient: Address,
        /// Payout amount.
        amount: U256,
        /// End of voting, unix seconds.
        deadline: u64,
    },
    /// See [`crate::GovernanceApi::vote`].
    Vote {
        /// Proposal to vote on.
        proposal_id: u64,
        /// Choice to record.
        choice: VoteChoice,
    },
    /// See [`crate::GovernanceApi::execute_proposal`].
    ExecuteProposal {
        /// Proposal to pay out.
        proposal_id: u64,
    },
    /// See [`crate::GovernanceApi::fund`].
    Fund,
}

impl GovernanceCall {
    /// Operation cost charged on top of the intrinsic cost.
    #[must_use]
    pub const fn gas_cost(&self) -> u64 {
        match self {
            Self::CreateProposal { .. } => gas::CREATE_PROPOSAL,
            Self::Vote { .. } => gas::VOTE,
            Self::ExecuteProposal { .. } => gas::EXECUTE_PROPOSAL,
            Self::Fund => gas::FUND,
        }
    }

    /// Calldata for this call.
    ///
    /// # Errors
    ///
    /// Propagates bincode failures.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decodes calldata produced by [`GovernanceCall::encode`].
    ///
    /// # Errors
    ///
    /// Propagates bincode failures, including trailing bytes.
    pub fn decode(data: &[u8]) -> Result<Self, bincode::Error> {
        use bincode::Options;
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .reject_trailing_bytes()
            .deserialize(data)
    }
}

/// Gas schedule for dispatched calls.
pub mod gas {
    /// Charged for every call.
    pub const BASE: u64 = 21_000;
    /// Per zero calldata byte.
    pub const ZERO_BYTE: u64 = 4;
    /// Per non-zero calldata byte.
    pub const NON_ZERO_BYTE: u64 = 16;

    /// Proposal creation.
    pub const CREATE_PROPOSAL: u64 = 60_000;
    /// Casting or changing a vote.
    pub const VOTE: u64 = 30_000;
    /// Execution, including the outbound transfer.
    pub const EXECUTE_PROPOSAL: u64 = 50_000;
    /// Treasury deposit.
    pub const FUND: u64 = 5_000;

    /// Intrinsic cost of a call carrying `calldata`.
    #[must_use]
    pub fn intrinsic(calldata: &[u8]) -> u64 {
        calldata.iter().fold(BASE, |acc, &byte| {
            acc.saturating_add(if byte == 0 { ZERO_BYTE } else { NON_ZERO_BYTE })
        })
    }
}

/// Result of a successful execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    /// Executed proposal.
    pub proposal_id: u64,
    /// Payee.
    pub recipient: Address,
    /// Amount paid.
    pub amount: U256,
}

/// Recorded choice lookup key.
pub type VoteKey = (u64, Address);
