//! # Governance Events
//!
//! Emitted only after the operation that produced them has committed. A
//! rolled-back operation emits nothing.

use crate::domain::value_objects::VoteChoice;
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// Observable outcome of a committed governance operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum GovernanceEvent {
    /// A proposal was stored.
    ProposalCreated {
        /// Assigned proposal id.
        id: u64,
        /// Effective caller that created it.
        creator: Address,
        /// Payout recipient.
        recipient: Address,
        /// Payout amount.
        amount: U256,
        /// End of voting, unix seconds.
        deadline: u64,
    },
    /// A vote was cast or changed. Tallies are the values after the change.
    VoteCast {
        /// Proposal voted on.
        id: u64,
        /// Effective caller.
        voter: Address,
        /// Choice now recorded for the voter.
        choice: VoteChoice,
        /// Votes for.
        for_votes: U256,
        /// Votes against.
        against_votes: U256,
        /// Abstentions.
        abstain_votes: U256,
    },
    /// A proposal was paid out.
    ProposalExecuted {
        /// Executed proposal.
        id: u64,
        /// Whether the transfer went through. Always true once committed.
        success: bool,
        /// Amount paid.
        amount: U256,
        /// Who was paid.
        recipient: Address,
    },
    /// The treasury received value.
    FundsReceived {
        /// Effective caller that sent the value.
        from: Address,
        /// Value received.
        amount: U256,
    },
}

impl GovernanceEvent {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProposalCreated { .. } => "ProposalCreated",
            Self::VoteCast { .. } => "VoteCast",
            Self::ProposalExecuted { .. } => "ProposalExecuted",
            Self::FundsReceived { .. } => "FundsReceived",
        }
    }
}
