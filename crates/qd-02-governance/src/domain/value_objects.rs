//! # Value Objects
//!
//! Small immutable types shared by the governance domain.

use serde::{Deserialize, Serialize};
use shared_types::U256;
use std::fmt;

// =============================================================================
// VOTE CHOICE
// =============================================================================

/// A voter's recorded position on a proposal.
///
/// `None` means "has not voted" and is never accepted as input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VoteChoice {
    /// No vote recorded.
    #[default]
    None = 0,
    /// In favour.
    For = 1,
    /// Opposed.
    Against = 2,
    /// Counted, but neither for nor against.
    Abstain = 3,
}

impl VoteChoice {
    /// True for every choice except `None`.
    #[must_use]
    pub const fn is_cast(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl TryFrom<u8> for VoteChoice {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::For),
            2 => Ok(Self::Against),
            3 => Ok(Self::Abstain),
            other => Err(other),
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::For => "for",
            Self::Against => "against",
            Self::Abstain => "abstain",
        };
        f.write_str(name)
    }
}

// =============================================================================
// TALLY
// =============================================================================

/// Vote counts of one proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Votes for.
    pub for_votes: U256,
    /// Votes against.
    pub against_votes: U256,
    /// Abstentions.
    pub abstain_votes: U256,
}

impl Tally {
    /// Sum of all three counters.
    #[must_use]
    pub fn total(&self) -> U256 {
        self.for_votes
            .saturating_add(self.against_votes)
            .saturating_add(self.abstain_votes)
    }

    /// Strict majority of for over against. Ties fail.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.for_votes > self.against_votes
    }

    /// The counter a cast choice contributes to.
    pub(crate) fn counter_mut(&mut self, choice: VoteChoice) -> Option<&mut U256> {
        match choice {
            VoteChoice::None => None,
            VoteChoice::For => Some(&mut self.for_votes),
            VoteChoice::Against => Some(&mut self.against_votes),
            VoteChoice::Abstain => Some(&mut self.abstain_votes),
        }
    }

    /// Counter value for `choice` (zero for `None`).
    #[must_use]
    pub fn count(&self, choice: VoteChoice) -> U256 {
        match choice {
            VoteChoice::None => U256::zero(),
            VoteChoice::For => self.for_votes,
            VoteChoice::Against => self.against_votes,
            VoteChoice::Abstain => self.abstain_votes,
        }
    }
}

// =============================================================================
// GAS COUNTER
// =============================================================================

/// Tracks gas consumption against a call's allowance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GasCounter {
    /// Gas limit for this call.
    limit: u64,
    /// Gas consumed so far.
    used: u64,
}

impl GasCounter {
    /// Creates a new gas counter with the given limit.
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Returns the gas limit.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns gas used so far.
    #[must_use]
    pub const fn used(&self) -> u64 {
        self.used
    }

    /// Returns remaining gas.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }

    /// Consumes gas. Returns false (and consumes nothing) if insufficient.
    pub fn consume(&mut self, amount: u64) -> bool {
        if self.used.saturating_add(amount) > self.limit {
            false
        } else {
            self.used = self.used.saturating_add(amount);
            true
        }
    }
}
