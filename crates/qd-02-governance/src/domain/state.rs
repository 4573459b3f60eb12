//! # Governance State
//!
//! The proposal table, the voting ledger and the treasury balance. Writes go
//! through [`super::journal::Journal`] so they can be undone.

use super::entities::{Proposal, VoteKey};
use super::value_objects::VoteChoice;
use shared_types::{Address, U256};
use std::collections::HashMap;

/// All mutable governance data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GovernanceState {
    /// Proposal `id` lives at index `id - 1`.
    pub(crate) proposals: Vec<Proposal>,
    /// Only non-`None` choices are stored.
    pub(crate) votes: HashMap<VoteKey, VoteChoice>,
    pub(crate) treasury: U256,
}

impl GovernanceState {
    /// Empty state holding `treasury`.
    #[must_use]
    pub fn with_treasury(treasury: U256) -> Self {
        Self {
            treasury,
            ..Self::default()
        }
    }

    /// Number of proposals ever created.
    #[must_use]
    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Proposal by id.
    #[must_use]
    pub fn proposal(&self, id: u64) -> Option<&Proposal> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.proposals.get(index)
    }

    pub(crate) fn proposal_mut(&mut self, id: u64) -> Option<&mut Proposal> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.proposals.get_mut(index)
    }

    /// Recorded choice of `voter` on proposal `id`.
    #[must_use]
    pub fn vote_of(&self, id: u64, voter: &Address) -> VoteChoice {
        self.votes.get(&(id, *voter)).copied().unwrap_or_default()
    }

    /// Distinct addresses with a recorded choice on proposal `id`.
    #[must_use]
    pub fn voter_count(&self, id: u64) -> usize {
        self.votes
            .iter()
            .filter(|((pid, _), choice)| *pid == id && choice.is_cast())
            .count()
    }

    /// Current treasury balance.
    #[must_use]
    pub fn treasury(&self) -> U256 {
        self.treasury
    }

    /// Id the next created proposal receives.
    #[must_use]
    pub fn next_proposal_id(&self) -> u64 {
        self.proposal_count() + 1
    }
}
