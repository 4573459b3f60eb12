//! # Undo Journal
//!
//! Every write to [`GovernanceState`] records how to undo it. Reverting
//! replays the entries newest first, so a failed operation leaves state
//! exactly as it found it.

use super::entities::{Proposal, VoteKey};
use super::state::GovernanceState;
use super::value_objects::VoteChoice;
use crate::errors::GovernanceError;
use shared_types::U256;

/// How to restore one field.
#[derive(Clone, Debug, PartialEq, Eq)]
enum UndoEntry {
    ProposalAppended,
    ProposalReplaced(Proposal),
    VoteReplaced {
        key: VoteKey,
        previous: Option<VoteChoice>,
    },
    TreasuryReplaced(U256),
}

/// Write log of one operation.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    entries: Vec<UndoEntry>,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a proposal. Its id must be `state.next_proposal_id()`.
    pub fn append_proposal(&mut self, state: &mut GovernanceState, proposal: Proposal) {
        debug_assert_eq!(proposal.id, state.next_proposal_id());
        state.proposals.push(proposal);
        self.entries.push(UndoEntry::ProposalAppended);
    }

    /// Mutates proposal `id` in place.
    ///
    /// # Errors
    ///
    /// [`GovernanceError::ProposalNotFound`] if no such proposal exists.
    pub fn update_proposal<R>(
        &mut self,
        state: &mut GovernanceState,
        id: u64,
        f: impl FnOnce(&mut Proposal) -> R,
    ) -> Result<R, GovernanceError> {
        let proposal = state
            .proposal_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        self.entries.push(UndoEntry::ProposalReplaced(proposal.clone()));
        Ok(f(proposal))
    }

    /// Records `choice` for `key` and returns the previous choice.
    pub fn set_vote(
        &mut self,
        state: &mut GovernanceState,
        key: VoteKey,
        choice: VoteChoice,
    ) -> VoteChoice {
        let previous = if choice.is_cast() {
            state.votes.insert(key, choice)
        } else {
            state.votes.remove(&key)
        };
        self.entries.push(UndoEntry::VoteReplaced { key, previous });
        previous.unwrap_or_default()
    }

    /// Overwrites the treasury balance.
    pub fn set_treasury(&mut self, state: &mut GovernanceState, value: U256) {
        self.entries.push(UndoEntry::TreasuryReplaced(state.treasury));
        state.treasury = value;
    }

    /// Undoes every recorded write, newest first, and empties the journal.
    pub fn revert(&mut self, state: &mut GovernanceState) {
        while let Some(entry) = self.entries.pop() {
            match entry {
                UndoEntry::ProposalAppended => {
                    state.proposals.pop();
                }
                UndoEntry::ProposalReplaced(previous) => {
                    if let Some(slot) = state.proposal_mut(previous.id) {
                        *slot = previous;
                    }
                }
                UndoEntry::VoteReplaced { key, previous } => match previous {
                    Some(choice) => {
                        state.votes.insert(key, choice);
                    }
                    None => {
                        state.votes.remove(&key);
                    }
                },
                UndoEntry::TreasuryReplaced(previous) => state.treasury = previous,
            }
        }
    }

    /// Forgets all entries, making the writes permanent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
