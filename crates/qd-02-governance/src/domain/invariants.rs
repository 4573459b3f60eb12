//! # Domain Invariants
//!
//! Accounting rules that must hold between operations:
//!
//! - Tally integrity: each proposal's three counters sum to the number of
//!   distinct addresses holding a recorded choice on it, and each counter
//!   equals the number of holders of that choice
//! - Id continuity: proposal ids are `1..=proposal_count` in order

use super::state::GovernanceState;
use super::value_objects::{Tally, VoteChoice};
use crate::errors::GovernanceError;
use shared_types::U256;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Tallies of proposal `id` recomputed from the voting ledger.
#[must_use]
pub fn recount(state: &GovernanceState, id: u64) -> Tally {
    let mut tally = Tally::default();
    for ((pid, _), choice) in &state.votes {
        if *pid != id {
            continue;
        }
        if let Some(counter) = tally.counter_mut(*choice) {
            *counter = counter.saturating_add(U256::one());
        }
    }
    tally
}

/// Stored tallies of proposal `id` match a recount.
///
/// # Errors
///
/// [`GovernanceError::InvariantViolation`] describing the mismatch.
pub fn check_tally_invariant(state: &GovernanceState, id: u64) -> Result<(), GovernanceError> {
    let proposal = state
        .proposal(id)
        .ok_or(GovernanceError::ProposalNotFound(id))?;
    let expected = recount(state, id);
    if proposal.tally == expected {
        Ok(())
    } else {
        Err(GovernanceError::InvariantViolation(format!(
            "proposal {id}: stored tally {:?} != recount {expected:?}",
            proposal.tally
        )))
    }
}

/// Proposal at index `i` has id `i + 1`.
#[must_use]
pub fn check_id_continuity(state: &GovernanceState) -> bool {
    state
        .proposals
        .iter()
        .enumerate()
        .all(|(index, p)| p.id == index as u64 + 1)
}

/// Runs every check over the whole state.
///
/// # Errors
///
/// The first violation found.
pub fn check_all_invariants(state: &GovernanceState) -> Result<(), GovernanceError> {
    if !check_id_continuity(state) {
        return Err(GovernanceError::InvariantViolation(
            "proposal ids are not contiguous".into(),
        ));
    }
    if state.votes.values().any(|choice| *choice == VoteChoice::None) {
        return Err(GovernanceError::InvariantViolation(
            "ledger stores a None choice".into(),
        ));
    }
    for id in 1..=state.proposal_count() {
        check_tally_invariant(state, id)?;
    }
    Ok(())
}
