//! # State Store
//!
//! Single-writer home of [`GovernanceState`]. Writes happen inside a
//! [`Transaction`]: the state lock is taken for each step and released
//! between steps, so external code called mid-operation can still read.
//! A transaction that is dropped without `commit` rolls back.

use crate::domain::journal::Journal;
use crate::domain::state::GovernanceState;
use crate::events::GovernanceEvent;
use parking_lot::Mutex;
use tracing::debug;

/// Owns the governance state.
#[derive(Debug, Default)]
pub struct StateStore {
    state: Mutex<GovernanceState>,
}

impl StateStore {
    /// Store holding `state`.
    #[must_use]
    pub fn new(state: GovernanceState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Runs `f` against a consistent view of the state.
    pub fn read<R>(&self, f: impl FnOnce(&GovernanceState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> GovernanceState {
        self.state.lock().clone()
    }

    /// Opens a transaction.
    pub fn begin(&self) -> Transaction<'_> {
        Transaction {
            store: self,
            journal: Journal::new(),
            events: Vec::new(),
            finished: false,
        }
    }
}

/// State accessor handed to [`Transaction::write`] closures.
pub struct Staged<'s> {
    /// Locked state.
    pub state: &'s mut GovernanceState,
    /// Every write must go through here.
    pub journal: &'s mut Journal,
}

/// Buffered writes and events of one operation.
#[must_use = "dropping a transaction rolls it back"]
pub struct Transaction<'a> {
    store: &'a StateStore,
    journal: Journal,
    events: Vec<GovernanceEvent>,
    finished: bool,
}

impl Transaction<'_> {
    /// Runs `f` with the state locked. Writes must go through `staged.journal`.
    pub fn write<R>(&mut self, f: impl FnOnce(Staged<'_>) -> R) -> R {
        let mut state = self.store.state.lock();
        f(Staged {
            state: &mut state,
            journal: &mut self.journal,
        })
    }

    /// Buffers an event until commit.
    pub fn emit(&mut self, event: GovernanceEvent) {
        self.events.push(event);
    }

    /// Makes the writes permanent and hands back the buffered events.
    pub fn commit(mut self) -> Vec<GovernanceEvent> {
        self.finished = true;
        self.journal.clear();
        std::mem::take(&mut self.events)
    }

    /// Undoes every write and discards the buffered events.
    pub fn rollback(mut self) {
        self.undo();
    }

    fn undo(&mut self) {
        self.finished = true;
        if self.journal.is_empty() {
            return;
        }
        debug!(writes = self.journal.len(), "rolling back");
        let mut state = self.store.state.lock();
        self.journal.revert(&mut state);
        self.events.clear();
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.undo();
        }
    }
}
