//! # Reentrancy Guard
//!
//! One writer lock shared by every mutating operation. A call from another
//! thread waits for the holder to finish; a nested call on the holding
//! thread is refused. Entering returns a token that releases the lock when
//! dropped, so it is released on every exit path, including early returns
//! and unwinding.

use crate::errors::GovernanceError;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::Cell;

/// Serialises guarded operations and rejects nested entry.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    /// Reentrant so the holding thread reaches the flag instead of deadlocking.
    writer: ReentrantMutex<Cell<bool>>,
}

/// Proof of holding the guard. Releases it on drop.
#[must_use = "the guard is released as soon as the token is dropped"]
pub struct GuardToken<'a> {
    held: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl std::fmt::Debug for GuardToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardToken").finish_non_exhaustive()
    }
}

impl ReentrancyGuard {
    /// Creates a released guard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ReentrantMutex::new(Cell::new(false)),
        }
    }

    /// Takes the guard, blocking while another thread holds it.
    ///
    /// # Errors
    ///
    /// [`GovernanceError::Reentrancy`] if the calling thread already holds it.
    pub fn enter(&self) -> Result<GuardToken<'_>, GovernanceError> {
        let held = self.writer.lock();
        if held.get() {
            return Err(GovernanceError::Reentrancy);
        }
        held.set(true);
        Ok(GuardToken { held })
    }

    /// True while some operation holds the guard.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.writer.try_lock().map_or(true, |held| held.get())
    }
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.held.set(false);
    }
}
