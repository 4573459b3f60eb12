//! # Governance Service
//!
//! Proposal store, voting ledger and execution gate behind one reentrancy
//! guard and one state store. The guard admits one writer at a time: calls
//! from other threads queue, nested calls on the writer's thread fail.
//!
//! ## Write Path
//!
//! 1. Resolve the effective caller (trusted relay suffix or direct sender)
//! 2. Enter the reentrancy guard (waits for any other writer)
//! 3. Validate inputs and state
//! 4. Apply effects inside a transaction
//! 5. Execution only: transfer value with the state lock released
//! 6. Commit and publish events, or roll back everything

use crate::adapters::{InMemoryEventLog, InMemoryLedger};
use crate::domain::entities::{ExecutionReceipt, Proposal, ProposalStatus};
use crate::domain::identity::IdentityResolver;
use crate::domain::state::GovernanceState;
use crate::domain::value_objects::{Tally, VoteChoice};
use crate::errors::GovernanceError;
use crate::events::GovernanceEvent;
use crate::guard::ReentrancyGuard;
use crate::ports::inbound::GovernanceApi;
use crate::ports::outbound::{EventSink, ValueTransfer};
use crate::store::StateStore;

use parking_lot::Mutex;
use shared_types::{Address, CallContext, Clock, ManualClock, U256};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Eight days: strictly longer than the usual seven-day voting window.
pub const DEFAULT_SAFETY_PERIOD_SECS: u64 = 8 * 24 * 60 * 60;

/// Address the governance component answers at unless configured otherwise.
pub const DEFAULT_GOVERNANCE_ADDRESS: Address = Address([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x0D, 0xA0,
]);

/// Governance service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceConfig {
    /// Delay after the voting deadline before execution is allowed.
    pub safety_period_secs: u64,
    /// The one relay whose calldata suffix is trusted.
    pub trusted_forwarder: Option<Address>,
    /// Address this component is reachable at.
    pub governance_address: Address,
    /// Upper bound on `deadline - now` at creation.
    pub max_voting_period_secs: Option<u64>,
    /// Upper bound on the number of proposals ever created.
    pub max_proposals: Option<u64>,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            safety_period_secs: DEFAULT_SAFETY_PERIOD_SECS,
            trusted_forwarder: None,
            governance_address: DEFAULT_GOVERNANCE_ADDRESS,
            max_voting_period_secs: None,
            max_proposals: None,
        }
    }
}

/// Statistics for the governance service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GovernanceStats {
    /// Operations that committed.
    pub committed: u64,
    /// Operations rejected or rolled back.
    pub rejected: u64,
    /// Of which: nested entries refused by the guard.
    pub reentrancy_rejected: u64,
    /// Of which: executions undone after a failed transfer.
    pub transfers_rolled_back: u64,
}

/// The governance core.
pub struct GovernanceService {
    config: GovernanceConfig,
    identity: IdentityResolver,
    store: StateStore,
    guard: ReentrancyGuard,
    clock: Arc<dyn Clock>,
    transfer: Arc<dyn ValueTransfer>,
    events: Arc<dyn EventSink>,
    stats: Mutex<GovernanceStats>,
}

impl GovernanceService {
    /// Creates a service with an empty treasury.
    pub fn new(
        config: GovernanceConfig,
        clock: Arc<dyn Clock>,
        transfer: Arc<dyn ValueTransfer>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            identity: IdentityResolver::new(config.trusted_forwarder),
            config,
            store: StateStore::default(),
            guard: ReentrancyGuard::new(),
            clock,
            transfer,
            events,
            stats: Mutex::new(GovernanceStats::default()),
        }
    }

    /// Seeds the treasury. Meant for start-up, before any call is served.
    #[must_use]
    pub fn with_treasury(mut self, amount: U256) -> Self {
        self.store = StateStore::new(GovernanceState::with_treasury(amount));
        self
    }

    /// Service configuration.
    #[must_use]
    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Resolver used for every incoming call.
    #[must_use]
    pub fn identity(&self) -> &IdentityResolver {
        &self.identity
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> GovernanceStats {
        *self.stats.lock()
    }

    /// Copy of the whole state, for inspection.
    #[must_use]
    pub fn snapshot(&self) -> GovernanceState {
        self.store.snapshot()
    }

    fn publish(&self, events: Vec<GovernanceEvent>) {
        for event in events {
            self.events.publish(event);
        }
    }

    fn record<T>(
        &self,
        operation: &'static str,
        result: Result<T, GovernanceError>,
    ) -> Result<T, GovernanceError> {
        let mut stats = self.stats.lock();
        match &result {
            Ok(_) => stats.committed += 1,
            Err(err) => {
                stats.rejected += 1;
                match err {
                    GovernanceError::Reentrancy => stats.reentrancy_rejected += 1,
                    GovernanceError::TransferFailed { .. } => stats.transfers_rolled_back += 1,
                    _ => {}
                }
                debug!(operation, error = %err, category = ?err.category(), "operation rejected");
            }
        }
        result
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    fn create_inner(
        &self,
        caller: Address,
        value: U256,
        recipient: Address,
        amount: U256,
        deadline: u64,
    ) -> Result<u64, GovernanceError> {
        let _token = self.guard.enter()?;
        ensure_no_value(value)?;

        if recipient.is_zero() {
            return Err(GovernanceError::ZeroRecipient);
        }
        if amount.is_zero() {
            return Err(GovernanceError::ZeroAmount);
        }
        let now = self.clock.now();
        if deadline <= now {
            return Err(GovernanceError::DeadlineNotInFuture { deadline, now });
        }
        if let Some(max) = self.config.max_voting_period_secs {
            let requested = deadline - now;
            if requested > max {
                return Err(GovernanceError::VotingPeriodTooLong { requested, max });
            }
        }

        let max_proposals = self.config.max_proposals;
        let mut tx = self.store.begin();
        let id = tx.write(|s| -> Result<u64, GovernanceError> {
            if let Some(max) = max_proposals {
                if s.state.proposal_count() >= max {
                    return Err(GovernanceError::ProposalLimitReached { max });
                }
            }
            let id = s.state.next_proposal_id();
            s.journal.append_proposal(
                s.state,
                Proposal {
                    id,
                    creator: caller,
                    recipient,
                    amount,
                    deadline,
                    created_at: now,
                    tally: Tally::default(),
                    executed: false,
                },
            );
            Ok(id)
        })?;

        tx.emit(GovernanceEvent::ProposalCreated {
            id,
            creator: caller,
            recipient,
            amount,
            deadline,
        });
        self.publish(tx.commit());
        info!(id, %caller, %recipient, %amount, deadline, "proposal created");
        Ok(id)
    }

    fn vote_inner(
        &self,
        caller: Address,
        value: U256,
        proposal_id: u64,
        choice: VoteChoice,
    ) -> Result<Tally, GovernanceError> {
        let _token = self.guard.enter()?;
        ensure_no_value(value)?;
        if !choice.is_cast() {
            return Err(GovernanceError::InvalidChoice);
        }
        let now = self.clock.now();

        let mut tx = self.store.begin();
        let (previous, tally) = tx.write(|s| -> Result<(VoteChoice, Tally), GovernanceError> {
            let proposal = s
                .state
                .proposal(proposal_id)
                .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
            if !proposal.is_voting_open(now) {
                return Err(GovernanceError::VotingClosed {
                    id: proposal_id,
                    deadline: proposal.deadline,
                    now,
                });
            }

            let previous = s.journal.set_vote(s.state, (proposal_id, caller), choice);
            let tally = s
                .journal
                .update_proposal(s.state, proposal_id, |p| apply_vote(&mut p.tally, previous, choice))??;
            Ok((previous, tally))
        })?;

        tx.emit(GovernanceEvent::VoteCast {
            id: proposal_id,
            voter: caller,
            choice,
            for_votes: tally.for_votes,
            against_votes: tally.against_votes,
            abstain_votes: tally.abstain_votes,
        });
        self.publish(tx.commit());
        info!(id = proposal_id, voter = %caller, %previous, %choice, "vote recorded");
        Ok(tally)
    }

    fn execute_inner(
        &self,
        caller: Address,
        value: U256,
        proposal_id: u64,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let _token = self.guard.enter()?;
        ensure_no_value(value)?;
        let now = self.clock.now();
        let safety_period = self.config.safety_period_secs;

        let mut tx = self.store.begin();

        // Checks, then effects, under one lock.
        let (recipient, amount) = tx.write(|s| -> Result<(Address, U256), GovernanceError> {
            let proposal = s
                .state
                .proposal(proposal_id)
                .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
            if proposal.executed {
                return Err(GovernanceError::AlreadyExecuted(proposal_id));
            }
            let executable_after = proposal.executable_after(safety_period);
            if now <= executable_after {
                return Err(GovernanceError::SafetyPeriodActive {
                    id: proposal_id,
                    executable_after,
                    now,
                });
            }
            if !proposal.tally.is_approved() {
                return Err(GovernanceError::NotApproved {
                    id: proposal_id,
                    for_votes: proposal.tally.for_votes,
                    against_votes: proposal.tally.against_votes,
                });
            }
            let available = s.state.treasury();
            if available < proposal.amount {
                return Err(GovernanceError::InsufficientTreasury {
                    required: proposal.amount,
                    available,
                });
            }
            let (recipient, amount) = (proposal.recipient, proposal.amount);

            s.journal
                .update_proposal(s.state, proposal_id, |p| p.executed = true)?;
            s.journal.set_treasury(s.state, available - amount);
            Ok((recipient, amount))
        })?;

        // Interaction. The state lock is free; the guard is held.
        if let Err(err) = self.transfer.transfer(recipient, amount) {
            warn!(id = proposal_id, %recipient, %amount, error = %err, "transfer failed, rolling back execution");
            tx.rollback();
            return Err(GovernanceError::TransferFailed {
                recipient,
                reason: err.to_string(),
            });
        }

        tx.emit(GovernanceEvent::ProposalExecuted {
            id: proposal_id,
            success: true,
            amount,
            recipient,
        });
        self.publish(tx.commit());
        info!(id = proposal_id, executor = %caller, %recipient, %amount, "proposal executed");
        Ok(ExecutionReceipt {
            proposal_id,
            recipient,
            amount,
        })
    }

    fn fund_inner(&self, caller: Address, value: U256) -> Result<U256, GovernanceError> {
        let _token = self.guard.enter()?;
        if value.is_zero() {
            return Err(GovernanceError::ZeroAmount);
        }

        let mut tx = self.store.begin();
        let balance = tx.write(|s| -> Result<U256, GovernanceError> {
            let balance = s
                .state
                .treasury()
                .checked_add(value)
                .ok_or(GovernanceError::TreasuryOverflow)?;
            s.journal.set_treasury(s.state, balance);
            Ok(balance)
        })?;

        tx.emit(GovernanceEvent::FundsReceived {
            from: caller,
            amount: value,
        });
        self.publish(tx.commit());
        info!(from = %caller, %value, %balance, "treasury funded");
        Ok(balance)
    }
}

/// Moves one vote from `previous` to `choice`.
fn apply_vote(
    tally: &mut Tally,
    previous: VoteChoice,
    choice: VoteChoice,
) -> Result<Tally, GovernanceError> {
    if let Some(counter) = tally.counter_mut(previous) {
        *counter = counter.checked_sub(U256::one()).ok_or_else(|| {
            GovernanceError::InvariantViolation(format!("{previous} tally already zero"))
        })?;
    }
    let counter = tally
        .counter_mut(choice)
        .ok_or(GovernanceError::InvalidChoice)?;
    *counter = counter
        .checked_add(U256::one())
        .ok_or_else(|| GovernanceError::InvariantViolation(format!("{choice} tally overflow")))?;
    Ok(*tally)
}

fn ensure_no_value(value: U256) -> Result<(), GovernanceError> {
    if value.is_zero() {
        Ok(())
    } else {
        Err(GovernanceError::NonPayable(value))
    }
}

// =============================================================================
// GovernanceApi Implementation
// =============================================================================

impl GovernanceApi for GovernanceService {
    #[instrument(skip(self, ctx), fields(sender = %ctx.sender))]
    fn create_proposal(
        &self,
        ctx: &CallContext,
        recipient: Address,
        amount: U256,
        deadline: u64,
    ) -> Result<u64, GovernanceError> {
        let caller = self.identity.effective_caller(ctx);
        let result = self.create_inner(caller, ctx.value, recipient, amount, deadline);
        self.record("create_proposal", result)
    }

    #[instrument(skip(self, ctx), fields(sender = %ctx.sender))]
    fn vote(
        &self,
        ctx: &CallContext,
        proposal_id: u64,
        choice: VoteChoice,
    ) -> Result<Tally, GovernanceError> {
        let caller = self.identity.effective_caller(ctx);
        let result = self.vote_inner(caller, ctx.value, proposal_id, choice);
        self.record("vote", result)
    }

    #[instrument(skip(self, ctx), fields(sender = %ctx.sender))]
    fn execute_proposal(
        &self,
        ctx: &CallContext,
        proposal_id: u64,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let caller = self.identity.effective_caller(ctx);
        let result = self.execute_inner(caller, ctx.value, proposal_id);
        self.record("execute_proposal", result)
    }

    #[instrument(skip(self, ctx), fields(sender = %ctx.sender, value = %ctx.value))]
    fn fund(&self, ctx: &CallContext) -> Result<U256, GovernanceError> {
        let caller = self.identity.effective_caller(ctx);
        let result = self.fund_inner(caller, ctx.value);
        self.record("fund", result)
    }

    fn get_proposal(&self, proposal_id: u64) -> Option<Proposal> {
        self.store.read(|state| state.proposal(proposal_id).cloned())
    }

    fn get_vote(&self, proposal_id: u64, voter: &Address) -> VoteChoice {
        self.store.read(|state| state.vote_of(proposal_id, voter))
    }

    fn treasury_balance(&self) -> U256 {
        self.store.read(GovernanceState::treasury)
    }

    fn proposal_count(&self) -> u64 {
        self.store.read(GovernanceState::proposal_count)
    }

    fn proposal_status(&self, proposal_id: u64) -> Option<ProposalStatus> {
        let now = self.clock.now();
        let safety_period = self.config.safety_period_secs;
        self.store.read(|state| {
            state
                .proposal(proposal_id)
                .map(|p| p.status(now, safety_period))
        })
    }
}

// =============================================================================
// TEST SUPPORT
// =============================================================================

/// Start time of services built by [`create_test_service`].
pub const TEST_START_TIME: u64 = 1_700_000_000;

/// A service wired to in-memory adapters, with handles to all of them.
pub struct TestService {
    /// The service.
    pub service: Arc<GovernanceService>,
    /// Clock the service reads.
    pub clock: Arc<ManualClock>,
    /// Ledger payouts land in.
    pub ledger: Arc<InMemoryLedger>,
    /// Committed events.
    pub events: Arc<InMemoryEventLog>,
}

/// Create a service with in-memory adapters (for testing).
#[must_use]
pub fn create_test_service(config: GovernanceConfig) -> TestService {
    let clock = Arc::new(ManualClock::new(TEST_START_TIME));
    let ledger = Arc::new(InMemoryLedger::new());
    let events = Arc::new(InMemoryEventLog::new());
    let service = Arc::new(GovernanceService::new(
        config,
        clock.clone(),
        ledger.clone(),
        events.clone(),
    ));
    TestService {
        service,
        clock,
        ledger,
        events,
    }
}

// =============================================================================
// TESTS
// =============================================================================
