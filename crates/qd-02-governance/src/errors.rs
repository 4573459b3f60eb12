//! # Error Types
//!
//! Every governance operation either commits all of its effects or fails with
//! one of these and leaves state untouched.

use shared_types::{Address, CallError, U256};
use thiserror::Error;

// =============================================================================
// GOVERNANCE ERRORS
// =============================================================================

/// Coarse classification of a [`GovernanceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input.
    Validation,
    /// Valid input, wrong moment or wrong proposal state.
    State,
    /// The outbound value transfer failed.
    Transfer,
    /// A guarded operation was re-entered from within another.
    Reentrancy,
}

impl ErrorCategory {
    /// Lower-case name for logs and wire formats.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::State => "state",
            Self::Transfer => "transfer",
            Self::Reentrancy => "reentrancy",
        }
    }
}

/// Errors returned by governance operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GovernanceError {
    // --- validation ---
    /// Proposal recipient is the zero address.
    #[error("recipient is the zero address")]
    ZeroRecipient,

    /// Proposal amount or deposit is zero.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Voting deadline is not strictly in the future.
    #[error("deadline {deadline} is not after now ({now})")]
    DeadlineNotInFuture {
        /// Requested deadline.
        deadline: u64,
        /// Current time.
        now: u64,
    },

    /// Voting period exceeds the configured maximum.
    #[error("voting period {requested}s exceeds maximum {max}s")]
    VotingPeriodTooLong {
        /// Requested period in seconds.
        requested: u64,
        /// Configured maximum in seconds.
        max: u64,
    },

    /// `None` is not a castable choice.
    #[error("invalid vote choice")]
    InvalidChoice,

    /// Value was attached to an operation that does not accept it.
    #[error("operation is not payable (value {0})")]
    NonPayable(U256),

    // --- state ---
    /// No proposal has this id.
    #[error("proposal {0} not found")]
    ProposalNotFound(u64),

    /// Voting on this proposal has ended.
    #[error("voting on proposal {id} closed at {deadline} (now {now})")]
    VotingClosed {
        /// Proposal id.
        id: u64,
        /// Its voting deadline.
        deadline: u64,
        /// Current time.
        now: u64,
    },

    /// Proposal has already been executed.
    #[error("proposal {0} already executed")]
    AlreadyExecuted(u64),

    /// The safety period after the deadline has not fully elapsed.
    #[error("proposal {id} executable after {executable_after} (now {now})")]
    SafetyPeriodActive {
        /// Proposal id.
        id: u64,
        /// Last second of the safety period.
        executable_after: u64,
        /// Current time.
        now: u64,
    },

    /// Votes for do not strictly exceed votes against.
    #[error("proposal {id} not approved ({for_votes} for, {against_votes} against)")]
    NotApproved {
        /// Proposal id.
        id: u64,
        /// Votes for.
        for_votes: U256,
        /// Votes against.
        against_votes: U256,
    },

    /// Treasury cannot cover the proposal amount.
    #[error("insufficient treasury: required {required}, available {available}")]
    InsufficientTreasury {
        /// Proposal amount.
        required: U256,
        /// Current treasury balance.
        available: U256,
    },

    /// The configured proposal cap has been reached.
    #[error("proposal limit reached ({max})")]
    ProposalLimitReached {
        /// Configured cap.
        max: u64,
    },

    /// Treasury balance would overflow.
    #[error("treasury overflow")]
    TreasuryOverflow,

    /// Internal accounting does not add up.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    // --- transfer ---
    /// The recipient rejected the value transfer.
    #[error("transfer to {recipient} failed: {reason}")]
    TransferFailed {
        /// Intended recipient.
        recipient: Address,
        /// Why the recipient refused.
        reason: String,
    },

    // --- reentrancy ---
    /// A guarded operation was re-entered from the thread already running one.
    #[error("reentrant call")]
    Reentrancy,
}

impl GovernanceError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ZeroRecipient
            | Self::ZeroAmount
            | Self::DeadlineNotInFuture { .. }
            | Self::VotingPeriodTooLong { .. }
            | Self::InvalidChoice
            | Self::NonPayable(_) => ErrorCategory::Validation,
            Self::ProposalNotFound(_)
            | Self::VotingClosed { .. }
            | Self::AlreadyExecuted(_)
            | Self::SafetyPeriodActive { .. }
            | Self::NotApproved { .. }
            | Self::InsufficientTreasury { .. }
            | Self::ProposalLimitReached { .. }
            | Self::TreasuryOverflow
            | Self::InvariantViolation(_) => ErrorCategory::State,
            Self::TransferFailed { .. } => ErrorCategory::Transfer,
            Self::Reentrancy => ErrorCategory::Reentrancy,
        }
    }
}

impl From<GovernanceError> for CallError {
    fn from(err: GovernanceError) -> Self {
        CallError::Reverted(err.to_string())
    }
}
