//! # Commands
//!
//! JSON wire format of the node. One command per line in, one reply per line
//! out. Addresses, byte strings and amounts are 0x-prefixed hex.
//!
//! ```text
//! {"cmd":"fund","from":"0x..01","amount":"0x64"}
//! {"cmd":"vote","from":"0x..0a","proposal_id":1,"choice":"For"}
//! {"cmd":"relay","relayer":"0x..ff","request":{...},"signature":"0x<65 bytes>"}
//! ```

use qd_01_metatx_relay::ForwardRequest;
use qd_02_governance::VoteChoice;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes, U256};

/// A request to the runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    // --- writes ---
    /// Deposit into the treasury.
    Fund { from: Address, amount: U256 },
    /// Create a proposal.
    CreateProposal {
        from: Address,
        recipient: Address,
        amount: U256,
        deadline: u64,
    },
    /// Cast or change a vote.
    Vote {
        from: Address,
        proposal_id: u64,
        choice: VoteChoice,
    },
    /// Execute an approved proposal.
    ExecuteProposal { from: Address, proposal_id: u64 },
    /// Submit a signed forward request. `value` defaults to `request.value`.
    Relay {
        relayer: Address,
        request: ForwardRequest,
        signature: Bytes,
        #[serde(default)]
        value: Option<U256>,
    },

    // --- reads ---
    /// Proposal by id.
    GetProposal { proposal_id: u64 },
    /// A voter's recorded choice.
    GetVote { proposal_id: u64, voter: Address },
    /// Treasury balance.
    TreasuryBalance,
    /// Number of proposals.
    ProposalCount,
    /// Lifecycle position of a proposal.
    ProposalStatus { proposal_id: u64 },
    /// A signer's current relay nonce.
    GetNonce { signer: Address },
    /// Whether a signed request would currently verify.
    VerifyRelay {
        request: ForwardRequest,
        signature: Bytes,
    },
    /// Relay signing domain, chain id and component addresses.
    NodeInfo,
}

impl Command {
    /// Command name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fund { .. } => "fund",
            Self::CreateProposal { .. } => "create_proposal",
            Self::Vote { .. } => "vote",
            Self::ExecuteProposal { .. } => "execute_proposal",
            Self::Relay { .. } => "relay",
            Self::GetProposal { .. } => "get_proposal",
            Self::GetVote { .. } => "get_vote",
            Self::TreasuryBalance => "treasury_balance",
            Self::ProposalCount => "proposal_count",
            Self::ProposalStatus { .. } => "proposal_status",
            Self::GetNonce { .. } => "get_nonce",
            Self::VerifyRelay { .. } => "verify_relay",
            Self::NodeInfo => "node_info",
        }
    }

    /// True for commands that may change state.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(
            self,
            Self::Fund { .. }
                | Self::CreateProposal { .. }
                | Self::Vote { .. }
                | Self::ExecuteProposal { .. }
                | Self::Relay { .. }
        )
    }
}

/// The runtime's answer to one command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    /// The command succeeded.
    Ok {
        /// Correlation id of the command.
        id: String,
        /// Command-specific result.
        result: serde_json::Value,
    },
    /// The command failed and changed nothing.
    Error {
        /// Correlation id of the command.
        id: String,
        /// Error class (`validation`, `state`, `authorization`, ...).
        kind: String,
        /// Human-readable reason.
        message: String,
    },
}

impl Reply {
    /// True for [`Reply::Ok`].
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Result payload of a successful reply.
    #[must_use]
    pub fn result(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Ok { result, .. } => Some(result),
            Self::Error { .. } => None,
        }
    }

    /// Error kind of a failed reply.
    #[must_use]
    pub fn error_kind(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::Error { kind, .. } => Some(kind),
        }
    }
}
