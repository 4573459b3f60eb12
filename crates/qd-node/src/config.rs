//! # Node Configuration
//!
//! Defaults suitable for a local node, overridden from `QD_*` environment
//! variables.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `QD_CHAIN_ID` | `chain.chain_id` |
//! | `QD_SAFETY_PERIOD_SECS` | `governance.safety_period_secs` |
//! | `QD_MAX_VOTING_PERIOD_SECS` | `governance.max_voting_period_secs` |
//! | `QD_MAX_PROPOSALS` | `governance.max_proposals` |
//! | `QD_INITIAL_TREASURY` | `governance.initial_treasury` |
//! | `QD_COMMAND_QUEUE` | `runtime.command_queue` |

use qd_01_metatx_relay::ForwarderDomain;
use qd_02_governance::{GovernanceConfig, DEFAULT_GOVERNANCE_ADDRESS, DEFAULT_SAFETY_PERIOD_SECS};
use shared_types::{Address, U256};
use std::str::FromStr;
use thiserror::Error;

/// Address the relay answers at unless configured otherwise.
pub const DEFAULT_FORWARDER_ADDRESS: Address = Address([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x0F, 0xD0,
]);

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    /// Chain identity and component addresses.
    pub chain: ChainConfig,
    /// Governance parameters.
    pub governance: GovernanceSection,
    /// Actor loop parameters.
    pub runtime: RuntimeConfig,
}

/// Chain identity and component addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Chain id bound into every relay signature.
    pub chain_id: u64,
    /// Relay address (the EIP-712 verifying contract).
    pub forwarder_address: Address,
    /// Governance address (the relay target).
    pub governance_address: Address,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 1337,
            forwarder_address: DEFAULT_FORWARDER_ADDRESS,
            governance_address: DEFAULT_GOVERNANCE_ADDRESS,
        }
    }
}

/// Governance parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceSection {
    /// Delay after the voting deadline before execution.
    pub safety_period_secs: u64,
    /// Optional cap on a proposal's voting window.
    pub max_voting_period_secs: Option<u64>,
    /// Optional cap on the number of proposals.
    pub max_proposals: Option<u64>,
    /// Treasury balance at start-up.
    pub initial_treasury: U256,
}

impl Default for GovernanceSection {
    fn default() -> Self {
        Self {
            safety_period_secs: DEFAULT_SAFETY_PERIOD_SECS,
            max_voting_period_secs: None,
            max_proposals: None,
            initial_treasury: U256::zero(),
        }
    }
}

/// Actor loop parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Bounded command queue depth.
    pub command_queue: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { command_queue: 256 }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Chain id must be non-zero.
    #[error("chain id must be non-zero")]
    ZeroChainId,

    /// Safety period must be non-zero.
    #[error("safety period must be non-zero")]
    ZeroSafetyPeriod,

    /// Command queue must hold at least one command.
    #[error("command queue depth must be non-zero")]
    ZeroCommandQueue,

    /// Relay and governance must live at different addresses.
    #[error("forwarder and governance share address {0}")]
    AddressClash(Address),
}

impl NodeConfig {
    /// Defaults overridden from the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for an unparsable variable, or any
    /// [`NodeConfig::validate`] failure.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden from `lookup`.
    ///
    /// # Errors
    ///
    /// As [`NodeConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(chain_id) = parse_var(&lookup, "QD_CHAIN_ID")? {
            config.chain.chain_id = chain_id;
        }
        if let Some(secs) = parse_var(&lookup, "QD_SAFETY_PERIOD_SECS")? {
            config.governance.safety_period_secs = secs;
        }
        if let Some(secs) = parse_var(&lookup, "QD_MAX_VOTING_PERIOD_SECS")? {
            config.governance.max_voting_period_secs = Some(secs);
        }
        if let Some(max) = parse_var(&lookup, "QD_MAX_PROPOSALS")? {
            config.governance.max_proposals = Some(max);
        }
        if let Some(raw) = lookup("QD_INITIAL_TREASURY") {
            config.governance.initial_treasury = parse_u256(&raw).map_err(|reason| {
                ConfigError::InvalidValue {
                    var: "QD_INITIAL_TREASURY",
                    value: raw.clone(),
                    reason,
                }
            })?;
        }
        if let Some(depth) = parse_var(&lookup, "QD_COMMAND_QUEUE")? {
            config.runtime.command_queue = depth;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// The first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.chain_id == 0 {
            return Err(ConfigError::ZeroChainId);
        }
        if self.governance.safety_period_secs == 0 {
            return Err(ConfigError::ZeroSafetyPeriod);
        }
        if self.runtime.command_queue == 0 {
            return Err(ConfigError::ZeroCommandQueue);
        }
        if self.chain.forwarder_address == self.chain.governance_address {
            return Err(ConfigError::AddressClash(self.chain.forwarder_address));
        }
        Ok(())
    }

    /// Signing domain of the relay.
    #[must_use]
    pub fn forwarder_domain(&self) -> ForwarderDomain {
        ForwarderDomain::new(self.chain.chain_id, self.chain.forwarder_address)
    }

    /// Governance configuration trusting this node's relay.
    #[must_use]
    pub fn governance_config(&self) -> GovernanceConfig {
        GovernanceConfig {
            safety_period_secs: self.governance.safety_period_secs,
            trusted_forwarder: Some(self.chain.forwarder_address),
            governance_address: self.chain.governance_address,
            max_voting_period_secs: self.governance.max_voting_period_secs,
            max_proposals: self.governance.max_proposals,
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    var,
                    value: value.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}

/// Decimal, or hex with a `0x` prefix.
fn parse_u256(raw: &str) -> Result<U256, String> {
    let raw = raw.trim();
    match raw.strip_prefix("0x") {
        Some(digits) => U256::from_str_radix(digits, 16).map_err(|e| format!("{e:?}")),
        None => U256::from_dec_str(raw).map_err(|e| format!("{e:?}")),
    }
}
