//! # Test Harness
//!
//! A relay and a governance service wired together the way the node wires
//! them, on a manual clock, with every adapter observable.

use qd_01_metatx_relay::{
    address_of, sign_request, EcdsaSignature, ForwardRequest, Forwarder, ForwarderDomain,
    InMemoryRelayLog, MetaTxRelayApi, RelayError, RelayOutcome, SigningKey,
};
use qd_02_governance::{
    GovernanceApi, GovernanceCall, GovernanceConfig, GovernanceService, InMemoryEventLog,
    InMemoryLedger, Proposal, DEFAULT_GOVERNANCE_ADDRESS,
};
use shared_types::{Address, Bytes, CallContext, Clock, ManualClock, U256};
use std::sync::Arc;

/// Harness start time.
pub const START: u64 = 1_700_000_000;
/// Chain id of the harness relay domain.
pub const CHAIN_ID: u64 = 1337;
/// One day in seconds.
pub const DAY: u64 = 86_400;
/// Gas given to every signed request.
pub const REQUEST_GAS: u64 = 200_000;

/// Address of the harness relay.
pub fn forwarder_address() -> Address {
    Address::from_low_u64(0xFD0)
}

/// Address of the account submitting relay transactions.
pub fn relayer() -> Address {
    Address::from_low_u64(0xBEEF)
}

/// Shorthand for small addresses.
pub fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

/// A signer with a fresh random key.
pub struct Wallet {
    pub key: SigningKey,
    pub address: Address,
}

impl Wallet {
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_of(&key);
        Self { key, address }
    }
}

/// Relay plus governance on shared in-memory adapters.
pub struct Dao {
    pub governance: Arc<GovernanceService>,
    pub forwarder: Arc<Forwarder>,
    pub clock: Arc<ManualClock>,
    pub ledger: Arc<InMemoryLedger>,
    pub events: Arc<InMemoryEventLog>,
    pub relay_log: Arc<InMemoryRelayLog>,
}

impl Dao {
    /// Default governance config trusting the harness relay.
    pub fn new() -> Self {
        Self::with_config(GovernanceConfig {
            trusted_forwarder: Some(forwarder_address()),
            ..GovernanceConfig::default()
        })
    }

    pub fn with_config(config: GovernanceConfig) -> Self {
        let clock = Arc::new(ManualClock::new(START));
        let ledger = Arc::new(InMemoryLedger::new());
        let events = Arc::new(InMemoryEventLog::new());
        let relay_log = Arc::new(InMemoryRelayLog::new());

        let governance = Arc::new(GovernanceService::new(
            config,
            clock.clone(),
            ledger.clone(),
            events.clone(),
        ));
        let forwarder = Arc::new(Forwarder::new(
            Self::domain(),
            clock.clone(),
            relay_log.clone(),
        ));
        forwarder.register_target(governance.clone());

        Self {
            governance,
            forwarder,
            clock,
            ledger,
            events,
            relay_log,
        }
    }

    pub fn domain() -> ForwarderDomain {
        ForwarderDomain::new(CHAIN_ID, forwarder_address())
    }

    /// Unsigned request for `call` at the signer's current nonce.
    pub fn request(&self, wallet: &Wallet, call: &GovernanceCall) -> ForwardRequest {
        ForwardRequest {
            from: wallet.address,
            to: DEFAULT_GOVERNANCE_ADDRESS,
            value: U256::zero(),
            gas: REQUEST_GAS,
            nonce: self.forwarder.get_nonce(&wallet.address),
            deadline: self.clock_now() + 3600,
            data: Bytes(call.encode().expect("encode call")),
        }
    }

    pub fn sign(&self, wallet: &Wallet, request: &ForwardRequest) -> EcdsaSignature {
        sign_request(&wallet.key, &Self::domain(), request).expect("sign request")
    }

    /// Submits `request` as the harness relayer, attaching `request.value`.
    pub fn submit(
        &self,
        request: &ForwardRequest,
        signature: &EcdsaSignature,
    ) -> Result<RelayOutcome, RelayError> {
        let ctx = CallContext::direct(relayer()).with_value(request.value);
        self.forwarder.execute(&ctx, request, signature)
    }

    /// Signs and submits `call` for `wallet` at its current nonce.
    pub fn relay(&self, wallet: &Wallet, call: &GovernanceCall) -> Result<RelayOutcome, RelayError> {
        let request = self.request(wallet, call);
        let signature = self.sign(wallet, &request);
        self.submit(&request, &signature)
    }

    pub fn clock_now(&self) -> u64 {
        self.clock.now()
    }

    /// Proposal `proposal_id`; panics if missing.
    pub fn proposal(&self, proposal_id: u64) -> Proposal {
        self.governance
            .get_proposal(proposal_id)
            .unwrap_or_else(|| panic!("proposal {proposal_id} missing"))
    }

    /// Moves the clock to the first second `proposal_id` may execute.
    pub fn skip_to_executable(&self, proposal_id: u64) {
        let safety = self.governance.config().safety_period_secs;
        self.clock
            .set(self.proposal(proposal_id).executable_after(safety) + 1);
    }
}

impl Default for Dao {
    fn default() -> Self {
        Self::new()
    }
}
