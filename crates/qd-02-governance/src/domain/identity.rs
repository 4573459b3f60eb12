//! # Identity Resolution
//!
//! Resolves the effective caller once, at the entry boundary. A call whose
//! direct sender is the one trusted relay acts for the signer carried in the
//! calldata suffix; every other call acts for its direct sender.

use shared_types::{Address, CallContext};

/// Effective caller and the calldata meant for the operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedCall<'a> {
    /// Address every downstream check and record uses.
    pub caller: Address,
    /// Calldata with any signer suffix removed.
    pub payload: &'a [u8],
    /// True if the call arrived through the trusted relay.
    pub relayed: bool,
}

/// Knows the single trusted relay address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityResolver {
    trusted_forwarder: Option<Address>,
}

impl IdentityResolver {
    /// Resolver trusting `trusted_forwarder`, or no relay at all.
    #[must_use]
    pub const fn new(trusted_forwarder: Option<Address>) -> Self {
        Self { trusted_forwarder }
    }

    /// The trusted relay, if any.
    #[must_use]
    pub const fn trusted_forwarder(&self) -> Option<Address> {
        self.trusted_forwarder
    }

    /// True if `sender` is the trusted relay.
    #[must_use]
    pub fn is_trusted_forwarder(&self, sender: &Address) -> bool {
        self.trusted_forwarder.as_ref() == Some(sender)
    }

    /// Resolves `ctx`.
    ///
    /// A trusted-relay call too short to carry a suffix resolves to the relay
    /// itself with the full calldata.
    #[must_use]
    pub fn resolve<'a>(&self, ctx: &'a CallContext) -> ResolvedCall<'a> {
        if self.is_trusted_forwarder(&ctx.sender) {
            if let Some((payload, signer)) = ctx.split_signer_suffix() {
                return ResolvedCall {
                    caller: signer,
                    payload,
                    relayed: true,
                };
            }
        }
        ResolvedCall {
            caller: ctx.sender,
            payload: ctx.calldata.as_slice(),
            relayed: false,
        }
    }

    /// Effective caller of `ctx`.
    #[must_use]
    pub fn effective_caller(&self, ctx: &CallContext) -> Address {
        self.resolve(ctx).caller
    }
}
