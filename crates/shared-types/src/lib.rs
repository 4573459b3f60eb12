//! # Shared Types Crate
//!
//! Value types and the call model shared by every Quorum-DAO subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Hash`, `Bytes` and `U256` are
//!   defined once and reused by the relay and the governance core.
//! - **Explicit Caller**: every call enters a component as a [`CallContext`].
//!   There is no ambient "current sender"; the context is passed by value.
//! - **Uniform Forwarding**: anything the relay may forward to implements
//!   [`CallTarget`].

pub mod call;
pub mod clock;
pub mod entities;
pub mod errors;

pub use call::{CallContext, CallTarget};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::*;
pub use errors::*;
