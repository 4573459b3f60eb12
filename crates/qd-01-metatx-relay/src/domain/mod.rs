//! # Domain Layer
//!
//! Pure logic with no I/O: typed-data hashing, signer recovery and the nonce
//! registry. This is the inner layer of the hexagonal architecture.

pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod nonces;
pub mod signing;
pub mod typed_data;
