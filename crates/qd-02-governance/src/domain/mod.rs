//! # Domain Layer
//!
//! Pure governance logic. No locks, no I/O.

pub mod entities;
pub mod identity;
pub mod invariants;
pub mod journal;
pub mod state;
pub mod value_objects;
