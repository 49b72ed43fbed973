//! Pure domain logic for the Pitchside settlement engine.
//!
//! This crate has no I/O and no internal dependencies. Scoring, payout
//! math, the idempotency decision function, tax computation and audit
//! classification live here so the API layer and the batch worker share a
//! single implementation.

pub mod audit;
pub mod error;
pub mod idempotency;
pub mod lineup;
pub mod market;
pub mod packs;
pub mod payout;
pub mod roles;
pub mod scoring;
pub mod stats;
pub mod types;
