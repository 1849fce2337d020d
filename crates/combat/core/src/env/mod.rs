//! Environment services consumed by the rules.
//!
//! The engine never reaches for global randomness; it draws through the
//! oracle bundled here so that every fight is replayable from its seed.
mod rng;

pub use rng::{CombatRng, FixedRng, PcgRng, RngOracle, RollContext, compute_seed};
