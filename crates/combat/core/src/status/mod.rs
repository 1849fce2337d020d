//! Status Effect Registry.
//!
//! Status effects are timed (and, for Wound, stacking) conditions attached to
//! a combatant. Each instance carries a unique [`EffectId`] which is also the
//! [`crate::stats::ModifierSource`] of any stat modifiers it owns, so removing
//! the effect removes exactly its modifiers and nothing else.
//!
//! # Duration
//!
//! Durations count end-of-turn ticks of the bearer. An effect gained during a
//! turn is not charged for that turn: its first tick only clears
//! `newly_applied`.

mod effect;
mod kind;
mod set;

pub use effect::{EffectId, StatChange, StatusEffect};
pub use kind::{Classification, EffectTraits, StatusEffectKind};
pub use set::StatusEffects;
