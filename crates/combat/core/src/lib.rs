//! Deterministic combat rules for a two-party, turn-based RPG fight.
//!
//! `combat-core` owns the rules and nothing else: no I/O, no clocks, no UI
//! types. The layers, leaves first:
//!
//! - [`stats`]: per-stat modifier ledgers with cached effective values
//! - [`status`]: status effect instances and their per-combatant registry
//! - [`skill`]: immutable skill templates and cooldown tracking
//! - [`combatant`]: resolution rules acting on one side of the fight
//! - [`engine`]: the turn state machine driving both sides
//!
//! All randomness flows through [`CombatRng`], and every observable change is
//! queued as a [`CombatEvent`] for the caller to drain.
pub mod combatant;
pub mod config;
pub mod context;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod skill;
pub mod stats;
pub mod status;

pub use combatant::{
    ApplyOutcome, CasterSnapshot, CharacterTemplate, Combatant, CombatantId, EffectSource,
    HitOutcome, ItemStatBonus, ItemTemplate, SkillOutcome,
};
pub use config::CombatConfig;
pub use context::ResolveContext;
pub use engine::{Advance, CombatEngine, CombatState, Outcome, Pacing, Side, TurnAction};
pub use env::{CombatRng, FixedRng, PcgRng, RngOracle, RollContext, compute_seed};
pub use error::{CombatError, ErrorSeverity, Rejection};
pub use event::{CombatEvent, CombatEvents, MissReason, SkipCause};
pub use skill::{
    Cooldowns, Element, Rarity, SkillEffect, SkillId, SkillTemplate, StatusApplication,
    TargetKind,
};
pub use stats::{BaseStats, ItemId, ModKind, ModifierSource, Stat, StatKind, StatModifier, StatSheet};
pub use status::{
    Classification, EffectId, EffectTraits, StatChange, StatusEffect, StatusEffectKind,
    StatusEffects,
};
