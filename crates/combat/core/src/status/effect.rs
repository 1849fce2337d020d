//! A live status effect instance.

use core::fmt;

use super::kind::{Classification, StatusEffectKind};
use crate::stats::{ModKind, StatKind};

/// Identity of one effect instance; doubles as its modifier source handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u32);

impl EffectId {
    /// Placeholder carried by effects that have not been applied yet.
    pub const UNASSIGNED: Self = Self(0);
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect#{}", self.0)
    }
}

/// Stat change carried by `StatUp` / `StatDown`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatChange {
    pub stat: StatKind,
    pub kind: ModKind,
    /// Magnitude; `StatDown` flips the sign when applied.
    pub value: f32,
}

/// A single status effect on a combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: EffectId,
    pub kind: StatusEffectKind,
    pub classification: Classification,
    /// Remaining end-of-turn ticks.
    pub duration: i32,
    /// Set on application; the first end-of-turn tick clears it instead of
    /// decrementing `duration`.
    pub newly_applied: bool,
    pub stacks: u32,
    /// Per-turn amount for Burn / Poison / Regeneration.
    pub tick_value: i32,
    pub stat_change: Option<StatChange>,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, duration: i32, classification: Classification) -> Self {
        Self {
            id: EffectId::UNASSIGNED,
            kind,
            classification,
            duration,
            newly_applied: true,
            stacks: 1,
            tick_value: 0,
            stat_change: None,
        }
    }

    /// Effect with the type's usual classification.
    pub fn of(kind: StatusEffectKind, duration: i32) -> Self {
        Self::new(kind, duration, kind.default_classification())
    }

    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks;
        self
    }

    pub fn with_tick_value(mut self, tick_value: i32) -> Self {
        self.tick_value = tick_value;
        self
    }

    pub fn with_stat_change(mut self, change: StatChange) -> Self {
        self.stat_change = Some(change);
        self
    }

    pub fn is_buff(&self) -> bool {
        self.classification == Classification::Buff
    }

    pub fn is_debuff(&self) -> bool {
        self.classification == Classification::Debuff
    }
}
