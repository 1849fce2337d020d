//! Change notifications emitted by the rules engine.
//!
//! The engine never calls into a presentation layer. Every observable change
//! is pushed onto a [`CombatEvents`] queue which the owner drains after each
//! step and forwards wherever it likes (a UI, a log, a broadcast bus).

use crate::combatant::CombatantId;
use crate::engine::CombatState;
use crate::error::Rejection;
use crate::skill::SkillId;
use crate::stats::ItemId;
use crate::status::StatusEffectKind;

/// Why an attack failed to connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissReason {
    /// The defender's `Dodge` buff won its roll.
    Dodged,
    /// Passive, speed-based evasion.
    Evaded,
}

/// Why a turn was lost before any action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipCause {
    Stunned,
    Frozen,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    // ===== resource notifications =====
    HealthChanged {
        combatant: CombatantId,
        current: i32,
        max: i32,
    },
    EnergyChanged {
        combatant: CombatantId,
        current: i32,
        max: i32,
    },
    StatusEffectsChanged {
        combatant: CombatantId,
        active: Vec<StatusEffectKind>,
    },
    CooldownsChanged {
        combatant: CombatantId,
        cooldowns: Vec<(SkillId, u32)>,
    },
    InventoryChanged {
        combatant: CombatantId,
        equipped: Vec<ItemId>,
    },

    // ===== resolution log =====
    SkillUsed {
        caster: CombatantId,
        skill: SkillId,
        energy_spent: i32,
    },
    AttackMissed {
        attacker: CombatantId,
        defender: CombatantId,
        reason: MissReason,
    },
    DamageTaken {
        combatant: CombatantId,
        amount: i32,
        true_damage: bool,
    },
    Healed {
        combatant: CombatantId,
        amount: i32,
    },
    EffectApplied {
        combatant: CombatantId,
        kind: StatusEffectKind,
        stacks: u32,
    },
    EffectResisted {
        combatant: CombatantId,
        kind: StatusEffectKind,
    },
    EffectBlocked {
        combatant: CombatantId,
        kind: StatusEffectKind,
    },
    EffectRemoved {
        combatant: CombatantId,
        kind: StatusEffectKind,
    },
    BleedTriggered {
        combatant: CombatantId,
    },
    Died {
        combatant: CombatantId,
    },

    // ===== turn flow =====
    TurnSkipped {
        combatant: CombatantId,
        cause: SkipCause,
    },
    Passed {
        combatant: CombatantId,
    },
    ActionRejected {
        combatant: CombatantId,
        reason: Rejection,
    },
    StateChanged {
        from: CombatState,
        to: CombatState,
    },
}

impl CombatEvent {
    /// True for turn-flow notifications, false for resource and resolution ones.
    pub fn is_turn_flow(&self) -> bool {
        matches!(
            self,
            Self::TurnSkipped { .. }
                | Self::Passed { .. }
                | Self::ActionRejected { .. }
                | Self::StateChanged { .. }
        )
    }
}

/// Ordered queue of pending notifications.
#[derive(Clone, Debug, Default)]
pub struct CombatEvents {
    queue: Vec<CombatEvent>,
}

impl CombatEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.queue.push(event);
    }

    /// Takes every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> &[CombatEvent] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
