//! Combatants: one side of a fight with its stats, resources and effects.
//!
//! A [`Combatant`] is built from an immutable [`CharacterTemplate`] and owns
//! everything that changes during combat. The rules that mutate it are split
//! by concern:
//!
//! - `vitals`: damage, healing, death, energy and cooldown upkeep
//! - `effects`: status effect application, expiry, cleanse/purge, DoT/HoT
//! - `actions`: skill use and hit resolution
//! - `inventory`: equipment as stat modifier sources

mod actions;
mod effects;
mod inventory;
mod template;
mod vitals;

pub use actions::{HitOutcome, SkillOutcome};
pub use effects::{ApplyOutcome, EffectSource};
pub use inventory::{ItemStatBonus, ItemTemplate};
pub use template::CharacterTemplate;

use core::fmt;

use crate::skill::{Cooldowns, SkillId, SkillTemplate};
use crate::stats::{StatKind, StatSheet};
use crate::status::StatusEffects;

/// Identity of a combatant within one fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    pub const PLAYER: Self = Self(0);
    pub const ENEMY: Self = Self(1);

    /// The other side of a two-party fight.
    pub const fn opponent(self) -> Self {
        if self.0 == Self::PLAYER.0 {
            Self::ENEMY
        } else {
            Self::PLAYER
        }
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::PLAYER => f.write_str("player"),
            Self::ENEMY => f.write_str("enemy"),
            Self(other) => write!(f, "#{other}"),
        }
    }
}

/// What an effect needs to know about whoever cast it.
///
/// Captured before the effect is applied so a caster may target itself
/// without aliasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CasterSnapshot {
    pub id: CombatantId,
    pub intelligence: f32,
}

/// Live combat state of one character.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    id: CombatantId,
    name: String,
    stats: StatSheet,
    health: i32,
    energy: i32,
    effects: StatusEffects,
    cooldowns: Cooldowns,
    skills: Vec<SkillTemplate>,
    equipped: Vec<ItemTemplate>,
    dead: bool,
}

impl Combatant {
    /// Creates a combatant at full health and energy.
    ///
    /// Starting items are equipped first so their bonuses count towards the
    /// initial resources.
    pub fn new(id: CombatantId, template: &CharacterTemplate) -> Self {
        let mut combatant = Self {
            id,
            name: template.name.clone(),
            stats: StatSheet::from_base(&template.stats),
            health: 0,
            energy: 0,
            effects: StatusEffects::new(),
            cooldowns: Cooldowns::new(),
            skills: template.skills.clone(),
            equipped: Vec::new(),
            dead: false,
        };
        for item in &template.starting_items {
            combatant.attach_item(item.clone());
        }
        combatant.health = combatant.max_health();
        combatant.energy = combatant.max_energy();
        combatant
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StatSheet {
        &self.stats
    }

    /// Effective value of one stat.
    pub fn stat(&self, kind: StatKind) -> f32 {
        self.stats.value(kind)
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    pub fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    pub fn skills(&self) -> &[SkillTemplate] {
        &self.skills
    }

    pub fn skill(&self, id: SkillId) -> Option<&SkillTemplate> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn equipped(&self) -> &[ItemTemplate] {
        &self.equipped
    }

    /// Dead combatants stay addressable but never act again.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.health > 0
    }

    pub fn snapshot(&self) -> CasterSnapshot {
        CasterSnapshot {
            id: self.id,
            intelligence: self.stat(StatKind::Intelligence),
        }
    }
}

/// Rounds half to even, matching how the balance tables were tuned.
pub(crate) fn round_to_int(value: f32) -> i32 {
    value.round_ties_even() as i32
}
