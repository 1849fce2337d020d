//! Immutable skill definitions.

use core::fmt;

use crate::status::{Classification, StatChange, StatusEffect, StatusEffectKind};

/// Stable identifier of a skill template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u32);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Relic,
    Mythic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    #[default]
    None,
    Inferno,
    Quake,
    Tide,
    Cyclone,
    Verdant,
}

/// Who the skill's primary and secondary effects land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    Enemy,
    #[strum(serialize = "Self")]
    SelfTarget,
}

/// Primary effect of a skill.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// `base + might * might_ratio`, dealt to the effect target.
    Damage { base: i32, might_ratio: f32 },
    /// `base + intelligence * intelligence_ratio`, always credited to the caster.
    Healing { base: i32, intelligence_ratio: f32 },
}

/// Status effect a skill attaches on a successful use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub kind: StatusEffectKind,
    pub duration: i32,
    pub classification: Classification,
    /// Wound stacks added per application.
    #[cfg_attr(feature = "serde", serde(default = "default_stacks"))]
    pub stacks: u32,
    /// Required for `StatUp` / `StatDown`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_change: Option<StatChange>,
    /// Flat part of a Burn / Poison / Regeneration tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_base: f32,
    /// Caster Intelligence scaling of a Burn / Poison / Regeneration tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_intelligence_ratio: f32,
}

#[cfg(feature = "serde")]
fn default_stacks() -> u32 {
    1
}

impl StatusApplication {
    pub fn new(kind: StatusEffectKind, duration: i32) -> Self {
        Self {
            kind,
            duration,
            classification: kind.default_classification(),
            stacks: 1,
            stat_change: None,
            tick_base: 0.0,
            tick_intelligence_ratio: 0.0,
        }
    }

    /// Builds the effect instance this application requests.
    pub fn to_effect(&self) -> StatusEffect {
        let effect = StatusEffect::new(self.kind, self.duration, self.classification)
            .with_stacks(self.stacks);
        match self.stat_change {
            Some(change) => effect.with_stat_change(change),
            None => effect,
        }
    }
}

/// A skill as authored in content; never mutated during combat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTemplate {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,

    pub energy_cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,

    pub target: TargetKind,
    pub effect: SkillEffect,

    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusApplication>,
    /// Debuffs removed from the effect target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cleanse: u32,
    /// Buffs removed from the effect target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub purge: u32,
}

impl SkillTemplate {
    /// Plain damaging skill against the enemy.
    pub fn damage(id: u32, name: &str, energy_cost: i32, base: i32, might_ratio: f32) -> Self {
        Self::new(
            SkillId(id),
            name,
            energy_cost,
            TargetKind::Enemy,
            SkillEffect::Damage { base, might_ratio },
        )
    }

    /// Plain self heal.
    pub fn healing(
        id: u32,
        name: &str,
        energy_cost: i32,
        base: i32,
        intelligence_ratio: f32,
    ) -> Self {
        Self::new(
            SkillId(id),
            name,
            energy_cost,
            TargetKind::SelfTarget,
            SkillEffect::Healing {
                base,
                intelligence_ratio,
            },
        )
    }

    pub fn new(
        id: SkillId,
        name: &str,
        energy_cost: i32,
        target: TargetKind,
        effect: SkillEffect,
    ) -> Self {
        Self {
            id,
            name: name.to_owned(),
            description: String::new(),
            rarity: Rarity::default(),
            element: Element::default(),
            energy_cost,
            cooldown: 0,
            target,
            effect,
            status: None,
            cleanse: 0,
            purge: 0,
        }
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    pub fn with_status(mut self, status: StatusApplication) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_cleanse(mut self, count: u32) -> Self {
        self.cleanse = count;
        self
    }

    pub fn with_purge(mut self, count: u32) -> Self {
        self.purge = count;
        self
    }

    pub fn targets_enemy(&self) -> bool {
        self.target == TargetKind::Enemy
    }
}
