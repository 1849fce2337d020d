//! Closed set of status effect types and their rule traits.

use bitflags::bitflags;

/// Whether an effect helps or hinders its bearer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    Buff,
    Debuff,
}

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Buffs
    // ========================================================================
    /// Flat armor bonus for the duration.
    Fortify,
    /// Next skill costs no energy.
    Empower,
    /// Heal over time.
    Regeneration,
    /// Next damaging skill deals ×1.5.
    PowerUp,
    /// Next incoming attack is likely dodged.
    Dodge,
    /// Blocks debuffs and all incoming damage.
    Immunity,
    /// Same protection as Immunity, different source.
    Ethereal,
    /// Cleanses one debuff at the start of each turn.
    Purification,
    /// Generic stat increase.
    StatUp,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Armor-mitigated damage over time.
    Burn,
    /// True damage over time.
    Poison,
    /// Incoming mitigated damage ×1.5.
    Vulnerable,
    /// Next damaging skill deals ×0.5.
    Weaken,
    /// Skips the next turn.
    Stun,
    /// Skips the next turn and leaves the target Vulnerable.
    Freeze,
    /// Incoming healing halved.
    MortalWound,
    /// Incoming healing nullified.
    Blight,
    /// Stacking; every 10 stacks turn into Bleed + MortalWound.
    Wound,
    /// True damage each turn proportional to max health.
    Bleed,
    /// Purges one buff at the start of each turn.
    Unraveling,
    /// Generic stat decrease.
    StatDown,
}

bitflags! {
    /// Rule traits attached to each effect type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EffectTraits: u16 {
        /// Bearer ignores incoming debuffs and damage.
        const WARDS = 1 << 0;
        /// Bearer loses its turn.
        const SKIPS_TURN = 1 << 1;
        /// Application can be resisted with Grit.
        const GRIT_RESISTED = 1 << 2;
        /// Tick value scales with the caster's Intelligence.
        const SCALED_TICK = 1 << 3;
        /// Never removed by a cleanse.
        const CLEANSE_EXEMPT = 1 << 4;
        /// Re-application adds stacks to the existing instance.
        const STACKING = 1 << 5;
        /// Owns a modifier on a caller-chosen stat.
        const STAT_MODIFIER = 1 << 6;
    }
}

impl StatusEffectKind {
    pub const fn traits(self) -> EffectTraits {
        match self {
            Self::Immunity | Self::Ethereal => EffectTraits::WARDS,
            Self::Stun | Self::Freeze => EffectTraits::SKIPS_TURN.union(EffectTraits::GRIT_RESISTED),
            Self::Burn | Self::Poison | Self::Regeneration => EffectTraits::SCALED_TICK,
            Self::Wound => EffectTraits::STACKING.union(EffectTraits::CLEANSE_EXEMPT),
            Self::Bleed => EffectTraits::CLEANSE_EXEMPT,
            Self::StatUp | Self::StatDown => EffectTraits::STAT_MODIFIER,
            Self::Fortify
            | Self::Empower
            | Self::PowerUp
            | Self::Dodge
            | Self::Purification
            | Self::Vulnerable
            | Self::Weaken
            | Self::MortalWound
            | Self::Blight
            | Self::Unraveling => EffectTraits::empty(),
        }
    }

    pub const fn has_trait(self, traits: EffectTraits) -> bool {
        self.traits().contains(traits)
    }

    /// Classification used when content does not state one.
    pub const fn default_classification(self) -> Classification {
        match self {
            Self::Fortify
            | Self::Empower
            | Self::Regeneration
            | Self::PowerUp
            | Self::Dodge
            | Self::Immunity
            | Self::Ethereal
            | Self::Purification
            | Self::StatUp => Classification::Buff,
            Self::Burn
            | Self::Poison
            | Self::Vulnerable
            | Self::Weaken
            | Self::Stun
            | Self::Freeze
            | Self::MortalWound
            | Self::Blight
            | Self::Wound
            | Self::Bleed
            | Self::Unraveling
            | Self::StatDown => Classification::Debuff,
        }
    }
}
