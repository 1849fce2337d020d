//! Stat modifiers and the handles that own them.

use core::fmt;

use crate::status::EffectId;

/// Stable identifier of an equippable item template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Opaque owner of a modifier.
///
/// Removal matches on this handle only, so two distinct sources granting the
/// same value never collapse into one another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    /// A live status effect instance.
    Effect(EffectId),
    /// An equipped item.
    Item(ItemId),
}

/// How a modifier combines with the base value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModKind {
    /// Added to the base before percentages are applied.
    Flat,
    /// Summed with other percentages, then multiplied (0.1 = +10%).
    Percent,
}

/// A single contribution to a stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub value: f32,
    pub kind: ModKind,
    pub source: ModifierSource,
}

impl StatModifier {
    pub fn new(value: f32, kind: ModKind, source: ModifierSource) -> Self {
        Self {
            value,
            kind,
            source,
        }
    }

    /// Create a flat modifier
    pub fn flat(value: f32, source: ModifierSource) -> Self {
        Self::new(value, ModKind::Flat, source)
    }

    /// Create a percentage modifier (0.2 = +20%)
    pub fn percent(value: f32, source: ModifierSource) -> Self {
        Self::new(value, ModKind::Percent, source)
    }
}
