//! The full set of stats a combatant carries.

use strum::{EnumCount, IntoEnumIterator, VariantArray};

use super::modifier::{ModifierSource, StatModifier};
use super::stat::Stat;

/// Every stat tracked on a combatant.
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
    strum::VariantArray,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    // ========================================================================
    // Combat
    // ========================================================================
    MaxHealth,
    /// Maximum energy pool.
    Energy,
    /// Energy restored at the start of each turn.
    EnergyRegen,
    /// Scales damage skills.
    Might,
    /// Scales healing skills and DoT/HoT ticks.
    Intelligence,
    Armor,
    /// Drives passive evasion.
    Speed,
    /// Drives Stun/Freeze resistance.
    Grit,

    // ========================================================================
    // Board (carried for the overworld, unused by combat rules)
    // ========================================================================
    Luck,
    Growth,
}

impl StatKind {
    const fn index(self) -> usize {
        self as usize
    }
}

/// Template base values, one per [`StatKind`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub max_health: f32,
    pub energy: f32,
    pub energy_regen: f32,
    pub might: f32,
    pub intelligence: f32,
    pub armor: f32,
    pub speed: f32,
    pub grit: f32,
    pub luck: f32,
    pub growth: f32,
}

impl BaseStats {
    pub fn get(&self, kind: StatKind) -> f32 {
        match kind {
            StatKind::MaxHealth => self.max_health,
            StatKind::Energy => self.energy,
            StatKind::EnergyRegen => self.energy_regen,
            StatKind::Might => self.might,
            StatKind::Intelligence => self.intelligence,
            StatKind::Armor => self.armor,
            StatKind::Speed => self.speed,
            StatKind::Grit => self.grit,
            StatKind::Luck => self.luck,
            StatKind::Growth => self.growth,
        }
    }
}

/// One [`Stat`] ledger per [`StatKind`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSheet {
    stats: [Stat; StatKind::COUNT],
}

impl StatSheet {
    pub fn from_base(base: &BaseStats) -> Self {
        Self {
            stats: core::array::from_fn(|i| Stat::new(base.get(StatKind::VARIANTS[i]))),
        }
    }

    pub fn stat(&self, kind: StatKind) -> &Stat {
        &self.stats[kind.index()]
    }

    pub fn stat_mut(&mut self, kind: StatKind) -> &mut Stat {
        &mut self.stats[kind.index()]
    }

    /// Effective value of `kind`.
    pub fn value(&self, kind: StatKind) -> f32 {
        self.stat(kind).value()
    }

    pub fn add_modifier(&mut self, kind: StatKind, modifier: StatModifier) {
        self.stat_mut(kind).add_modifier(modifier);
    }

    pub fn remove_modifiers_by_source(&mut self, kind: StatKind, source: ModifierSource) -> bool {
        self.stat_mut(kind).remove_modifiers_by_source(source)
    }

    /// Removes `source` from every stat; returns true if any stat changed.
    pub fn remove_source_everywhere(&mut self, source: ModifierSource) -> bool {
        self.stats
            .iter_mut()
            .fold(false, |changed, stat| stat.remove_modifiers_by_source(source) || changed)
    }

    /// `(kind, effective value)` pairs in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (StatKind, f32)> + '_ {
        StatKind::iter().map(move |kind| (kind, self.value(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ItemId;

    fn base() -> BaseStats {
        BaseStats {
            max_health: 200.0,
            armor: 40.0,
            speed: 90.0,
            ..BaseStats::default()
        }
    }

    #[test]
    fn sheet_is_seeded_from_template() {
        let sheet = StatSheet::from_base(&base());
        assert_eq!(sheet.value(StatKind::MaxHealth), 200.0);
        assert_eq!(sheet.value(StatKind::Armor), 40.0);
        assert_eq!(sheet.value(StatKind::Speed), 90.0);
        assert_eq!(sheet.value(StatKind::Growth), 0.0);
    }

    #[test]
    fn removing_a_source_everywhere_touches_every_stat() {
        let mut sheet = StatSheet::from_base(&base());
        let source = ModifierSource::Item(ItemId(3));
        sheet.add_modifier(StatKind::Armor, StatModifier::flat(10.0, source));
        sheet.add_modifier(StatKind::Speed, StatModifier::percent(0.5, source));
        assert_eq!(sheet.value(StatKind::Speed), 135.0);

        assert!(sheet.remove_source_everywhere(source));
        assert_eq!(sheet.value(StatKind::Armor), 40.0);
        assert_eq!(sheet.value(StatKind::Speed), 90.0);
        assert!(!sheet.remove_source_everywhere(source));
    }

    #[test]
    fn stat_names_parse() {
        assert_eq!("Intelligence".parse::<StatKind>().ok(), Some(StatKind::Intelligence));
        assert_eq!(StatKind::EnergyRegen.to_string(), "EnergyRegen");
    }
}
