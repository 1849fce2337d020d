//! A single stat with its modifier ledger.
//!
//! Calculation order: `ceil((base + Σflat) * (1 + Σpercent))`.
//!
//! The effective value is cached and only recomputed after the ledger changes.
//! The ledger never clamps; callers clamp downstream (health floors at zero,
//! mitigation ignores negative armor, and so on).

use core::cell::Cell;

use super::modifier::{ModKind, ModifierSource, StatModifier};

/// Relative tolerance below the ceiling. Float noise from `f32` percents
/// (`100 * 1.1 = 110.0000001`) stays under it and does not add a point, while
/// any real fraction (a flat `+0.0005` included) still rounds up.
const CEIL_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    base: f32,
    modifiers: Vec<StatModifier>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cached: Cell<Option<f32>>,
}

impl Stat {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            modifiers: Vec::new(),
            cached: Cell::new(None),
        }
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    /// Modifiers in insertion order.
    pub fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    pub fn add_modifier(&mut self, modifier: StatModifier) {
        self.modifiers.push(modifier);
        self.cached.set(None);
    }

    /// Removes every modifier owned by `source`.
    ///
    /// Returns true if anything was removed; calling it again without an
    /// intervening add is a no-op.
    pub fn remove_modifiers_by_source(&mut self, source: ModifierSource) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.source != source);
        let removed = self.modifiers.len() != before;
        if removed {
            self.cached.set(None);
        }
        removed
    }

    /// Effective value, recomputed only when the ledger is dirty.
    pub fn value(&self) -> f32 {
        if let Some(value) = self.cached.get() {
            return value;
        }
        let value = self.compute();
        self.cached.set(Some(value));
        value
    }

    fn compute(&self) -> f32 {
        let (flat, percent) =
            self.modifiers
                .iter()
                .fold((0.0_f64, 0.0_f64), |(flat, percent), m| match m.kind {
                    ModKind::Flat => (flat + m.value as f64, percent),
                    ModKind::Percent => (flat, percent + m.value as f64),
                });

        let raw = (self.base as f64 + flat) * (1.0 + percent);
        let slack = raw.abs() * CEIL_TOLERANCE;
        (raw - slack).ceil() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ItemId;
    use crate::status::EffectId;
    use proptest::prelude::*;

    const SWORD: ModifierSource = ModifierSource::Item(ItemId(1));
    const RING: ModifierSource = ModifierSource::Item(ItemId(2));

    #[test]
    fn flat_then_percent() {
        let mut stat = Stat::new(100.0);
        stat.add_modifier(StatModifier::flat(20.0, SWORD));
        stat.add_modifier(StatModifier::percent(0.1, RING));
        stat.add_modifier(StatModifier::percent(0.15, RING));
        // (100 + 20) * 1.25
        assert_eq!(stat.value(), 150.0);
    }

    #[test]
    fn fractional_results_round_up() {
        let mut stat = Stat::new(10.0);
        stat.add_modifier(StatModifier::percent(0.15, SWORD));
        assert_eq!(stat.value(), 12.0);
    }

    #[test]
    fn float_noise_does_not_add_a_point() {
        let mut stat = Stat::new(100.0);
        stat.add_modifier(StatModifier::percent(0.1, SWORD));
        assert_eq!(stat.value(), 110.0);

        let mut stat = Stat::new(140.0);
        stat.add_modifier(StatModifier::percent(0.1, SWORD));
        assert_eq!(stat.value(), 154.0);
    }

    #[test]
    fn tiny_positive_fraction_still_rounds_up() {
        let mut stat = Stat::new(10.0);
        stat.add_modifier(StatModifier::flat(0.0005, SWORD));
        assert_eq!(stat.value(), 11.0);

        let mut stat = Stat::new(10.0);
        stat.add_modifier(StatModifier::flat(0.0001, SWORD));
        assert_eq!(stat.value(), 11.0);
    }

    #[test]
    fn removal_is_by_source_and_idempotent() {
        let mut stat = Stat::new(50.0);
        stat.add_modifier(StatModifier::flat(5.0, SWORD));
        stat.add_modifier(StatModifier::flat(5.0, RING));
        stat.add_modifier(StatModifier::flat(5.0, SWORD));
        assert_eq!(stat.value(), 65.0);

        assert!(stat.remove_modifiers_by_source(SWORD));
        assert_eq!(stat.value(), 55.0);
        assert!(!stat.remove_modifiers_by_source(SWORD));
        assert_eq!(stat.value(), 55.0);
        assert_eq!(stat.modifiers().len(), 1);
    }

    #[test]
    fn identical_values_from_distinct_sources_stay_distinct() {
        let mut stat = Stat::new(0.0);
        let a = ModifierSource::Effect(EffectId(1));
        let b = ModifierSource::Effect(EffectId(2));
        stat.add_modifier(StatModifier::flat(150.0, a));
        stat.add_modifier(StatModifier::flat(150.0, b));
        stat.remove_modifiers_by_source(a);
        assert_eq!(stat.value(), 150.0);
    }

    #[test]
    fn ledger_does_not_clamp() {
        let mut stat = Stat::new(10.0);
        stat.add_modifier(StatModifier::flat(-25.0, SWORD));
        assert_eq!(stat.value(), -15.0);
    }

    /// Exact `ceil((base + flat) * (100 + percent) / 100)` in integers.
    fn reference(base: i64, flats: &[i64], percents: &[i64]) -> i64 {
        let numerator = (base + flats.iter().sum::<i64>()) * (100 + percents.iter().sum::<i64>());
        if numerator >= 0 {
            (numerator + 99) / 100
        } else {
            numerator / 100
        }
    }

    proptest! {
        #[test]
        fn value_matches_formula(
            base in 0i64..1000,
            flats in proptest::collection::vec(-50i64..200, 0..4),
            percents in proptest::collection::vec(0i64..100, 0..4),
        ) {
            let mut stat = Stat::new(base as f32);
            for (i, flat) in flats.iter().enumerate() {
                stat.add_modifier(StatModifier::flat(*flat as f32, ModifierSource::Item(ItemId(i as u32))));
            }
            for (i, pct) in percents.iter().enumerate() {
                stat.add_modifier(StatModifier::percent(*pct as f32 / 100.0, ModifierSource::Effect(EffectId(i as u32))));
            }
            prop_assert_eq!(stat.value() as i64, reference(base, &flats, &percents));
        }

        #[test]
        fn add_then_remove_restores_value(
            base in -100f32..1000.0,
            existing in -50f32..50.0,
            added in -500f32..500.0,
            percent in prop::bool::ANY,
        ) {
            let mut stat = Stat::new(base);
            stat.add_modifier(StatModifier::flat(existing, SWORD));
            let before = stat.value();

            let kind = if percent { ModKind::Percent } else { ModKind::Flat };
            stat.add_modifier(StatModifier::new(added / 100.0, kind, RING));
            stat.remove_modifiers_by_source(RING);
            prop_assert_eq!(stat.value(), before);
        }
    }
}
