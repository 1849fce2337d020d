//! Storage for the effects active on one combatant.
//!
//! At most one instance per [`StatusEffectKind`] is ever stored, so the
//! collection is bounded by the number of kinds. The rules that decide
//! *whether* an effect lands live on [`crate::Combatant`]; this type only
//! keeps the instances and hands out their ids.

use arrayvec::ArrayVec;
use strum::EnumCount;

use super::effect::{EffectId, StatusEffect};
use super::kind::{Classification, EffectTraits, StatusEffectKind};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { StatusEffectKind::COUNT }>,
    next_id: u32,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh instance id. Ids are never reused.
    pub fn allocate_id(&mut self) -> EffectId {
        self.next_id += 1;
        EffectId(self.next_id)
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn get_mut(&mut self, kind: StatusEffectKind) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|e| e.kind == kind)
    }

    /// Stores `effect`, displacing and returning any instance of the same kind.
    pub fn insert(&mut self, effect: StatusEffect) -> Option<StatusEffect> {
        let displaced = self.remove(effect.kind);
        // One slot per kind, so a removal above always leaves room.
        self.effects.push(effect);
        displaced
    }

    /// Removes the instance of `kind`, preserving the order of the rest.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Active kinds in application order.
    pub fn kinds(&self) -> Vec<StatusEffectKind> {
        self.effects.iter().map(|e| e.kind).collect()
    }

    /// Kinds of the given classification that a cleanse or purge may remove.
    pub fn removable(&self, classification: Classification) -> Vec<StatusEffectKind> {
        self.effects
            .iter()
            .filter(|e| e.classification == classification)
            .filter(|e| {
                classification == Classification::Buff
                    || !e.kind.has_trait(EffectTraits::CLEANSE_EXEMPT)
            })
            .map(|e| e.kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_one_instance_per_kind() {
        let mut set = StatusEffects::new();
        let mut first = StatusEffect::of(StatusEffectKind::Burn, 2);
        first.id = set.allocate_id();
        let mut second = StatusEffect::of(StatusEffectKind::Burn, 4);
        second.id = set.allocate_id();

        assert!(set.insert(first).is_none());
        let displaced = set.insert(second).expect("first burn displaced");
        assert_eq!(displaced.id, first.id);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(StatusEffectKind::Burn).map(|e| e.duration), Some(4));
    }

    #[test]
    fn removable_debuffs_skip_wound_and_bleed() {
        let mut set = StatusEffects::new();
        set.insert(StatusEffect::of(StatusEffectKind::Wound, 99));
        set.insert(StatusEffect::of(StatusEffectKind::Bleed, 3));
        set.insert(StatusEffect::of(StatusEffectKind::Poison, 3));
        set.insert(StatusEffect::of(StatusEffectKind::Dodge, 1));

        assert_eq!(
            set.removable(Classification::Debuff),
            vec![StatusEffectKind::Poison]
        );
        assert_eq!(set.removable(Classification::Buff), vec![StatusEffectKind::Dodge]);
    }

    #[test]
    fn ids_are_unique() {
        let mut set = StatusEffects::new();
        let a = set.allocate_id();
        let b = set.allocate_id();
        assert_ne!(a, b);
        assert_ne!(a, EffectId::UNASSIGNED);
    }
}
