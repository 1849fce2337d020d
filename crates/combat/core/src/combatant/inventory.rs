//! Equipment as a source of stat modifiers.

use super::Combatant;
use crate::event::{CombatEvent, CombatEvents};
use crate::stats::{ItemId, ModKind, ModifierSource, StatKind, StatModifier};

/// One stat bonus granted while an item is equipped.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStatBonus {
    pub stat: StatKind,
    pub kind: ModKind,
    /// Percent bonuses are fractions: 0.1 = +10%.
    pub value: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub bonuses: Vec<ItemStatBonus>,
}

impl ItemTemplate {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id: ItemId(id),
            name: name.to_owned(),
            description: String::new(),
            bonuses: Vec::new(),
        }
    }

    pub fn with_bonus(mut self, stat: StatKind, kind: ModKind, value: f32) -> Self {
        self.bonuses.push(ItemStatBonus { stat, kind, value });
        self
    }
}

impl Combatant {
    pub fn is_equipped(&self, item: ItemId) -> bool {
        self.equipped.iter().any(|i| i.id == item)
    }

    /// Equips `item`; a no-op if an item with the same id is already worn.
    pub fn equip(&mut self, item: ItemTemplate, events: &mut CombatEvents) -> bool {
        if self.is_equipped(item.id) {
            return false;
        }
        tracing::debug!("{} equips {}", self.name, item.name);
        self.attach_item(item);
        self.after_inventory_change(events);
        true
    }

    /// Unequips `item`, removing every modifier it granted.
    pub fn unequip(&mut self, item: ItemId, events: &mut CombatEvents) -> Option<ItemTemplate> {
        let index = self.equipped.iter().position(|i| i.id == item)?;
        let removed = self.equipped.remove(index);
        self.stats
            .remove_source_everywhere(ModifierSource::Item(removed.id));
        tracing::debug!("{} unequips {}", self.name, removed.name);
        self.after_inventory_change(events);
        Some(removed)
    }

    pub(super) fn attach_item(&mut self, item: ItemTemplate) {
        for bonus in &item.bonuses {
            self.stats.add_modifier(
                bonus.stat,
                StatModifier::new(bonus.value, bonus.kind, ModifierSource::Item(item.id)),
            );
        }
        self.equipped.push(item);
    }

    /// Keeps resources within the new maximums and reports the change.
    fn after_inventory_change(&mut self, events: &mut CombatEvents) {
        self.health = self.health.min(self.max_health());
        self.energy = self.energy.min(self.max_energy());
        events.push(CombatEvent::InventoryChanged {
            combatant: self.id,
            equipped: self.equipped.iter().map(|i| i.id).collect(),
        });
        events.push(CombatEvent::HealthChanged {
            combatant: self.id,
            current: self.health,
            max: self.max_health(),
        });
        events.push(CombatEvent::EnergyChanged {
            combatant: self.id,
            current: self.energy,
            max: self.max_energy(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{base, combatant};
    use super::*;
    use crate::combatant::{CharacterTemplate, CombatantId};

    fn plate() -> ItemTemplate {
        ItemTemplate::new(7, "Plate")
            .with_bonus(StatKind::Armor, ModKind::Flat, 30.0)
            .with_bonus(StatKind::MaxHealth, ModKind::Percent, 0.2)
    }

    #[test]
    fn starting_items_count_towards_initial_health() {
        let template = CharacterTemplate::new("Knight", base()).with_item(plate());
        let knight = Combatant::new(CombatantId::PLAYER, &template);
        assert_eq!(knight.max_health(), 120);
        assert_eq!(knight.health(), 120);
        assert_eq!(knight.stat(StatKind::Armor), 30.0);
    }

    #[test]
    fn equip_twice_is_a_no_op_and_unequip_restores_stats() {
        let mut events = CombatEvents::new();
        let mut knight = combatant(CombatantId::PLAYER, base());

        assert!(knight.equip(plate(), &mut events));
        assert!(!knight.equip(plate(), &mut events));
        assert_eq!(knight.stat(StatKind::Armor), 30.0);

        assert!(knight.unequip(ItemId(7), &mut events).is_some());
        assert!(knight.unequip(ItemId(7), &mut events).is_none());
        assert_eq!(knight.stat(StatKind::Armor), 0.0);
        assert_eq!(knight.max_health(), 100);
        assert!(knight.equipped().is_empty());
    }
}
