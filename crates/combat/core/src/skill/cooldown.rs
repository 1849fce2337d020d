//! Remaining cooldowns of one combatant.

use std::collections::BTreeMap;

use super::template::SkillId;

/// Skill → turns until it can be used again.
///
/// Only skills with a non-zero remaining count are stored; a skill absent from
/// the map is ready.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    remaining: BTreeMap<SkillId, u32>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns left before `skill` is usable; 0 when ready.
    pub fn remaining(&self, skill: SkillId) -> u32 {
        self.remaining.get(&skill).copied().unwrap_or(0)
    }

    pub fn is_on_cooldown(&self, skill: SkillId) -> bool {
        self.remaining(skill) > 0
    }

    /// Starts a cooldown; a zero-turn cooldown is not recorded.
    pub fn start(&mut self, skill: SkillId, turns: u32) {
        if turns > 0 {
            self.remaining.insert(skill, turns);
        }
    }

    /// Decrements every entry by one and drops the ones that reach zero.
    ///
    /// Returns true when anything changed.
    pub fn tick(&mut self) -> bool {
        if self.remaining.is_empty() {
            return false;
        }
        for turns in self.remaining.values_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.remaining.retain(|_, turns| *turns > 0);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillId, u32)> + '_ {
        self.remaining.iter().map(|(skill, turns)| (*skill, *turns))
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
