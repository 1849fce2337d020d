use crate::skill::SkillTemplate;
use crate::stats::BaseStats;

use super::inventory::ItemTemplate;

/// Immutable description of a character: base stats, known skills and the
/// items it starts with equipped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub name: String,
    pub stats: BaseStats,
    pub skills: Vec<SkillTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_items: Vec<ItemTemplate>,
}

impl CharacterTemplate {
    pub fn new(name: impl Into<String>, stats: BaseStats) -> Self {
        Self {
            name: name.into(),
            stats,
            skills: Vec::new(),
            starting_items: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: SkillTemplate) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_item(mut self, item: ItemTemplate) -> Self {
        self.starting_items.push(item);
        self
    }
}
