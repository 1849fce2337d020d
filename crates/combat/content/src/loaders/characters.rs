//! Character roster loader.
//!
//! Characters reference skills and items by id; the loader resolves those
//! references against already-loaded catalogs into complete
//! [`CharacterTemplate`]s.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{BaseStats, CharacterTemplate, ItemId, ItemTemplate, SkillId, SkillTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One roster entry as written in RON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSpec {
    /// Lookup key, e.g. `"knight"`.
    pub id: String,
    pub name: String,
    pub stats: BaseStats,
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub items: Vec<ItemId>,
}

/// Resolved characters keyed by roster id, in file order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<(String, CharacterTemplate)>,
}

impl Roster {
    pub fn get(&self, id: &str) -> Option<&CharacterTemplate> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, template)| template)
    }

    /// Like [`Roster::get`], with an error naming the missing id.
    pub fn require(&self, id: &str) -> LoadResult<&CharacterTemplate> {
        self.get(id).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown character '{}' (available: {})",
                id,
                self.ids().collect::<Vec<_>>().join(", ")
            )
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loader for character rosters from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// RON format: `Vec<CharacterSpec>`.
    pub fn load(
        path: &Path,
        skills: &[SkillTemplate],
        items: &[ItemTemplate],
    ) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content, skills, items)
    }

    pub fn parse(
        content: &str,
        skills: &[SkillTemplate],
        items: &[ItemTemplate],
    ) -> LoadResult<Roster> {
        let specs: Vec<CharacterSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character roster RON: {}", e))?;

        let skills: HashMap<SkillId, &SkillTemplate> = skills.iter().map(|s| (s.id, s)).collect();
        let items: HashMap<ItemId, &ItemTemplate> = items.iter().map(|i| (i.id, i)).collect();

        let mut roster = Roster::default();
        for spec in specs {
            if roster.get(&spec.id).is_some() {
                anyhow::bail!("duplicate character id '{}'", spec.id);
            }

            let mut template = CharacterTemplate::new(spec.name, spec.stats);
            for skill_id in &spec.skills {
                let skill = skills.get(skill_id).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Failed to resolve skill {} for character '{}': unknown skill",
                        skill_id,
                        spec.id
                    )
                })?;
                template.skills.push((*skill).clone());
            }
            for item_id in &spec.items {
                let item = items.get(item_id).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Failed to resolve item {} for character '{}': unknown item",
                        item_id,
                        spec.id
                    )
                })?;
                template.starting_items.push((*item).clone());
            }

            roster.entries.push((spec.id, template));
        }

        tracing::debug!("loaded {} characters", roster.len());
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<SkillTemplate> {
        vec![SkillTemplate::damage(1, "Strike", 10, 10, 1.0)]
    }

    #[test]
    fn resolves_skill_references() {
        let roster = CharacterLoader::parse(
            r#"[(id: "hero", name: "Hero", stats: (max_health: 100.0), skills: [SkillId(1)])]"#,
            &catalog(),
            &[],
        )
        .expect("roster parses");
        let hero = roster.require("hero").expect("hero present");
        assert_eq!(hero.skills.len(), 1);
        assert_eq!(hero.stats.max_health, 100.0);
        assert!(roster.require("villain").is_err());
    }

    #[test]
    fn unknown_skill_is_an_error() {
        let err = CharacterLoader::parse(
            r#"[(id: "hero", name: "Hero", stats: (max_health: 50.0), skills: [SkillId(9)])]"#,
            &catalog(),
            &[],
        )
        .expect_err("skill 9 is missing");
        assert!(err.to_string().contains("skill#9"));
    }
}
