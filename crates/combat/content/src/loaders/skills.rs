//! Skill catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{SkillTemplate, StatusEffectKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillTemplate>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a catalog: ids are unique and stat effects name
    /// their stat.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillTemplate>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for skill in &catalog.skills {
            if !seen.insert(skill.id) {
                anyhow::bail!("duplicate skill id {} ('{}')", skill.id, skill.name);
            }
            if skill.energy_cost < 0 {
                anyhow::bail!("skill '{}' has a negative energy cost", skill.name);
            }
            if let Some(status) = &skill.status {
                let needs_stat = matches!(
                    status.kind,
                    StatusEffectKind::StatUp | StatusEffectKind::StatDown
                );
                if needs_stat && status.stat_change.is_none() {
                    anyhow::bail!(
                        "skill '{}' applies {} without a stat_change",
                        skill.name,
                        status.kind
                    );
                }
            }
        }

        tracing::debug!("loaded {} skills", catalog.skills.len());
        Ok(catalog.skills)
    }
}
