//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, ItemTemplate, SkillTemplate};

use crate::loaders::{CharacterLoader, ConfigLoader, ItemLoader, LoadResult, Roster, SkillLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── balance.toml
/// ├── skills.ron
/// ├── items.ron
/// └── characters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the catalogs shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::BUNDLED_DATA_DIR)
    }

    /// Load balance constants from `balance.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("balance.toml");
        if !path.exists() {
            tracing::debug!("{} not found, using default balance", path.display());
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillTemplate>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemTemplate>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load `characters.ron`, resolving it against the skill and item catalogs.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        let skills = self.load_skills()?;
        let items = self.load_items()?;
        CharacterLoader::load(&self.data_dir.join("characters.ron"), &skills, &items)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_has_balance_but_no_roster() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        let err = factory.load_roster().unwrap_err();
        assert!(err.to_string().contains("skills.ron"), "{err}");
    }
}
