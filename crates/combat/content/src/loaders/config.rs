//! Balance table loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CombatConfig`] from TOML files.
///
/// Keys missing from the table keep their default values.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))?;

        if config.armor_constant <= 0.0
            || config.evasion_speed_constant <= 0.0
            || config.grit_constant <= 0.0
        {
            anyhow::bail!("balance constants for armor, evasion and grit must be positive");
        }
        if config.wound_bleed_threshold == 0 {
            anyhow::bail!("wound_bleed_threshold must be at least 1");
        }
        Ok(config)
    }
}
