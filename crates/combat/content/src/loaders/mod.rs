//! Content loaders for reading combat data from files.

pub mod characters;
pub mod config;
pub mod factory;
pub mod items;
pub mod skills;

pub use characters::{CharacterLoader, CharacterSpec, Roster};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
