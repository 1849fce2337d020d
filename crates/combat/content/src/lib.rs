//! Data-driven combat content.
//!
//! This crate loads the static records the rules engine consumes:
//! - Skill catalogs (RON)
//! - Item catalogs (RON)
//! - Character rosters referencing skills and items by id (RON)
//! - Balance tables overriding [`combat_core::CombatConfig`] (TOML)
//!
//! Content is read once at startup and handed to `combat-core` as immutable
//! templates; nothing here is mutated during a fight.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, CharacterSpec, ConfigLoader, ContentFactory, ItemLoader, LoadResult, Roster,
    SkillLoader,
};

/// Directory holding the catalogs shipped with this crate.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
