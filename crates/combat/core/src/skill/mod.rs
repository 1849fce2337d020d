//! Skill templates and per-combatant cooldown tracking.
//!
//! Templates are read-only content. Resolution of a skill use lives on
//! [`crate::Combatant::use_skill`].

mod cooldown;
mod template;

pub use cooldown::Cooldowns;
pub use template::{
    Element, Rarity, SkillEffect, SkillId, SkillTemplate, StatusApplication, TargetKind,
};
