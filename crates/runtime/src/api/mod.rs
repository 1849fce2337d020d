//! Public runtime API surface.
//!
//! Gathers the types exposed to consumers so the session module can stay
//! focused on orchestration.

pub mod errors;
pub mod providers;
pub mod view;

pub use errors::{Result, RuntimeError};
pub use providers::{
    ActionProvider, ChannelHandle, ChannelProvider, PassActionProvider, RandomProvider,
    ScriptedProvider,
};
pub use view::{CombatantView, SkillChoice, TurnView};
