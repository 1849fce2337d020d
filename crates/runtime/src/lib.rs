//! Async session runtime for the combat engine.
//!
//! The rules in `combat-core` never wait and never ask anyone for input. This
//! crate supplies both:
//! - [`session`] drives an engine to completion, honouring pacing hints
//! - [`api`] exposes the action provider abstraction and its implementations
//! - [`events`] provides the topic-based event bus sessions publish on
//! - [`config`] holds the environment-driven session settings
pub mod api;
pub mod config;
pub mod events;
pub mod session;

pub use api::{
    ActionProvider, ChannelHandle, ChannelProvider, CombatantView, PassActionProvider,
    RandomProvider, Result, RuntimeError, ScriptedProvider, SkillChoice, TurnView,
};
pub use config::RuntimeConfig;
pub use events::{Event, EventBus, Topic};
pub use session::CombatSession;
