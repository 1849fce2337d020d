//! Stat Modifier Ledger.
//!
//! Each combatant owns one [`Stat`] per [`StatKind`]. A stat is a base value
//! plus an ordered list of [`StatModifier`]s, each tagged with the
//! [`ModifierSource`] that attached it (an equipped item or a live status
//! effect). Sources remove their own modifiers in one batch when they go
//! away.
//!
//! ## Calculation order
//!
//! `ceil((base + Σflat) * (1 + Σpercent))`

pub mod modifier;
pub mod sheet;
pub mod stat;

pub use modifier::{ItemId, ModKind, ModifierSource, StatModifier};
pub use sheet::{BaseStats, StatKind, StatSheet};
pub use stat::Stat;
