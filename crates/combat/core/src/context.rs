//! Resolution context threaded through every rule.

use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::event::{CombatEvent, CombatEvents};

/// Everything a rule needs besides the combatants themselves.
///
/// Borrowed from the engine for the duration of one phase so the combatants
/// can be borrowed mutably alongside it.
pub struct ResolveContext<'a> {
    pub rng: &'a mut CombatRng,
    pub events: &'a mut CombatEvents,
    pub config: &'a CombatConfig,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        rng: &'a mut CombatRng,
        events: &'a mut CombatEvents,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            rng,
            events,
            config,
        }
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }
}
