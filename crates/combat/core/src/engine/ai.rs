//! Enemy action selection.

use super::state::TurnAction;
use crate::combatant::Combatant;
use crate::env::{CombatRng, RollContext};

/// Picks uniformly among the skills `actor` can use right now, or passes.
pub fn choose_action(actor: &Combatant, rng: &mut CombatRng) -> TurnAction {
    let usable: Vec<_> = actor
        .skills()
        .iter()
        .filter(|skill| actor.can_use(skill).is_ok())
        .map(|skill| skill.id)
        .collect();

    if usable.is_empty() {
        tracing::debug!("{} has no usable skill", actor.name());
        return TurnAction::Pass;
    }
    let picked = usable[rng.index(actor.id(), RollContext::AiChoice, usable.len())];
    TurnAction::UseSkill(picked)
}
