//! Phase implementations.

use super::ai;
use super::state::{Advance, CombatState, Outcome, Pacing, Phase, Side, TurnAction};
use super::CombatEngine;
use crate::error::Rejection;
use crate::event::{CombatEvent, SkipCause};
use crate::status::{EffectTraits, StatusEffectKind};

impl CombatEngine {
    pub(super) fn setup(&mut self) -> Advance {
        tracing::info!("{} vs {}", self.player.name(), self.enemy.name());
        for combatant in [&self.player, &self.enemy] {
            self.events.push(CombatEvent::HealthChanged {
                combatant: combatant.id(),
                current: combatant.health(),
                max: combatant.max_health(),
            });
            self.events.push(CombatEvent::EnergyChanged {
                combatant: combatant.id(),
                current: combatant.energy(),
                max: combatant.max_energy(),
            });
        }
        self.begin_turn(Side::Player);
        Advance::Continue(Pacing::Setup)
    }

    fn begin_turn(&mut self, side: Side) {
        if side == Side::Player {
            self.round += 1;
        }
        self.set_state(side.turn_state());
        self.phase = Phase::Opening(side);
    }

    /// Start-of-turn upkeep, or the whole turn when the side cannot act.
    pub(super) fn open_turn(&mut self, side: Side) -> Advance {
        let (actor, _, mut ctx) = self.split(side);

        let skip = actor
            .effects()
            .iter()
            .find(|e| e.kind.has_trait(EffectTraits::SKIPS_TURN))
            .map(|e| match e.kind {
                StatusEffectKind::Freeze => SkipCause::Frozen,
                _ => SkipCause::Stunned,
            });
        if let Some(cause) = skip {
            tracing::info!("{} is {} and skips the turn", actor.name(), cause);
            ctx.emit(CombatEvent::TurnSkipped {
                combatant: actor.id(),
                cause,
            });
            actor.tick_end_of_turn(&mut ctx);
            self.begin_turn(side.other());
            return Advance::Continue(Pacing::Action);
        }

        actor.tick_start_of_turn_cleansing(&mut ctx);
        if let Some(finished) = self.check_terminal(side) {
            return finished;
        }

        let (actor, _, mut ctx) = self.split(side);
        actor.process_dots_and_hots(&mut ctx);
        if let Some(finished) = self.check_terminal(side) {
            return finished;
        }

        let (actor, _, mut ctx) = self.split(side);
        actor.tick_cooldowns(&mut ctx);
        actor.regenerate_energy(&mut ctx);

        match side {
            Side::Player => {
                self.phase = Phase::AwaitingInput;
                Advance::AwaitingInput
            }
            Side::Enemy => {
                let action = ai::choose_action(&self.enemy, &mut self.rng);
                self.set_state(CombatState::Processing);
                self.phase = Phase::Action(Side::Enemy, action);
                Advance::Continue(Pacing::Brief)
            }
        }
    }

    pub(super) fn resolve_action(&mut self, side: Side, action: TurnAction) -> Advance {
        let (actor, opponent, mut ctx) = self.split(side);
        match action {
            TurnAction::UseSkill(id) => {
                let skill = actor.skill(id).cloned();
                let result = match skill {
                    Some(skill) => actor.use_skill(&skill, opponent, &mut ctx),
                    None => Err(Rejection::UnknownSkill(id)),
                };
                if let Err(reason) = result {
                    ctx.emit(CombatEvent::ActionRejected {
                        combatant: actor.id(),
                        reason,
                    });
                }
            }
            TurnAction::Pass => {
                tracing::info!("{} passes", actor.name());
                ctx.emit(CombatEvent::Passed {
                    combatant: actor.id(),
                });
            }
        }

        if let Some(finished) = self.check_terminal(side) {
            return finished;
        }
        self.phase = Phase::Closing(side);
        Advance::Continue(Pacing::Action)
    }

    pub(super) fn close_turn(&mut self, side: Side) -> Advance {
        let (actor, _, mut ctx) = self.split(side);
        actor.tick_end_of_turn(&mut ctx);
        self.begin_turn(side.other());
        Advance::Continue(Pacing::Brief)
    }

    /// Ends the fight when either side is down.
    ///
    /// The acting side's opponent is checked first, so a blow that also kills
    /// the attacker still counts as a win for the attacker.
    fn check_terminal(&mut self, acting: Side) -> Option<Advance> {
        let (actor, opponent) = match acting {
            Side::Player => (&self.player, &self.enemy),
            Side::Enemy => (&self.enemy, &self.player),
        };
        let winner = if !opponent.is_alive() {
            acting
        } else if !actor.is_alive() {
            acting.other()
        } else {
            return None;
        };

        let (state, outcome) = match winner {
            Side::Player => (CombatState::Won, Outcome::Victory),
            Side::Enemy => (CombatState::Lost, Outcome::Defeat),
        };
        self.set_state(state);
        self.phase = Phase::Finished(outcome);
        tracing::info!("combat finished: {}", outcome);
        Some(Advance::Finished(outcome))
    }
}
