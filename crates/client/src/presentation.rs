//! Turns bus events into log lines on stdout.
use std::collections::HashMap;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use combat_core::{CharacterTemplate, CombatEvent, CombatantId, SkillId};
use combat_runtime::{Event, EventBus, Topic};

/// Display names for combatants and skills.
#[derive(Clone, Debug, Default)]
pub struct Names {
    combatants: HashMap<CombatantId, String>,
    skills: HashMap<SkillId, String>,
}

impl Names {
    pub fn new(player: &CharacterTemplate, enemy: &CharacterTemplate) -> Self {
        let mut names = Self::default();
        for (id, template) in [(CombatantId::PLAYER, player), (CombatantId::ENEMY, enemy)] {
            names.combatants.insert(id, template.name.clone());
            for skill in &template.skills {
                names.skills.insert(skill.id, skill.name.clone());
            }
        }
        names
    }

    fn who(&self, id: CombatantId) -> String {
        self.combatants
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    fn skill(&self, id: SkillId) -> String {
        self.skills
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// One line for the narrative log, or `None` for pure UI refreshes.
    pub fn describe(&self, event: &CombatEvent) -> Option<String> {
        let line = match event {
            CombatEvent::HealthChanged { .. }
            | CombatEvent::EnergyChanged { .. }
            | CombatEvent::StatusEffectsChanged { .. }
            | CombatEvent::CooldownsChanged { .. } => return None,
            CombatEvent::InventoryChanged {
                combatant,
                equipped,
            } => format!("{} now wears {} item(s)", self.who(*combatant), equipped.len()),
            CombatEvent::SkillUsed {
                caster,
                skill,
                energy_spent,
            } => format!(
                "{} uses {} ({} energy)",
                self.who(*caster),
                self.skill(*skill),
                energy_spent
            ),
            CombatEvent::AttackMissed {
                attacker,
                defender,
                reason,
            } => format!(
                "{} misses {}: {}",
                self.who(*attacker),
                self.who(*defender),
                reason
            ),
            CombatEvent::DamageTaken {
                combatant,
                amount,
                true_damage,
            } => {
                let kind = if *true_damage { " true" } else { "" };
                format!("{} takes {}{} damage", self.who(*combatant), amount, kind)
            }
            CombatEvent::Healed { combatant, amount } => {
                format!("{} recovers {} health", self.who(*combatant), amount)
            }
            CombatEvent::EffectApplied {
                combatant,
                kind,
                stacks,
            } if *stacks > 1 => format!("{} gains {} x{}", self.who(*combatant), kind, stacks),
            CombatEvent::EffectApplied {
                combatant, kind, ..
            } => format!("{} gains {}", self.who(*combatant), kind),
            CombatEvent::EffectResisted { combatant, kind } => {
                format!("{} resists {}", self.who(*combatant), kind)
            }
            CombatEvent::EffectBlocked { combatant, kind } => {
                format!("{}'s ward blocks {}", self.who(*combatant), kind)
            }
            CombatEvent::EffectRemoved { combatant, kind } => {
                format!("{} is no longer affected by {}", self.who(*combatant), kind)
            }
            CombatEvent::BleedTriggered { combatant } => {
                format!("{}'s wounds burst open", self.who(*combatant))
            }
            CombatEvent::Died { combatant } => format!("{} falls", self.who(*combatant)),
            CombatEvent::TurnSkipped { combatant, cause } => {
                format!("{} is {} and loses the turn", self.who(*combatant), cause)
            }
            CombatEvent::Passed { combatant } => format!("{} passes", self.who(*combatant)),
            CombatEvent::ActionRejected { combatant, reason } => {
                format!("{} cannot do that: {}", self.who(*combatant), reason)
            }
            CombatEvent::StateChanged { to, .. } => format!("-- {} --", to),
        };
        Some(line)
    }
}

/// Prints every event, in publish order, until the session reports its outcome.
pub fn spawn_log(bus: &EventBus, names: Names) -> JoinHandle<()> {
    let events = bus.subscribe(Topic::All);
    tokio::spawn(follow(events, names, |line| println!("{}", line)))
}

async fn follow(
    mut events: broadcast::Receiver<Event>,
    names: Names,
    mut write: impl FnMut(String),
) {
    loop {
        match events.recv().await {
            Ok(Event::Finished { outcome, rounds }) => {
                write(format!("== {} after {} round(s) ==", outcome, rounds));
                break;
            }
            Ok(event) => {
                if let Some(line) = render(&event, &names) {
                    write(line);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("log fell behind, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn render(event: &Event, names: &Names) -> Option<String> {
    match event {
        Event::Combat { event, .. } => names.describe(event),
        Event::AwaitingInput { round } => Some(format!("[round {}] your move", round)),
        Event::Finished { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{BaseStats, CombatState, Outcome};

    #[tokio::test]
    async fn log_lines_follow_publish_order() {
        let bus = EventBus::with_capacity(16);
        let events = bus.subscribe(Topic::All);
        let hero = CharacterTemplate::new("Hero", BaseStats::default());
        let husk = CharacterTemplate::new("Husk", BaseStats::default());

        let combat = |event| Event::Combat { round: 1, event };
        bus.publish(combat(CombatEvent::StateChanged {
            from: CombatState::PlayerTurn,
            to: CombatState::Processing,
        }));
        bus.publish(combat(CombatEvent::DamageTaken {
            combatant: CombatantId::ENEMY,
            amount: 12,
            true_damage: false,
        }));
        bus.publish(combat(CombatEvent::StateChanged {
            from: CombatState::Processing,
            to: CombatState::EnemyTurn,
        }));
        bus.publish(Event::AwaitingInput { round: 2 });
        bus.publish(combat(CombatEvent::Died {
            combatant: CombatantId::ENEMY,
        }));
        bus.publish(Event::Finished {
            outcome: Outcome::Victory,
            rounds: 2,
        });

        let mut lines = Vec::new();
        follow(events, Names::new(&hero, &husk), |line| lines.push(line)).await;
        assert_eq!(
            lines,
            [
                format!("-- {} --", CombatState::Processing),
                "Husk takes 12 damage".to_owned(),
                format!("-- {} --", CombatState::EnemyTurn),
                "[round 2] your move".to_owned(),
                "Husk falls".to_owned(),
                format!("== {} after 2 round(s) ==", Outcome::Victory),
            ]
        );
    }
}
