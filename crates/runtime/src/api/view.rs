//! Owned snapshots handed to action providers.
//!
//! Providers may run on other tasks, so they get a copy of what the player can
//! see instead of a borrow of the engine.
use combat_core::{
    CombatEngine, Combatant, Rejection, SkillId, SkillTemplate, StatusEffectKind,
};

#[derive(Clone, Debug, PartialEq)]
pub struct CombatantView {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub energy: i32,
    pub max_energy: i32,
    /// Active effects with their remaining duration and stacks.
    pub effects: Vec<(StatusEffectKind, i32, u32)>,
}

impl CombatantView {
    pub fn capture(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name().to_owned(),
            health: combatant.health(),
            max_health: combatant.max_health(),
            energy: combatant.energy(),
            max_energy: combatant.max_energy(),
            effects: combatant
                .effects()
                .iter()
                .map(|e| (e.kind, e.duration, e.stacks))
                .collect(),
        }
    }
}

/// One entry of the player's skill bar.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillChoice {
    pub id: SkillId,
    pub name: String,
    pub energy_cost: i32,
    pub cooldown_remaining: u32,
    /// Why the skill cannot be used right now, if anything.
    pub blocked_by: Option<Rejection>,
}

impl SkillChoice {
    fn capture(owner: &Combatant, skill: &SkillTemplate) -> Self {
        Self {
            id: skill.id,
            name: skill.name.clone(),
            energy_cost: owner.effective_cost(skill),
            cooldown_remaining: owner.cooldowns().remaining(skill.id),
            blocked_by: owner.can_use(skill).err(),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.blocked_by.is_none()
    }
}

/// Everything a provider needs to pick the player's action.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnView {
    pub round: u32,
    pub player: CombatantView,
    pub enemy: CombatantView,
    pub skills: Vec<SkillChoice>,
}

impl TurnView {
    pub fn capture(engine: &CombatEngine) -> Self {
        let player = engine.player();
        Self {
            round: engine.round(),
            player: CombatantView::capture(player),
            enemy: CombatantView::capture(engine.enemy()),
            skills: player
                .skills()
                .iter()
                .map(|skill| SkillChoice::capture(player, skill))
                .collect(),
        }
    }

    /// Skills that would be accepted right now.
    pub fn usable(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.skills.iter().filter(|s| s.is_usable()).map(|s| s.id)
    }
}
