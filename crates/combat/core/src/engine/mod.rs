//! Turn state machine.
//!
//! [`CombatEngine`] owns both combatants and sequences a fight as discrete
//! phases. Each call to [`CombatEngine::advance`] runs exactly one phase and
//! returns a [`Pacing`] hint; the engine itself never sleeps, so a driver may
//! honour the hints for animation or ignore them entirely.
//!
//! ```text
//! START ─setup─▶ PLAYERTURN ─select_skill/skip_turn─▶ PROCESSING ─▶ ENEMYTURN
//!                    ▲                                                 │
//!                    └──────────────── AI action (PROCESSING) ◀────────┘
//!                 any terminal check ─▶ WON | LOST (absorbing)
//! ```
//!
//! Player submissions flip the state to `PROCESSING` synchronously, before the
//! action resolves on the next `advance`, so a duplicate submission in between
//! is rejected.

pub mod ai;
mod state;
mod turn;

pub use state::{Advance, CombatState, Outcome, Pacing, Side, TurnAction};

use state::Phase;

use crate::combatant::{CharacterTemplate, Combatant, CombatantId, ItemTemplate};
use crate::config::CombatConfig;
use crate::context::ResolveContext;
use crate::env::CombatRng;
use crate::error::Rejection;
use crate::event::{CombatEvent, CombatEvents};
use crate::skill::SkillId;
use crate::stats::ItemId;

pub struct CombatEngine {
    player: Combatant,
    enemy: Combatant,
    state: CombatState,
    phase: Phase,
    rng: CombatRng,
    config: CombatConfig,
    events: CombatEvents,
    round: u32,
}

impl CombatEngine {
    pub fn new(
        player: &CharacterTemplate,
        enemy: &CharacterTemplate,
        config: CombatConfig,
        rng: CombatRng,
    ) -> Self {
        Self::from_combatants(
            Combatant::new(CombatantId::PLAYER, player),
            Combatant::new(CombatantId::ENEMY, enemy),
            config,
            rng,
        )
    }

    /// Starts from combatants that may already carry effects or damage.
    pub fn from_combatants(
        player: Combatant,
        enemy: Combatant,
        config: CombatConfig,
        rng: CombatRng,
    ) -> Self {
        Self {
            player,
            enemy,
            state: CombatState::Start,
            phase: Phase::Setup,
            rng,
            config,
            events: CombatEvents::new(),
            round: 0,
        }
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Number of player turns started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.phase == Phase::AwaitingInput
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Takes every notification produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }

    /// Runs the next phase.
    pub fn advance(&mut self) -> Advance {
        match self.phase {
            Phase::Setup => self.setup(),
            Phase::Opening(side) => self.open_turn(side),
            Phase::AwaitingInput => Advance::AwaitingInput,
            Phase::Action(side, action) => self.resolve_action(side, action),
            Phase::Closing(side) => self.close_turn(side),
            Phase::Finished(outcome) => Advance::Finished(outcome),
        }
    }

    /// Advances until the player must act or the fight is over.
    pub fn run_until_input(&mut self) -> Advance {
        loop {
            match self.advance() {
                Advance::Continue(_) => continue,
                other => return other,
            }
        }
    }

    /// Submits a skill for the player.
    ///
    /// On success the state is already `PROCESSING`; the skill resolves on the
    /// next [`advance`](Self::advance). A rejection leaves the turn open.
    pub fn select_skill(&mut self, skill: SkillId) -> Result<(), Rejection> {
        let result = self.check_player_input().and_then(|()| {
            let template = self
                .player
                .skill(skill)
                .ok_or(Rejection::UnknownSkill(skill))?;
            self.player.can_use(template)
        });
        self.submit(result, TurnAction::UseSkill(skill))
    }

    /// Ends the player's turn without acting.
    pub fn skip_turn(&mut self) -> Result<(), Rejection> {
        let result = self.check_player_input();
        self.submit(result, TurnAction::Pass)
    }

    fn check_player_input(&self) -> Result<(), Rejection> {
        if self.state != CombatState::PlayerTurn {
            return Err(Rejection::WrongState(self.state));
        }
        if self.phase != Phase::AwaitingInput {
            return Err(Rejection::NotAwaitingInput);
        }
        Ok(())
    }

    fn submit(&mut self, check: Result<(), Rejection>, action: TurnAction) -> Result<(), Rejection> {
        if let Err(reason) = check {
            tracing::debug!("player action rejected: {}", reason);
            self.events.push(CombatEvent::ActionRejected {
                combatant: CombatantId::PLAYER,
                reason: reason.clone(),
            });
            return Err(reason);
        }
        self.set_state(CombatState::Processing);
        self.phase = Phase::Action(Side::Player, action);
        Ok(())
    }

    /// Equips an item on one side. Refused once the fight is decided.
    pub fn equip(&mut self, side: Side, item: ItemTemplate) -> Result<bool, Rejection> {
        self.ensure_not_terminal()?;
        let (combatant, events) = match side {
            Side::Player => (&mut self.player, &mut self.events),
            Side::Enemy => (&mut self.enemy, &mut self.events),
        };
        Ok(combatant.equip(item, events))
    }

    pub fn unequip(&mut self, side: Side, item: ItemId) -> Result<Option<ItemTemplate>, Rejection> {
        self.ensure_not_terminal()?;
        let (combatant, events) = match side {
            Side::Player => (&mut self.player, &mut self.events),
            Side::Enemy => (&mut self.enemy, &mut self.events),
        };
        Ok(combatant.unequip(item, events))
    }

    fn ensure_not_terminal(&self) -> Result<(), Rejection> {
        if self.state.is_terminal() {
            return Err(Rejection::WrongState(self.state));
        }
        Ok(())
    }

    fn set_state(&mut self, to: CombatState) {
        let from = self.state;
        if from == to {
            return;
        }
        tracing::info!("combat state {} -> {}", from, to);
        self.state = to;
        self.events.push(CombatEvent::StateChanged { from, to });
    }

    /// Acting side, its opponent and a resolution context, borrowed together.
    fn split(&mut self, side: Side) -> (&mut Combatant, &mut Combatant, ResolveContext<'_>) {
        let ctx = ResolveContext::new(&mut self.rng, &mut self.events, &self.config);
        match side {
            Side::Player => (&mut self.player, &mut self.enemy, ctx),
            Side::Enemy => (&mut self.enemy, &mut self.player, ctx),
        }
    }
}
