//! Async driver for a single fight.
//!
//! [`CombatSession`] owns the engine, republishes everything it emits on the
//! [`EventBus`], sleeps according to the engine's pacing hints and asks an
//! [`ActionProvider`] whenever the player has to choose.

use tokio::task::JoinHandle;

use combat_core::{
    Advance, CharacterTemplate, CombatConfig, CombatEngine, CombatRng, Outcome, Rejection,
    TurnAction,
};

use crate::api::{ActionProvider, Result, RuntimeError, TurnView};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus};

pub struct CombatSession {
    engine: CombatEngine,
    bus: EventBus,
    config: RuntimeConfig,
    rejections: u32,
    outcome: Option<Outcome>,
}

impl CombatSession {
    pub fn new(engine: CombatEngine, bus: EventBus, config: RuntimeConfig) -> Self {
        Self {
            engine,
            bus,
            config,
            rejections: 0,
            outcome: None,
        }
    }

    /// Builds the engine from templates, seeding it from `config`.
    pub fn from_templates(
        player: &CharacterTemplate,
        enemy: &CharacterTemplate,
        rules: CombatConfig,
        config: RuntimeConfig,
    ) -> Self {
        let seed = config.session_seed();
        tracing::info!("session seed {}", seed);
        let engine = CombatEngine::new(player, enemy, rules, CombatRng::new(seed));
        let bus = EventBus::with_capacity(config.bus_capacity);
        Self::new(engine, bus, config)
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Runs one engine phase, or collects one player decision.
    ///
    /// Returns the outcome once the fight is over.
    pub async fn step(&mut self, provider: &dyn ActionProvider) -> Result<Option<Outcome>> {
        if let Some(outcome) = self.outcome {
            return Ok(Some(outcome));
        }

        let advance = self.engine.advance();
        self.flush();

        match advance {
            Advance::Continue(pacing) => {
                let pause = self.config.pause_for(pacing);
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
                Ok(None)
            }
            Advance::AwaitingInput => {
                self.bus.publish(Event::AwaitingInput {
                    round: self.engine.round(),
                });
                let view = TurnView::capture(&self.engine);
                let action = provider.provide_action(view).await?;
                self.submit(action)?;
                Ok(None)
            }
            Advance::Finished(outcome) => {
                self.outcome = Some(outcome);
                self.bus.publish(Event::Finished {
                    outcome,
                    rounds: self.engine.round(),
                });
                Ok(Some(outcome))
            }
        }
    }

    /// Drives the fight to its end.
    pub async fn run(&mut self, provider: &dyn ActionProvider) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.step(provider).await? {
                return Ok(outcome);
            }
        }
    }

    /// Runs the whole fight on a background task.
    pub fn spawn<P>(mut self, provider: P) -> JoinHandle<Result<(Outcome, Self)>>
    where
        P: ActionProvider + 'static,
    {
        tokio::spawn(async move {
            let outcome = self.run(&provider).await?;
            Ok((outcome, self))
        })
    }

    fn submit(&mut self, action: TurnAction) -> Result<()> {
        let result = match action {
            TurnAction::UseSkill(skill) => self.engine.select_skill(skill),
            TurnAction::Pass => self.engine.skip_turn(),
        };
        self.flush();

        match result {
            Ok(()) => {
                self.rejections = 0;
                Ok(())
            }
            Err(reason) => self.note_rejection(reason),
        }
    }

    fn note_rejection(&mut self, reason: Rejection) -> Result<()> {
        self.rejections += 1;
        tracing::warn!(
            "player action rejected ({}/{}): {}",
            self.rejections,
            self.config.max_rejections,
            reason
        );
        if self.rejections >= self.config.max_rejections {
            return Err(RuntimeError::TooManyRejections {
                attempts: self.rejections,
                last: reason,
            });
        }
        Ok(())
    }

    fn flush(&mut self) {
        let round = self.engine.round();
        for event in self.engine.drain_events() {
            self.bus.publish(Event::Combat { round, event });
        }
    }
}
