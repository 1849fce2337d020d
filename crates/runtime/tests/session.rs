use combat_content::ContentFactory;
use combat_core::{
    BaseStats, CharacterTemplate, CombatConfig, CombatEngine, CombatEvent, CombatRng, CombatState,
    CombatantId, FixedRng, Outcome, Rejection, SkillId, SkillTemplate, TurnAction,
};
use combat_runtime::{
    ChannelProvider, CombatSession, Event, EventBus, RandomProvider, RuntimeConfig, RuntimeError,
    ScriptedProvider, Topic,
};
use tokio::sync::broadcast;

fn stats(health: f32, energy: f32) -> BaseStats {
    BaseStats {
        max_health: health,
        energy,
        ..BaseStats::default()
    }
}

fn hero() -> CharacterTemplate {
    CharacterTemplate::new("Hero", stats(100.0, 100.0))
        .with_skill(SkillTemplate::damage(1, "Strike", 10, 30, 0.0))
}

/// Cannot afford its only skill, so it always passes.
fn dummy() -> CharacterTemplate {
    CharacterTemplate::new("Dummy", stats(50.0, 0.0))
        .with_skill(SkillTemplate::damage(10, "Bite", 5, 5, 0.0))
}

fn session(config: RuntimeConfig) -> CombatSession {
    let engine = CombatEngine::new(
        &hero(),
        &dummy(),
        CombatConfig::default(),
        CombatRng::fixed(FixedRng::HIGH),
    );
    CombatSession::new(engine, EventBus::with_capacity(1024), config)
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn scripted_session_runs_to_victory() {
    let mut session = session(RuntimeConfig::instant());
    let mut turn = session.bus().subscribe(Topic::Turn);
    let mut combat = session.bus().subscribe(Topic::Combat);

    let outcome = session
        .run(&ScriptedProvider::skills([1, 1]))
        .await
        .expect("session completes");

    assert_eq!(outcome, Outcome::Victory);
    assert_eq!(session.outcome(), Some(Outcome::Victory));
    assert_eq!(session.engine().state(), CombatState::Won);

    let turn_events = drain(&mut turn);
    let prompts = turn_events
        .iter()
        .filter(|e| matches!(e, Event::AwaitingInput { .. }))
        .count();
    assert_eq!(prompts, 2);
    assert_eq!(
        turn_events.last(),
        Some(&Event::Finished {
            outcome: Outcome::Victory,
            rounds: 2,
        })
    );
    assert!(turn_events.iter().all(|e| e.topic() == Topic::Turn));

    let combat_events = drain(&mut combat);
    let hits = combat_events
        .iter()
        .filter(|e| {
            matches!(
                e,
                Event::Combat {
                    event: CombatEvent::DamageTaken { combatant, .. },
                    ..
                } if *combatant == CombatantId::ENEMY
            )
        })
        .count();
    assert_eq!(hits, 2);
    assert!(combat_events.iter().any(|e| matches!(
        e,
        Event::Combat {
            event: CombatEvent::Died { .. },
            ..
        }
    )));
}

#[tokio::test]
async fn stepping_a_finished_session_is_idempotent() {
    let mut session = session(RuntimeConfig::instant());
    let provider = ScriptedProvider::skills([1, 1]);
    session.run(&provider).await.expect("session completes");

    let mut turn = session.bus().subscribe(Topic::Turn);
    assert_eq!(
        session.step(&provider).await.expect("no error"),
        Some(Outcome::Victory)
    );
    assert!(drain(&mut turn).is_empty());
}

#[tokio::test]
async fn repeated_rejections_abort_the_session() {
    let config = RuntimeConfig {
        max_rejections: 3,
        ..RuntimeConfig::instant()
    };
    let mut session = session(config);
    let provider = ScriptedProvider::new(std::iter::repeat_n(TurnAction::UseSkill(SkillId(99)), 5));

    let err = session.run(&provider).await.expect_err("gives up");
    assert!(matches!(
        err,
        RuntimeError::TooManyRejections {
            attempts: 3,
            last: Rejection::UnknownSkill(SkillId(99)),
        }
    ));
    assert_eq!(session.engine().state(), CombatState::PlayerTurn);
    assert_eq!(provider.remaining().await, 2);
}

#[tokio::test]
async fn spawned_session_takes_input_over_channels() {
    let (provider, mut handle) = ChannelProvider::new(1);
    let task = session(RuntimeConfig::instant()).spawn(provider);

    let mut prompts = 0;
    while let Some(view) = handle.views.recv().await {
        prompts += 1;
        assert_eq!(view.player.name, "Hero");
        let action = view
            .usable()
            .next()
            .map(TurnAction::UseSkill)
            .unwrap_or(TurnAction::Pass);
        handle.actions.send(action).await.expect("session listening");
    }

    let (outcome, session) = task.await.expect("join").expect("session completes");
    assert_eq!(outcome, Outcome::Victory);
    assert_eq!(prompts, 2);
    assert_eq!(session.engine().enemy().health(), 0);
}

#[tokio::test]
async fn bundled_fight_replays_from_its_seed() {
    async fn play(seed: u64) -> (Outcome, Vec<Event>) {
        let factory = ContentFactory::bundled();
        let roster = factory.load_roster().expect("bundled roster");
        let rules = factory.load_config().expect("bundled balance");
        let config = RuntimeConfig {
            bus_capacity: 16_384,
            ..RuntimeConfig::instant().with_seed(seed)
        };

        let mut session = CombatSession::from_templates(
            roster.require("knight").expect("knight"),
            roster.require("ratling").expect("ratling"),
            rules,
            config,
        );
        let mut combat = session.bus().subscribe(Topic::Combat);
        let provider = RandomProvider::new(seed);

        for _ in 0..10_000 {
            if let Some(outcome) = session.step(&provider).await.expect("no error") {
                return (outcome, drain(&mut combat));
            }
        }
        panic!("fight did not finish");
    }

    let first = play(2024).await;
    let second = play(2024).await;
    assert_eq!(first, second);
    assert!(!first.1.is_empty());
}
