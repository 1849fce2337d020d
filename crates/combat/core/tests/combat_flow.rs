use combat_core::{
    Advance, BaseStats, CharacterTemplate, CombatConfig, CombatEngine, CombatEvent, CombatRng,
    CombatState, Combatant, CombatantId, FixedRng, Outcome, Pacing, SkillId, SkillTemplate,
    StatusApplication, StatusEffect, StatusEffectKind,
};

fn stats(health: f32, energy: f32) -> BaseStats {
    BaseStats {
        max_health: health,
        energy,
        energy_regen: 0.0,
        might: 10.0,
        intelligence: 10.0,
        ..BaseStats::default()
    }
}

fn hero() -> CharacterTemplate {
    CharacterTemplate::new("Hero", stats(100.0, 100.0))
        .with_skill(SkillTemplate::damage(1, "Strike", 10, 10, 1.0))
        .with_skill(
            SkillTemplate::damage(2, "Concuss", 20, 0, 0.0)
                .with_status(StatusApplication::new(StatusEffectKind::Stun, 1)),
        )
}

/// An enemy that can never afford its only skill.
fn broke_enemy() -> CharacterTemplate {
    CharacterTemplate::new("Husk", stats(100.0, 0.0))
        .with_skill(SkillTemplate::damage(10, "Bite", 5, 5, 0.0))
}

fn engine(player: CharacterTemplate, enemy: CharacterTemplate) -> CombatEngine {
    CombatEngine::new(
        &player,
        &enemy,
        CombatConfig::default(),
        CombatRng::fixed(FixedRng::HIGH),
    )
}

#[test]
fn broke_enemy_passes_and_hands_the_turn_back() {
    let mut engine = engine(hero(), broke_enemy());
    engine.run_until_input();
    engine.skip_turn().expect("skip accepted");
    engine.drain_events();

    assert_eq!(engine.run_until_input(), Advance::AwaitingInput);
    assert_eq!(engine.state(), CombatState::PlayerTurn);
    assert_eq!(engine.round(), 2);

    let events = engine.drain_events();
    let passed = events
        .iter()
        .position(|e| {
            matches!(e, CombatEvent::Passed { combatant } if *combatant == CombatantId::ENEMY)
        })
        .expect("enemy passed");
    let back_to_player = events
        .iter()
        .position(|e| {
            matches!(
                e,
                CombatEvent::StateChanged {
                    to: CombatState::PlayerTurn,
                    ..
                }
            )
        })
        .expect("player turn resumed");
    assert!(passed < back_to_player);
    assert_eq!(engine.player().health(), 100);
}

#[test]
fn enemy_turn_paces_like_a_player_turn() {
    let mut engine = engine(hero(), broke_enemy());
    engine.run_until_input();
    engine.skip_turn().expect("skip accepted");

    let mut hints = Vec::new();
    loop {
        match engine.advance() {
            Advance::Continue(pacing) => hints.push(pacing),
            other => {
                assert_eq!(other, Advance::AwaitingInput);
                break;
            }
        }
    }
    assert_eq!(
        hints,
        [
            Pacing::Action,
            Pacing::Brief,
            Pacing::Brief,
            Pacing::Action,
            Pacing::Brief,
        ]
    );
}

#[test]
fn rejected_selection_keeps_the_turn_open() {
    let mut engine = engine(hero(), broke_enemy());
    engine.run_until_input();

    assert!(engine.select_skill(SkillId(99)).is_err());
    assert_eq!(engine.state(), CombatState::PlayerTurn);
    assert!(engine.is_awaiting_input());
    assert!(engine.drain_events().iter().any(|e| matches!(
        e,
        CombatEvent::ActionRejected { .. }
    )));

    assert!(engine.select_skill(SkillId(1)).is_ok());
}

#[test]
fn stunned_enemy_loses_exactly_one_turn() {
    let enemy = CharacterTemplate::new("Brute", stats(200.0, 100.0))
        .with_skill(SkillTemplate::damage(10, "Club", 10, 20, 0.0));
    let mut engine = engine(hero(), enemy);
    engine.run_until_input();
    engine.select_skill(SkillId(2)).expect("concuss accepted");
    engine.drain_events();

    engine.run_until_input();
    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::TurnSkipped { combatant, .. } if *combatant == CombatantId::ENEMY
    )));
    assert!(!engine.enemy().has_effect(StatusEffectKind::Stun));
    assert_eq!(engine.player().health(), 100);

    // Next enemy turn acts normally.
    engine.skip_turn().expect("skip accepted");
    engine.run_until_input();
    assert_eq!(engine.player().health(), 80);
}

#[test]
fn poison_tick_can_lose_the_fight_before_input() {
    let mut player = Combatant::new(CombatantId::PLAYER, &hero());
    let enemy = Combatant::new(CombatantId::ENEMY, &broke_enemy());
    let mut rng = CombatRng::fixed(FixedRng::HIGH);
    let mut events = combat_core::CombatEvents::new();
    let config = CombatConfig::default();
    {
        let mut ctx = combat_core::ResolveContext::new(&mut rng, &mut events, &config);
        player.take_true_damage(90, &mut ctx);
        player.apply_effect(
            StatusEffect::of(StatusEffectKind::Poison, 3).with_tick_value(20),
            None,
            &mut ctx,
        );
    }

    let mut engine = CombatEngine::from_combatants(player, enemy, config, rng);
    assert_eq!(engine.run_until_input(), Advance::Finished(Outcome::Defeat));
    assert_eq!(engine.state(), CombatState::Lost);
    assert_eq!(engine.player().health(), 0);

    let deaths = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, CombatEvent::Died { .. }))
        .count();
    assert_eq!(deaths, 1);
    assert!(engine.select_skill(SkillId(1)).is_err());
}

#[test]
fn same_seed_replays_the_same_fight() {
    fn play(seed: u64) -> Vec<CombatEvent> {
        let enemy = CharacterTemplate::new("Duelist", stats(60.0, 100.0))
            .with_skill(SkillTemplate::damage(10, "Jab", 10, 5, 0.5))
            .with_skill(SkillTemplate::damage(11, "Cut", 20, 10, 1.0));
        let mut engine = CombatEngine::new(
            &hero(),
            &enemy,
            CombatConfig::default(),
            CombatRng::new(seed),
        );
        let mut log = Vec::new();
        for _ in 0..20 {
            match engine.run_until_input() {
                Advance::AwaitingInput => {
                    if engine.select_skill(SkillId(1)).is_err() {
                        engine.skip_turn().expect("skip is always allowed");
                    }
                }
                _ => break,
            }
            log.extend(engine.drain_events());
        }
        log.extend(engine.drain_events());
        log
    }

    assert_eq!(play(7), play(7));
}
