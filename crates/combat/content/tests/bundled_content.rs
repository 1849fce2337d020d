use std::fs;

use combat_content::{ContentFactory, SkillLoader};
use combat_core::{CombatConfig, CombatantId, Combatant, StatKind, StatusEffectKind};

#[test]
fn bundled_catalogs_load_and_resolve() {
    let factory = ContentFactory::bundled();

    let skills = factory.load_skills().expect("skills load");
    assert!(skills.iter().any(|s| {
        s.status
            .as_ref()
            .is_some_and(|st| st.kind == StatusEffectKind::Freeze)
    }));

    let roster = factory.load_roster().expect("roster loads");
    for id in ["knight", "warlock", "ratling", "frost_wraith"] {
        let template = roster.require(id).expect("bundled character present");
        assert!(!template.skills.is_empty(), "{id} has skills");
    }

    let knight = Combatant::new(
        CombatantId::PLAYER,
        roster.require("knight").expect("knight"),
    );
    // Iron Greaves and Heartstone Amulet are worn from the start.
    assert_eq!(knight.stat(StatKind::Armor), 50.0);
    assert_eq!(knight.health(), 154);
}

#[test]
fn bundled_balance_matches_defaults() {
    let config = ContentFactory::bundled().load_config().expect("balance loads");
    assert_eq!(config, CombatConfig::default());
}

#[test]
fn missing_balance_table_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = ContentFactory::new(dir.path())
        .load_config()
        .expect("defaults");
    assert_eq!(config, CombatConfig::default());
}

#[test]
fn unknown_item_reference_fails_the_roster() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("skills.ron"), "(skills: [])").expect("write skills");
    fs::write(dir.path().join("items.ron"), "(items: [])").expect("write items");
    fs::write(
        dir.path().join("characters.ron"),
        r#"[(id: "ghost", name: "Ghost", stats: (max_health: 10.0), skills: [], items: [ItemId(4)])]"#,
    )
    .expect("write roster");

    let err = ContentFactory::new(dir.path())
        .load_roster()
        .expect_err("item 4 does not exist");
    assert!(err.to_string().contains("item#4"));
}

#[test]
fn stat_effects_without_a_stat_are_rejected() {
    let catalog = r#"(skills: [(
        id: SkillId(1),
        name: "Broken",
        energy_cost: 0,
        target: Enemy,
        effect: Damage(base: 1, might_ratio: 0.0),
        status: Some((kind: StatUp, duration: 2, classification: Buff)),
    )])"#;
    assert!(SkillLoader::parse(catalog).is_err());
}
