use pokemon_calc_core::engine::{CalcEngine, SyncOutcome};
use pokemon_calc_core::host::{HostBattle, HostPokemon, HostRequest, HostSide};

fn pokemon(side: &str, species: &str, nickname: &str) -> HostPokemon {
    HostPokemon {
        ident: format!("{side}: {nickname}"),
        details: format!("{species}, L100, M"),
        search_id: format!("{side}: {nickname}|{species}, L100, M"),
        species_forme: species.into(),
        level: 100,
        hp: 100,
        maxhp: 100,
        ..Default::default()
    }
}

fn battle() -> HostBattle {
    HostBattle {
        id: "battle-gen8ou-1001".into(),
        format_id: "gen8ou".into(),
        sides: vec![
            HostSide {
                id: "p1".into(),
                name: "trainer one".into(),
                pokemon: vec![
                    pokemon("p1", "Garchomp", "Chompy"),
                    pokemon("p1", "Charizard", "Blaze"),
                ],
            },
            HostSide {
                id: "p2".into(),
                name: "trainer two".into(),
                pokemon: vec![pokemon("p2", "Urshifu", "Fists")],
            },
        ],
        ..Default::default()
    }
}

#[test]
fn first_update_creates_tagged_records() {
    let mut engine = CalcEngine::new();
    let outcome = engine.apply_update(&battle(), None);
    assert!(matches!(outcome, SyncOutcome::Synced(_)));

    let records = engine.battle("battle-gen8ou-1001").expect("battle recorded");
    assert_eq!(records.sides.len(), 2);
    let p1 = records.side("p1").expect("side recorded");
    assert_eq!(p1.records.len(), 2);
    assert!(p1.records.iter().all(|r| r.tag.is_some()));
    // records are fully resolved, not raw copies
    assert!(p1.records[0].base_stats.is_some());
}

#[test]
fn unchanged_state_short_circuits() {
    let mut engine = CalcEngine::new();
    let b = battle();
    let first = engine.apply_update(&b, None);
    let SyncOutcome::Synced(nonce) = first else {
        panic!("first update should sync");
    };
    assert_eq!(engine.apply_update(&b, None), SyncOutcome::Unchanged(nonce));

    let mut changed = battle();
    changed.sides[0].pokemon[0].hp = 42;
    assert!(matches!(engine.apply_update(&changed, None), SyncOutcome::Synced(_)));
}

#[test]
fn tags_survive_object_churn() {
    let mut engine = CalcEngine::new();
    engine.apply_update(&battle(), None);
    let tag = engine
        .battle("battle-gen8ou-1001")
        .and_then(|r| r.side("p1"))
        .and_then(|s| s.by_slot(0))
        .and_then(|r| r.tag.clone())
        .expect("tag assigned on first sync");

    // the client rebuilt every object from scratch (switch-out churn): no
    // tags, fresh allocations, same ident/details
    let mut churned = battle();
    churned.sides[0].pokemon[0].hp = 61;
    let outcome = engine.apply_update(&churned, None);
    assert!(matches!(outcome, SyncOutcome::Synced(_)));

    let side = engine
        .battle("battle-gen8ou-1001")
        .and_then(|r| r.side("p1"))
        .expect("side recorded");
    assert_eq!(side.records.len(), 2, "churn must not duplicate records");
    let record = side.by_tag(&tag).expect("tag preserved across churn");
    assert_eq!(record.hp, 61);
}

#[test]
fn details_only_overlap_still_matches() {
    let mut engine = CalcEngine::new();
    engine.apply_update(&battle(), None);
    let tag = engine
        .battle("battle-gen8ou-1001")
        .and_then(|r| r.side("p2"))
        .and_then(|s| s.by_slot(0))
        .and_then(|r| r.tag.clone())
        .expect("tag assigned");

    // a reveal event reassigned the ident but kept the details string
    let mut churned = battle();
    churned.sides[1].pokemon[0].ident = "p2: Wushu".into();
    churned.sides[1].pokemon[0].search_id.clear();
    engine.apply_update(&churned, None);

    let side = engine
        .battle("battle-gen8ou-1001")
        .and_then(|r| r.side("p2"))
        .expect("side recorded");
    assert_eq!(side.records.len(), 1);
    assert_eq!(side.by_slot(0).and_then(|r| r.tag.clone()), Some(tag));
}

#[test]
fn replacement_slot_notification_matches_unconditionally() {
    let mut engine = CalcEngine::new();
    engine.apply_update(&battle(), None);
    let records = engine.battle("battle-gen8ou-1001").expect("battle recorded");
    let slot1_tag = records
        .side("p1")
        .and_then(|s| s.by_slot(1))
        .and_then(|r| r.tag.clone());

    // an Illusion reveal: the simulator says slot 1 is being replaced, even
    // though the incoming details would heuristically match slot 0
    let tag = engine.apply_pokemon_added(
        "battle-gen8ou-1001",
        "p1",
        "p1: Chompy",
        "Garchomp, L100, M",
        Some(1),
    );
    assert_eq!(tag, slot1_tag);

    // no prior record at all: the caller mints on the next sync
    let fresh = engine.apply_pokemon_added(
        "battle-gen8ou-1001",
        "p1",
        "p1: Newcomer",
        "Zoroark, L84, F",
        None,
    );
    assert_eq!(fresh, None);

    // missing battle id: discarded, nothing to return
    assert_eq!(engine.apply_pokemon_added("", "p1", "p1: X", "", None), None);
}

#[test]
fn request_overlays_only_its_own_side() {
    let mut engine = CalcEngine::new();
    let request: HostRequest = serde_json::from_str(
        r#"{
            "rqid": 2,
            "side": {
                "id": "p1",
                "name": "trainer one",
                "pokemon": [{
                    "ident": "p1: Chompy",
                    "details": "Garchomp, L100, M",
                    "condition": "357/357",
                    "active": true,
                    "stats": {"atk": 359, "def": 226, "spa": 176, "spd": 206, "spe": 303},
                    "moves": ["earthquake", "swordsdance", "protect", "uturn"],
                    "ability": "roughskin",
                    "baseAbility": "roughskin",
                    "item": "lifeorb"
                }]
            }
        }"#,
    )
    .expect("request should parse");

    engine.apply_update(&battle(), Some(&request));

    let records = engine.battle("battle-gen8ou-1001").expect("battle recorded");
    let garchomp = records
        .side("p1")
        .and_then(|s| s.by_slot(0))
        .expect("record present");
    assert!(garchomp.server_sourced);
    assert_eq!(garchomp.server_moves.len(), 4);
    assert_eq!(garchomp.ability.as_deref(), Some("roughskin"));
    let stats = garchomp.server_stats.expect("server stats recorded");
    assert_eq!(stats.atk, 359);
    assert_eq!(stats.hp, 357);

    let urshifu = records
        .side("p2")
        .and_then(|s| s.by_slot(0))
        .expect("record present");
    assert!(!urshifu.server_sourced);
    assert!(urshifu.server_moves.is_empty());
}

#[test]
fn teardown_is_the_only_record_deletion_path() {
    let mut engine = CalcEngine::new();
    engine.apply_update(&battle(), None);

    // churn never deletes: a side update missing a previously-seen pokemon
    // leaves its record orphaned but intact
    let mut shrunk = battle();
    shrunk.sides[0].pokemon.truncate(1);
    engine.apply_update(&shrunk, None);
    let p1 = engine
        .battle("battle-gen8ou-1001")
        .and_then(|r| r.side("p1"))
        .expect("side recorded");
    assert_eq!(p1.records.len(), 2);

    engine.destroy("battle-gen8ou-1001");
    assert!(engine.battle("battle-gen8ou-1001").is_none());
}
