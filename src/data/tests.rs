use super::moves::{max_move, move_data, z_move, MoveCategory, MOVES};
use super::species::{species_data, POKEDEX};
use super::types::{parse_type_list, Type};
use super::{normalize_id, pokemon_learnset};

#[test]
fn charizard_stats() {
    let charizard = POKEDEX
        .get("charizard")
        .expect("Charizard should exist in the Pokedex");
    assert_eq!(charizard.base_stats.hp, 78);
    assert_eq!(charizard.base_stats.atk, 84);
    assert_eq!(charizard.types, &[Type::Fire, Type::Flying]);
    assert_eq!(charizard.other_formes, &["Charizard-Mega-X", "Charizard-Mega-Y"]);
    assert!(charizard.can_gigantamax);
}

#[test]
fn mega_formes_are_battle_only() {
    let mega = species_data("Charizard-Mega-X").expect("mega forme should exist");
    assert_eq!(mega.base_species, "Charizard");
    assert_eq!(mega.battle_only, Some("Charizard"));
    assert!(mega.cannot_dynamax);
}

#[test]
fn species_lookup_normalizes_ids() {
    for name in ["Urshifu-Rapid-Strike", "urshifurapidstrike", "URSHIFU rapid strike"] {
        assert!(species_data(name).is_some(), "lookup failed for {name}");
    }
    assert!(species_data("notapokemon").is_none());
}

#[test]
fn thunderbolt_metadata() {
    let thunderbolt = MOVES.get("thunderbolt").expect("Thunderbolt must be present");
    assert_eq!(thunderbolt.base_power, 90);
    assert_eq!(thunderbolt.category, MoveCategory::Special);
    assert_eq!(thunderbolt.z_base_power, Some(175));
    assert_eq!(thunderbolt.max_base_power, Some(130));
}

#[test]
fn guaranteed_crit_moves_are_flagged() {
    for id in ["frostbreath", "stormthrow", "wickedblow", "surgingstrikes"] {
        let data = MOVES.get(id).unwrap_or_else(|| panic!("{id} missing"));
        assert!(data.will_crit, "{id} should always crit");
    }
    assert!(!MOVES.get("thunderbolt").expect("present").will_crit);
}

#[test]
fn z_move_requires_matching_crystal() {
    assert_eq!(z_move("Thunderbolt", Some("Electrium Z")), Some("Gigavolt Havoc"));
    assert_eq!(z_move("Thunderbolt", Some("Firium Z")), None);
    assert_eq!(z_move("Thunderbolt", None), None);
    assert_eq!(z_move("Swords Dance", Some("Normalium Z")), None);
}

#[test]
fn max_move_conversions() {
    assert_eq!(max_move("Close Combat"), Some("Max Knuckle"));
    assert_eq!(max_move("Swords Dance"), Some("Max Guard"));
    assert_eq!(max_move("notamove"), None);
}

#[test]
fn learnsets_walk_prevolution_chain() {
    let weavile = pokemon_learnset("gen8ou", "Weavile");
    assert!(weavile.contains(&"Knock Off"));
    // inherited from Sneasel, which Weavile's own entry lacks
    assert!(weavile.contains(&"Icicle Crash"));
}

#[test]
fn learnsets_filter_by_generation() {
    let gen1 = pokemon_learnset("gen1ou", "Pikachu");
    assert!(gen1.contains(&"Thunderbolt"));
    assert!(!gen1.contains(&"Hidden Power"));
    assert!(pokemon_learnset("gen8ou", "notapokemon").is_empty());
}

#[test]
fn move_lookup_normalizes_ids() {
    assert!(move_data("U-turn").is_some());
    assert_eq!(normalize_id("Will-O-Wisp"), "willowisp");
}

#[test]
fn type_lists_parse_from_client_strings() {
    assert_eq!(parse_type_list("Ghost/Fairy"), vec![Type::Ghost, Type::Fairy]);
    assert_eq!(parse_type_list("???"), Vec::<Type>::new());
}
