//! Critical-hit determination.

use crate::data::moves::{max_move, move_data, z_move};
use crate::format::detect_gen;
use crate::sync::record::CalcPokemon;

/// Whether the move unconditionally crits (a dex fact, e.g. Frost Breath).
pub fn always_critical_hits(move_name: &str) -> bool {
    move_data(move_name).map(|m| m.will_crit).unwrap_or(false)
}

/// Whether a move should be treated as a guaranteed critical hit for this
/// combatant in this format.
///
/// An innately-critting move loses the property once it converts to a Z- or
/// Max-move variant (those carry their own mechanics, and only exist in the
/// gens that have them); a user-forced `critical_hit` flag on the record wins
/// unconditionally. Stored `move_overrides` are deliberately not consulted
/// here.
pub fn determine_critical_hit(pokemon: &CalcPokemon, move_name: &str, format: &str) -> bool {
    if pokemon.species_forme.is_empty() {
        return false;
    }

    let gen = detect_gen(format);
    let item = pokemon.effective_item();

    let z_converted = pokemon.use_z && gen >= 7 && z_move(move_name, item).is_some();
    let max_converted = pokemon.use_max && gen >= 8 && max_move(move_name).is_some();

    (always_critical_hits(move_name) && !z_converted && !max_converted) || pokemon.critical_hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urshifu() -> CalcPokemon {
        CalcPokemon {
            species_forme: "Urshifu".into(),
            moves: vec!["Wicked Blow".into()],
            ..Default::default()
        }
    }

    #[test]
    fn innate_crit_applies_by_default() {
        assert!(determine_critical_hit(&urshifu(), "Wicked Blow", "gen8ou"));
        assert!(!determine_critical_hit(&urshifu(), "Close Combat", "gen8ou"));
    }

    #[test]
    fn z_conversion_suppresses_innate_crit() {
        let mut pokemon = urshifu();
        pokemon.use_z = true;
        // no crystal held: the move stays un-converted and keeps its crit
        assert!(determine_critical_hit(&pokemon, "Wicked Blow", "gen7ou"));
        pokemon.dirty_item = Some("Darkinium Z".into());
        assert!(!determine_critical_hit(&pokemon, "Wicked Blow", "gen7ou"));
    }

    #[test]
    fn max_conversion_suppresses_innate_crit() {
        let mut pokemon = urshifu();
        pokemon.use_max = true;
        assert!(!determine_critical_hit(&pokemon, "Wicked Blow", "gen8ou"));
        // the flag is meaningless in a gen without Dynamax
        assert!(determine_critical_hit(&pokemon, "Wicked Blow", "gen7ou"));
    }

    #[test]
    fn forced_flag_wins_over_everything() {
        let mut pokemon = urshifu();
        pokemon.use_max = true;
        pokemon.critical_hit = true;
        assert!(determine_critical_hit(&pokemon, "Wicked Blow", "gen8ou"));
        assert!(determine_critical_hit(&pokemon, "Close Combat", "gen8ou"));
    }

    #[test]
    fn missing_forme_never_crits() {
        let mut pokemon = urshifu();
        pokemon.species_forme.clear();
        pokemon.critical_hit = true;
        assert!(!determine_critical_hit(&pokemon, "Wicked Blow", "gen8ou"));
    }
}
