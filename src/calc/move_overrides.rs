//! Default move metadata and user-override diffing.
//!
//! Defaults are derived on demand and never baked into stored records, so a
//! change to the derivation is honored without migrating stored state.

use serde::{Deserialize, Serialize};

use crate::calc::crit::always_critical_hits;
use crate::calc::hidden_power::hidden_power_power;
use crate::calc::stats::Stat;
use crate::data::moves::{move_data, MoveCategory};
use crate::data::normalize_id;
use crate::data::types::Type;
use crate::sync::record::CalcPokemon;

/// How a damaging move reads the defender's side of the damage formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefensiveStat {
    Def,
    Spd,
    /// Defensive boosts are ignored outright (Sacred Sword and kin).
    Ignore,
}

/// Sparse user-stored override for one move slot. Absent keys mean "use the
/// derived default", not "override to nothing".
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveOverride {
    pub move_type: Option<Type>,
    pub category: Option<MoveCategory>,
    pub base_power: Option<u16>,
    pub z_base_power: Option<u16>,
    pub max_base_power: Option<u16>,
    pub always_critical_hits: Option<bool>,
    pub offensive_stat: Option<Stat>,
    pub defensive_stat: Option<DefensiveStat>,
}

/// Fully-derived default values for one move on one combatant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveOverrideDefaults {
    pub move_type: Type,
    pub category: MoveCategory,
    pub base_power: u16,
    pub z_base_power: Option<u16>,
    pub max_base_power: Option<u16>,
    pub always_critical_hits: bool,
    /// `None` for non-damaging moves.
    pub offensive_stat: Option<Stat>,
    /// `None` for non-damaging moves.
    pub defensive_stat: Option<DefensiveStat>,
}

/// Unusual offensive/defensive stat pairings dictated by move targeting.
fn unusual_pairing(move_id: &str) -> (Option<Stat>, Option<DefensiveStat>) {
    match move_id {
        // special moves resolved against the target's physical Defense
        "psyshock" | "psystrike" | "secretsword" => (None, Some(DefensiveStat::Def)),
        // attacks with the user's own Defense
        "bodypress" => (Some(Stat::Def), None),
        // ignores the target's defensive boosts
        "sacredsword" | "darkestlariat" | "chipaway" => (None, Some(DefensiveStat::Ignore)),
        _ => (None, None),
    }
}

/// Derives the default override values for `move_name`, or `None` when the
/// move is unresolvable (no forme on the record, unknown move, empty format).
pub fn move_override_defaults(
    pokemon: &CalcPokemon,
    move_name: &str,
    format: &str,
) -> Option<MoveOverrideDefaults> {
    if pokemon.species_forme.is_empty() || move_name.is_empty() || format.is_empty() {
        return None;
    }

    let move_id = normalize_id(move_name);
    let data = move_data(move_name)?;

    // Hidden Power's dex entry is a placeholder; the real power comes from
    // the holder's IVs.
    let base_power = if move_id.starts_with("hiddenpower") {
        hidden_power_power(format, &pokemon.ivs)
    } else {
        data.base_power
    };

    let (default_offensive, default_defensive) = match data.category {
        MoveCategory::Physical => (Some(Stat::Atk), Some(DefensiveStat::Def)),
        MoveCategory::Special => (Some(Stat::Spa), Some(DefensiveStat::Spd)),
        MoveCategory::Status => (None, None),
    };
    let (offensive_override, defensive_override) = unusual_pairing(move_id.as_str());

    Some(MoveOverrideDefaults {
        move_type: data.move_type,
        category: data.category,
        base_power,
        z_base_power: data.z_base_power,
        max_base_power: data.max_base_power,
        always_critical_hits: always_critical_hits(move_name),
        offensive_stat: offensive_override.or(default_offensive),
        defensive_stat: defensive_override.or(default_defensive),
    })
}

/// The effective override values for one move: the derived defaults with the
/// record's stored deltas layered on top at read time. Defaults are never
/// baked into stored state, so a later change to the derivation is honored
/// without migrating records.
pub fn resolve_move_override(
    pokemon: &CalcPokemon,
    move_name: &str,
    format: &str,
) -> Option<MoveOverrideDefaults> {
    let mut resolved = move_override_defaults(pokemon, move_name, format)?;
    let Some(stored) = pokemon.move_overrides.get(move_name) else {
        return Some(resolved);
    };

    if let Some(value) = stored.move_type {
        resolved.move_type = value;
    }
    if let Some(value) = stored.category {
        resolved.category = value;
    }
    if let Some(value) = stored.base_power {
        resolved.base_power = value;
    }
    if let Some(value) = stored.z_base_power {
        resolved.z_base_power = Some(value);
    }
    if let Some(value) = stored.max_base_power {
        resolved.max_base_power = Some(value);
    }
    if let Some(value) = stored.always_critical_hits {
        resolved.always_critical_hits = value;
    }
    if let Some(value) = stored.offensive_stat {
        resolved.offensive_stat = Some(value);
    }
    if let Some(value) = stored.defensive_stat {
        resolved.defensive_stat = Some(value);
    }
    Some(resolved)
}

/// Whether the record's stored override for `move_name` differs from the
/// derived defaults. Only keys present in the stored override are compared;
/// an absent key is never a difference.
pub fn has_move_overrides(pokemon: &CalcPokemon, move_name: &str, format: &str) -> bool {
    if pokemon.species_forme.is_empty() || move_name.is_empty() || format.is_empty() {
        return false;
    }

    let Some(stored) = pokemon.move_overrides.get(move_name) else {
        return false;
    };
    let Some(defaults) = move_override_defaults(pokemon, move_name, format) else {
        return false;
    };

    stored.move_type.is_some_and(|v| v != defaults.move_type)
        || stored.category.is_some_and(|v| v != defaults.category)
        || stored.base_power.is_some_and(|v| v != defaults.base_power)
        || stored.z_base_power.is_some_and(|v| Some(v) != defaults.z_base_power)
        || stored.max_base_power.is_some_and(|v| Some(v) != defaults.max_base_power)
        || stored
            .always_critical_hits
            .is_some_and(|v| v != defaults.always_critical_hits)
        || stored.offensive_stat.is_some_and(|v| Some(v) != defaults.offensive_stat)
        || stored.defensive_stat.is_some_and(|v| Some(v) != defaults.defensive_stat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::stats::StatTable;

    fn keldeo() -> CalcPokemon {
        CalcPokemon {
            species_forme: "Keldeo".into(),
            ivs: StatTable::max_ivs(),
            ..Default::default()
        }
    }

    #[test]
    fn category_drives_default_pairing() {
        let defaults = move_override_defaults(&keldeo(), "Hydro Pump", "gen8ou")
            .expect("known move should resolve");
        assert_eq!(defaults.offensive_stat, Some(Stat::Spa));
        assert_eq!(defaults.defensive_stat, Some(DefensiveStat::Spd));

        let defaults = move_override_defaults(&keldeo(), "Close Combat", "gen8ou")
            .expect("known move should resolve");
        assert_eq!(defaults.offensive_stat, Some(Stat::Atk));
        assert_eq!(defaults.defensive_stat, Some(DefensiveStat::Def));
    }

    #[test]
    fn unusual_targeting_overrides_the_pairing() {
        let defaults = move_override_defaults(&keldeo(), "Secret Sword", "gen8ou")
            .expect("known move should resolve");
        assert_eq!(defaults.offensive_stat, Some(Stat::Spa));
        assert_eq!(defaults.defensive_stat, Some(DefensiveStat::Def));

        let defaults = move_override_defaults(&keldeo(), "Body Press", "gen8ou")
            .expect("known move should resolve");
        assert_eq!(defaults.offensive_stat, Some(Stat::Def));
    }

    #[test]
    fn status_moves_pair_with_nothing() {
        let defaults = move_override_defaults(&keldeo(), "Swords Dance", "gen8ou")
            .expect("known move should resolve");
        assert_eq!(defaults.offensive_stat, None);
        assert_eq!(defaults.defensive_stat, None);
        assert_eq!(defaults.base_power, 0);
    }

    #[test]
    fn hidden_power_is_computed_not_looked_up() {
        let defaults = move_override_defaults(&keldeo(), "Hidden Power", "gen4ou")
            .expect("known move should resolve");
        assert_eq!(defaults.base_power, 70);
        let defaults = move_override_defaults(&keldeo(), "Hidden Power", "gen8ou")
            .expect("known move should resolve");
        assert_eq!(defaults.base_power, 60);
    }

    #[test]
    fn unresolvable_inputs_yield_none() {
        assert!(move_override_defaults(&keldeo(), "notamove", "gen8ou").is_none());
        assert!(move_override_defaults(&keldeo(), "Hydro Pump", "").is_none());
        let blank = CalcPokemon::default();
        assert!(move_override_defaults(&blank, "Hydro Pump", "gen8ou").is_none());
    }

    #[test]
    fn override_diffing_compares_only_present_keys() {
        let mut pokemon = keldeo();
        assert!(!has_move_overrides(&pokemon, "Hydro Pump", "gen8ou"));

        // a stored override equal to the default is not a difference
        pokemon.move_overrides.insert(
            "Hydro Pump".into(),
            MoveOverride { base_power: Some(110), ..Default::default() },
        );
        assert!(!has_move_overrides(&pokemon, "Hydro Pump", "gen8ou"));

        // changing the one stored key is
        pokemon
            .move_overrides
            .get_mut("Hydro Pump")
            .expect("override present")
            .base_power = Some(95);
        assert!(has_move_overrides(&pokemon, "Hydro Pump", "gen8ou"));
    }

    #[test]
    fn stored_deltas_layer_onto_defaults_at_read_time() {
        let mut pokemon = keldeo();
        pokemon.move_overrides.insert(
            "Hydro Pump".into(),
            MoveOverride {
                base_power: Some(95),
                defensive_stat: Some(DefensiveStat::Def),
                ..Default::default()
            },
        );
        let resolved = resolve_move_override(&pokemon, "Hydro Pump", "gen8ou")
            .expect("known move should resolve");
        assert_eq!(resolved.base_power, 95);
        assert_eq!(resolved.defensive_stat, Some(DefensiveStat::Def));
        // everything not overridden keeps its derived default
        assert_eq!(resolved.offensive_stat, Some(Stat::Spa));
        assert_eq!(resolved.z_base_power, Some(185));
    }
}
