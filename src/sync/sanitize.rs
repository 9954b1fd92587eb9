//! The sanitization pipeline: one external entity (or a prior record) in, one
//! complete calculation-ready record out.
//!
//! This is the single translation boundary between the client's partial,
//! generation-quirky shapes and the canonical record. Every field has a
//! default; nothing in here errors on missing data. Sanitizing an
//! already-sanitized record is a fixed point.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::calc::stats::{Nature, StatTable};
use crate::data::normalize_id;
use crate::data::species::{species_data, SpeciesData};
use crate::data::types::parse_type_list;
use crate::format::{detect_gen, legacy_gen};
use crate::host::{HostPokemon, VolatileArg};
use crate::sync::record::{CalcPokemon, CalcTag, PokemonStatus, TransformedStats};

/// Abilities with an on/off battle effect the calc has to model both ways.
static TOGGLE_ABILITY_IDS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Flash Fire",
        "Minus",
        "Multiscale",
        "Plus",
        "Shadow Shield",
        "Slow Start",
        "Stakeout",
        "Unburden",
    ]
    .iter()
    .map(|name| normalize_id(name))
    .collect()
});

/// Input to one sanitization pass.
#[derive(Clone, Copy, Debug)]
pub enum SanitizeSource<'a> {
    /// A live entity from the client.
    Host(&'a HostPokemon),
    /// A previously-sanitized record; re-sanitization is a no-op fixed point
    /// modulo re-derived dex data.
    Record(&'a CalcPokemon),
    /// No entity at all: yields blank defaults.
    Empty,
}

/// Sanitizes one entity into a complete record.
pub fn sanitize_pokemon(
    source: SanitizeSource<'_>,
    format: &str,
    show_all_formes: bool,
) -> CalcPokemon {
    let mut out = match source {
        SanitizeSource::Host(pokemon) => draft_from_host(pokemon),
        SanitizeSource::Record(record) => record.clone(),
        SanitizeSource::Empty => blank_draft(),
    };
    apply_invariants(&mut out, format);
    enrich_from_dex(&mut out, format, show_all_formes);
    finalize(&mut out);
    out
}

/// Sanitizes a fresh host observation while carrying forward the user-owned
/// state of the prior record for the same combatant (overrides, genetics,
/// flags, and the identity tag). This is the per-notification update path.
pub fn sync_pokemon(
    prior: Option<&CalcPokemon>,
    pokemon: &HostPokemon,
    format: &str,
    show_all_formes: bool,
) -> CalcPokemon {
    let mut out = draft_from_host(pokemon);
    if let Some(prior) = prior {
        carry_user_state(&mut out, prior);
    }
    apply_invariants(&mut out, format);
    enrich_from_dex(&mut out, format, show_all_formes);
    finalize(&mut out);
    out
}

/// The client leaves `speciesForme` blank on some reveal events; the details
/// string always leads with the forme. Wildcard markers are stripped either
/// way.
fn detect_species_forme(pokemon: &HostPokemon) -> String {
    let forme = if !pokemon.species_forme.is_empty() {
        pokemon.species_forme.clone()
    } else {
        pokemon
            .details
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    };
    forme.replace("-*", "")
}

/// Keeps only volatiles with primitive arguments. The `transform` volatile
/// references a live pokemon object as its argument; the forme it names is
/// captured separately and the object itself must never be retained.
fn sanitize_volatiles(pokemon: &HostPokemon) -> BTreeMap<String, Option<String>> {
    pokemon
        .volatiles
        .iter()
        .filter_map(|(id, volatile)| match &volatile.arg {
            Some(VolatileArg::Pokemon(_)) => None,
            Some(VolatileArg::Text(text)) => Some((id.clone(), Some(text.clone()))),
            None => Some((id.clone(), None)),
        })
        .collect()
}

fn draft_from_host(pokemon: &HostPokemon) -> CalcPokemon {
    let transformed_forme = pokemon.volatile("transform").and_then(|v| match &v.arg {
        Some(VolatileArg::Text(forme)) if !forme.is_empty() => Some(forme.clone()),
        Some(VolatileArg::Pokemon(target)) if !target.species_forme.is_empty() => {
            Some(target.species_forme.clone())
        }
        _ => None,
    });

    let types = pokemon
        .volatile_text("typechange")
        .map(parse_type_list)
        .unwrap_or_default();

    let strip_placeholder = |value: &str| {
        let value = value.trim();
        (!value.is_empty() && value != "(exists)").then(|| value.to_string())
    };

    CalcPokemon {
        tag: pokemon.tag.clone(),
        slot: pokemon.slot,
        ident: pokemon.ident.clone(),
        name: pokemon.name.clone(),
        details: pokemon.details.clone(),
        search_id: pokemon.search_id.clone(),

        species_forme: detect_species_forme(pokemon),
        transformed_forme,

        level: pokemon.level,
        gender: pokemon.gender,
        shiny: pokemon.shiny,
        types,

        hp: pokemon.hp,
        max_hp: pokemon.maxhp.max(1),
        fainted: pokemon.fainted.unwrap_or(pokemon.hp == 0),
        status: PokemonStatus::from_id(&pokemon.status),
        sleep_turns: pokemon.status_state.sleep_turns,
        toxic_turns: pokemon.status_state.toxic_turns,

        ability: strip_placeholder(&pokemon.ability),
        base_ability: strip_placeholder(&pokemon.base_ability)
            .filter(|a| normalize_id(a) != "noability"),
        item: strip_placeholder(&pokemon.item),
        item_effect: strip_placeholder(&pokemon.item_effect),
        prev_item: strip_placeholder(&pokemon.prev_item),
        prev_item_effect: strip_placeholder(&pokemon.prev_item_effect),

        ivs: StatTable::max_ivs(),
        evs: Some(StatTable::default()),
        nature: None,

        boosts: crate::sync::record::Boosts {
            atk: pokemon.boosts.atk.unwrap_or(0),
            def: pokemon.boosts.def.unwrap_or(0),
            // gen 1 clients report one combined special stage; it maps onto
            // the spa slot when the split keys are absent
            spa: pokemon.boosts.spa.or(pokemon.boosts.spc).unwrap_or(0),
            spd: pokemon.boosts.spd.unwrap_or(0),
            spe: pokemon.boosts.spe.unwrap_or(0),
        },

        moves: pokemon.moves.clone(),
        last_move: (!pokemon.last_move.is_empty()).then(|| pokemon.last_move.clone()),
        move_track: pokemon.move_track.clone(),

        volatiles: sanitize_volatiles(pokemon),
        turn_statuses: pokemon.turnstatuses.clone(),

        ..Default::default()
    }
}

fn blank_draft() -> CalcPokemon {
    CalcPokemon {
        ivs: StatTable::max_ivs(),
        evs: Some(StatTable::default()),
        max_hp: 1,
        ..Default::default()
    }
}

/// Copies the user-owned, churn-surviving state of a prior record onto a
/// fresh host draft.
fn carry_user_state(out: &mut CalcPokemon, prior: &CalcPokemon) {
    if out.tag.is_none() {
        out.tag = prior.tag.clone();
    }
    if out.slot.is_none() {
        out.slot = prior.slot;
    }

    out.dirty_ability = prior.dirty_ability.clone();
    out.dirty_item = prior.dirty_item.clone();
    out.dirty_boosts = prior.dirty_boosts;
    out.dirty_base_stats = prior.dirty_base_stats;

    out.nature = prior.nature;
    out.ivs = prior.ivs;
    out.evs = prior.evs;

    out.alt_abilities = prior.alt_abilities.clone();
    out.alt_items = prior.alt_items.clone();
    out.alt_moves = prior.alt_moves.clone();

    out.move_overrides = prior.move_overrides.clone();
    out.use_z = prior.use_z;
    out.use_max = prior.use_max;
    out.critical_hit = prior.critical_hit;

    out.server_sourced = prior.server_sourced;
    out.server_moves = prior.server_moves.clone();
    out.server_stats = prior.server_stats;
}

/// Enforces the record invariants that do not need dex data: wildcard
/// stripping, fainted/status coupling, and legacy-generation gating.
fn apply_invariants(out: &mut CalcPokemon, format: &str) {
    let gen = detect_gen(format);
    let legacy = legacy_gen(gen);

    out.species_forme = out.species_forme.replace("-*", "");

    if out.hp == 0 {
        out.fainted = true;
    }
    // a fainted combatant cannot hold a status for calculation purposes
    if out.fainted {
        out.status = None;
        out.sleep_turns = 0;
        out.toxic_turns = 0;
    }

    if legacy {
        out.nature = None;
        out.evs = None;
        out.ability = None;
        out.dirty_ability = None;
        out.abilities.clear();
        out.alt_abilities.clear();
        out.transformed_abilities.clear();
        out.use_z = false;
        out.use_max = false;
        if gen == 1 {
            out.item = None;
            out.dirty_item = None;
            out.alt_items.clear();
        }
    } else {
        if out.nature.is_none() {
            out.nature = Some(Nature::Hardy);
        }
        if out.evs.is_none() {
            out.evs = Some(StatTable::default());
        }
    }
}

fn base_species_of(species: &'static SpeciesData) -> Option<&'static SpeciesData> {
    species_data(species.base_species)
}

/// Resolves every dex-derived field, keyed on the resolved forme rather than
/// the base species (per-forme stat differences are real).
fn enrich_from_dex(out: &mut CalcPokemon, format: &str, show_all_formes: bool) {
    let legacy = legacy_gen(detect_gen(format));

    let Some(species) = species_data(&out.species_forme) else {
        return;
    };

    out.species_forme = species.name.to_string();
    out.base_stats = Some((&species.base_stats).into());
    out.dmaxable = !species.cannot_dynamax;

    let base_species = base_species_of(species);
    let transformed_species = out.transformed_forme.as_deref().and_then(species_data);
    let transformed_base_species = transformed_species.and_then(base_species_of);

    if let Some(transformed) = transformed_species {
        out.transformed_forme = Some(transformed.name.to_string());
        // Transform copies everything except base HP
        out.transformed_base_stats = Some(TransformedStats {
            atk: transformed.base_stats.atk,
            def: transformed.base_stats.def,
            spa: transformed.base_stats.spa,
            spd: transformed.base_stats.spd,
            spe: transformed.base_stats.spe,
        });
    } else {
        out.transformed_forme = None;
        out.transformed_base_stats = None;
    }

    out.alt_formes = alt_formes_for(
        out.transformed_forme.as_deref(),
        transformed_base_species,
        &out.species_forme,
        base_species,
        show_all_formes,
    );

    // regional variants without standard battle availability never surface
    out.alt_formes.retain(|forme| !forme.contains("-Hisui"));

    if out.dmaxable && species.can_gigantamax {
        out.alt_formes = if out.alt_formes.is_empty() {
            vec![out.species_forme.clone(), format!("{}-Gmax", out.species_forme)]
        } else {
            out.alt_formes
                .iter()
                .flat_map(|forme| {
                    let eligible = species_data(forme).map(|s| s.can_gigantamax).unwrap_or(false);
                    let mut formes = vec![forme.clone()];
                    if eligible {
                        formes.push(format!("{forme}-Gmax"));
                    }
                    formes
                })
                .collect()
        };
    }

    // a typechange volatile owns the type list; otherwise the dex does
    if !out.volatiles.contains_key("typechange") {
        let source = transformed_species.unwrap_or(species);
        if !source.types.is_empty() {
            out.types = source.types.to_vec();
        }
    }

    if legacy {
        return;
    }

    for ability in species.abilities {
        if !out.abilities.iter().any(|a| a == ability) {
            out.abilities.push((*ability).to_string());
        }
    }
    out.transformed_abilities = transformed_species
        .map(|s| s.abilities.iter().map(|a| (*a).to_string()).collect())
        .unwrap_or_default();

    // auto-select the first legal candidate when nothing is set, or when the
    // user override is illegal for the (possibly transformed) forme
    let candidates: Vec<&str> = if !out.transformed_abilities.is_empty() {
        out.transformed_abilities.iter().map(String::as_str).collect()
    } else {
        out.alt_abilities
            .iter()
            .chain(out.abilities.iter())
            .map(String::as_str)
            .collect()
    };

    let dirty_is_illegal = out
        .dirty_ability
        .as_deref()
        .is_some_and(|dirty| !candidates.contains(&dirty));

    if out.ability.is_none() || dirty_is_illegal {
        out.dirty_ability = candidates.first().map(|a| (*a).to_string());
    }
}

fn alt_formes_for(
    transformed_forme: Option<&str>,
    transformed_base_species: Option<&'static SpeciesData>,
    species_forme: &str,
    base_species: Option<&'static SpeciesData>,
    show_all_formes: bool,
) -> Vec<String> {
    let enumerate = |base: &'static SpeciesData, current: &str| -> Option<Vec<String>> {
        if base.other_formes.is_empty() {
            return None;
        }
        let applies = base.name == current
            || (show_all_formes && base.other_formes.iter().any(|f| *f == current));
        applies.then(|| {
            std::iter::once(base.name.to_string())
                .chain(base.other_formes.iter().map(|f| (*f).to_string()))
                .collect()
        })
    };

    if let (Some(base), Some(forme)) = (transformed_base_species, transformed_forme) {
        if let Some(formes) = enumerate(base, forme) {
            return formes;
        }
    }
    if let Some(base) = base_species {
        if let Some(formes) = enumerate(base, species_forme) {
            return formes;
        }
    }
    Vec::new()
}

/// Toggle detection runs last: it depends on the fully-resolved ability,
/// item, HP and volatile set.
fn finalize(out: &mut CalcPokemon) {
    out.revealed_moves = out
        .move_track
        .iter()
        .map(|(name, _)| name.clone())
        .fold(Vec::new(), |mut acc, name| {
            if !acc.contains(&name) {
                acc.push(name);
            }
            acc
        });

    out.ability_toggleable = toggleable_ability(out);
    out.ability_toggled = out.ability_toggleable && detect_toggled_ability(out);

    if out.tag.is_none() && !(out.ident.is_empty() && out.species_forme.is_empty()) {
        out.tag = Some(CalcTag::mint(
            &out.ident,
            &out.details,
            &out.species_forme,
            out.level,
            out.gender,
            out.slot,
        ));
    }
}

/// Whether the resolved ability has an on/off battle effect at all.
pub fn toggleable_ability(pokemon: &CalcPokemon) -> bool {
    pokemon
        .effective_ability()
        .map(|ability| TOGGLE_ABILITY_IDS.iter().any(|id| *id == normalize_id(ability)))
        .unwrap_or(false)
}

/// Whether that effect is currently active.
pub fn detect_toggled_ability(pokemon: &CalcPokemon) -> bool {
    let Some(ability) = pokemon.effective_ability() else {
        return false;
    };
    match normalize_id(ability).as_str() {
        "flashfire" => pokemon.volatiles.contains_key("flashfire"),
        "slowstart" => pokemon.volatiles.contains_key("slowstart"),
        // HP-conditional shields count as active only at full health
        "multiscale" | "shadowshield" => pokemon.hp > 0 && pokemon.hp == pokemon.max_hp,
        "unburden" => pokemon.effective_item().is_none() && pokemon.prev_item.is_some(),
        _ => false,
    }
}
