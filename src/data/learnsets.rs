//! Static learnset table.
//!
//! Entries use the client's teambuilder encoding: each move id maps to a
//! string of generation digits in which the move is legal for that species
//! (e.g. `"456789"` = gens 4 through 9). The table is keyed by base-forme id;
//! formes without their own entry resolve through their battle-only origin,
//! base species, or prevolution, in that order.

use phf::phf_map;

use crate::data::moves::move_data;
use crate::data::species::species_data;
use crate::data::normalize_id;
use crate::format::detect_gen;

type Learnset = &'static [(&'static str, &'static str)];

static LEARNSETS: phf::Map<&'static str, Learnset> = phf_map! {
    "pikachu" => &[
        ("tackle", "123456789"),
        ("thunderbolt", "123456789"),
        ("hiddenpower", "2345678"),
        ("protect", "23456789"),
    ],
    "charizard" => &[
        ("flamethrower", "123456789"),
        ("fireblast", "123456789"),
        ("airslash", "456789"),
        ("earthquake", "123456789"),
        ("hiddenpower", "2345678"),
        ("protect", "23456789"),
        ("swordsdance", "12346789"),
    ],
    "sneasel" => &[
        ("iciclecrash", "56789"),
        ("knockoff", "3456789"),
        ("protect", "23456789"),
    ],
    "weavile" => &[
        ("knockoff", "456789"),
        ("icebeam", "456789"),
        ("swordsdance", "456789"),
    ],
    "keldeo" => &[
        ("secretsword", "56789"),
        ("hydropump", "56789"),
        ("closecombat", "56789"),
        ("icywind", "56789"),
    ],
    "urshifu" => &[
        ("wickedblow", "89"),
        ("surgingstrikes", "89"),
        ("closecombat", "89"),
        ("uturn", "89"),
        ("protect", "89"),
    ],
    "mewtwo" => &[
        ("psychic", "123456789"),
        ("psystrike", "56789"),
        ("icebeam", "123456789"),
        ("recover", "123456789"),
    ],
};

fn gen_digit(gen: u8) -> char {
    (b'0' + gen.min(9)) as char
}

/// Legal moves for `species_forme` in the given format, resolved through the
/// battle-only/base-species/prevolution chain and filtered by generation.
/// Unknown species yield an empty list.
pub fn pokemon_learnset(format: &str, species_forme: &str) -> Vec<&'static str> {
    let gen = detect_gen(format);
    let digit = gen_digit(gen);

    let mut lookups: Vec<String> = Vec::new();
    let mut current = species_data(species_forme);

    while let Some(data) = current {
        let id = normalize_id(data.name);
        if LEARNSETS.contains_key(id.as_str()) && !lookups.contains(&id) {
            lookups.push(id);
        } else {
            let base_id = normalize_id(data.base_species);
            if LEARNSETS.contains_key(base_id.as_str()) && !lookups.contains(&base_id) {
                lookups.push(base_id);
            }
        }

        let next = data
            .battle_only
            .filter(|origin| normalize_id(origin) != normalize_id(data.name))
            .or(data.prevo);
        current = next.and_then(species_data);
    }

    let mut moves: Vec<&'static str> = lookups
        .iter()
        .filter_map(|id| LEARNSETS.get(id.as_str()))
        .flat_map(|set| set.iter())
        .filter(|(_, gens)| gens.contains(digit))
        .filter_map(|(id, _)| move_data(id).map(|m| m.name))
        .collect();

    moves.sort_unstable();
    moves.dedup();
    moves
}
