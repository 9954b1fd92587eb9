//! Static species table.
//!
//! A compact, read-only slice of the dex: enough formes to cover every
//! structural case the sanitizer has to handle (megas, Gigantamax, regional
//! variants, battle-only formes, cosmetic formes, prevolution chains).
//! Lookups for species outside this table answer `None`, which callers treat
//! as "unknown", never as an error.

use phf::phf_map;

use crate::data::types::Type;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct SpeciesData {
    pub name: &'static str,
    /// Base species this forme belongs to (equals `name` for base formes).
    pub base_species: &'static str,
    pub types: &'static [Type],
    pub base_stats: BaseStats,
    pub abilities: &'static [&'static str],
    /// Other formes declared on the base species entry only.
    pub other_formes: &'static [&'static str],
    pub can_gigantamax: bool,
    pub cannot_dynamax: bool,
    /// Forme only reachable in battle from the named forme (e.g. megas).
    pub battle_only: Option<&'static str>,
    pub prevo: Option<&'static str>,
}

const NO_FORMES: &[&str] = &[];

const fn species(
    name: &'static str,
    types: &'static [Type],
    base_stats: BaseStats,
    abilities: &'static [&'static str],
) -> SpeciesData {
    SpeciesData {
        name,
        base_species: name,
        types,
        base_stats,
        abilities,
        other_formes: NO_FORMES,
        can_gigantamax: false,
        cannot_dynamax: false,
        battle_only: None,
        prevo: None,
    }
}

const fn stats(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> BaseStats {
    BaseStats { hp, atk, def, spa, spd, spe }
}

pub static POKEDEX: phf::Map<&'static str, SpeciesData> = phf_map! {
    "pikachu" => species(
        "Pikachu",
        &[Type::Electric],
        stats(35, 55, 40, 50, 50, 90),
        &["Static", "Lightning Rod"],
    ),
    "ditto" => species(
        "Ditto",
        &[Type::Normal],
        stats(48, 48, 48, 48, 48, 48),
        &["Limber", "Imposter"],
    ),
    "charizard" => SpeciesData {
        other_formes: &["Charizard-Mega-X", "Charizard-Mega-Y"],
        can_gigantamax: true,
        ..species(
            "Charizard",
            &[Type::Fire, Type::Flying],
            stats(78, 84, 78, 109, 85, 100),
            &["Blaze", "Solar Power"],
        )
    },
    "charizardmegax" => SpeciesData {
        base_species: "Charizard",
        battle_only: Some("Charizard"),
        cannot_dynamax: true,
        ..species(
            "Charizard-Mega-X",
            &[Type::Fire, Type::Dragon],
            stats(78, 130, 111, 130, 85, 100),
            &["Tough Claws"],
        )
    },
    "charizardmegay" => SpeciesData {
        base_species: "Charizard",
        battle_only: Some("Charizard"),
        cannot_dynamax: true,
        ..species(
            "Charizard-Mega-Y",
            &[Type::Fire, Type::Flying],
            stats(78, 104, 78, 159, 115, 100),
            &["Drought"],
        )
    },
    "alakazam" => species(
        "Alakazam",
        &[Type::Psychic],
        stats(55, 50, 45, 135, 95, 120),
        &["Synchronize", "Inner Focus", "Magic Guard"],
    ),
    "gengar" => SpeciesData {
        can_gigantamax: true,
        ..species(
            "Gengar",
            &[Type::Ghost, Type::Poison],
            stats(60, 65, 60, 130, 75, 110),
            &["Cursed Body"],
        )
    },
    "chansey" => SpeciesData {
        prevo: Some("Happiny"),
        ..species(
            "Chansey",
            &[Type::Normal],
            stats(250, 5, 5, 35, 105, 50),
            &["Natural Cure", "Serene Grace", "Healer"],
        )
    },
    "tauros" => species(
        "Tauros",
        &[Type::Normal],
        stats(75, 100, 95, 40, 70, 110),
        &["Intimidate", "Anger Point", "Sheer Force"],
    ),
    "snorlax" => SpeciesData {
        can_gigantamax: true,
        ..species(
            "Snorlax",
            &[Type::Normal],
            stats(160, 110, 65, 65, 110, 30),
            &["Immunity", "Thick Fat", "Gluttony"],
        )
    },
    "mewtwo" => species(
        "Mewtwo",
        &[Type::Psychic],
        stats(106, 110, 90, 154, 90, 130),
        &["Pressure", "Unnerve"],
    ),
    "shedinja" => species(
        "Shedinja",
        &[Type::Bug, Type::Ghost],
        stats(1, 90, 45, 30, 30, 40),
        &["Wonder Guard"],
    ),
    "sneasel" => SpeciesData {
        other_formes: &["Sneasel-Hisui"],
        ..species(
            "Sneasel",
            &[Type::Dark, Type::Ice],
            stats(55, 95, 55, 35, 75, 115),
            &["Inner Focus", "Keen Eye", "Pickpocket"],
        )
    },
    "sneaselhisui" => SpeciesData {
        base_species: "Sneasel",
        ..species(
            "Sneasel-Hisui",
            &[Type::Fighting, Type::Poison],
            stats(55, 95, 55, 35, 75, 115),
            &["Inner Focus", "Keen Eye", "Pickpocket"],
        )
    },
    "weavile" => SpeciesData {
        prevo: Some("Sneasel"),
        ..species(
            "Weavile",
            &[Type::Dark, Type::Ice],
            stats(70, 120, 65, 45, 85, 125),
            &["Pressure", "Pickpocket"],
        )
    },
    "keldeo" => SpeciesData {
        other_formes: &["Keldeo-Resolute"],
        ..species(
            "Keldeo",
            &[Type::Water, Type::Fighting],
            stats(91, 72, 90, 129, 90, 108),
            &["Justified"],
        )
    },
    "keldeoresolute" => SpeciesData {
        base_species: "Keldeo",
        ..species(
            "Keldeo-Resolute",
            &[Type::Water, Type::Fighting],
            stats(91, 72, 90, 129, 90, 108),
            &["Justified"],
        )
    },
    "aegislash" => SpeciesData {
        other_formes: &["Aegislash-Blade"],
        ..species(
            "Aegislash",
            &[Type::Steel, Type::Ghost],
            stats(60, 50, 140, 50, 140, 60),
            &["Stance Change"],
        )
    },
    "aegislashblade" => SpeciesData {
        base_species: "Aegislash",
        battle_only: Some("Aegislash"),
        ..species(
            "Aegislash-Blade",
            &[Type::Steel, Type::Ghost],
            stats(60, 140, 50, 140, 50, 60),
            &["Stance Change"],
        )
    },
    "greninja" => SpeciesData {
        other_formes: &["Greninja-Ash"],
        ..species(
            "Greninja",
            &[Type::Water, Type::Dark],
            stats(72, 95, 67, 103, 71, 122),
            &["Torrent", "Protean", "Battle Bond"],
        )
    },
    "greninjaash" => SpeciesData {
        base_species: "Greninja",
        battle_only: Some("Greninja"),
        ..species(
            "Greninja-Ash",
            &[Type::Water, Type::Dark],
            stats(72, 145, 67, 153, 71, 132),
            &["Battle Bond"],
        )
    },
    "dragonite" => species(
        "Dragonite",
        &[Type::Dragon, Type::Flying],
        stats(91, 134, 95, 100, 100, 80),
        &["Inner Focus", "Multiscale"],
    ),
    "garchomp" => species(
        "Garchomp",
        &[Type::Dragon, Type::Ground],
        stats(108, 130, 95, 80, 85, 102),
        &["Sand Veil", "Rough Skin"],
    ),
    "regigigas" => species(
        "Regigigas",
        &[Type::Normal],
        stats(110, 160, 110, 80, 110, 100),
        &["Slow Start"],
    ),
    "urshifu" => SpeciesData {
        other_formes: &["Urshifu-Rapid-Strike"],
        can_gigantamax: true,
        ..species(
            "Urshifu",
            &[Type::Fighting, Type::Dark],
            stats(100, 130, 100, 63, 60, 97),
            &["Unseen Fist"],
        )
    },
    "urshifurapidstrike" => SpeciesData {
        base_species: "Urshifu",
        can_gigantamax: true,
        ..species(
            "Urshifu-Rapid-Strike",
            &[Type::Fighting, Type::Water],
            stats(100, 130, 100, 63, 60, 97),
            &["Unseen Fist"],
        )
    },
    "zoroark" => SpeciesData {
        prevo: Some("Zorua"),
        ..species(
            "Zoroark",
            &[Type::Dark],
            stats(60, 105, 60, 120, 60, 105),
            &["Illusion"],
        )
    },
    "zorua" => species(
        "Zorua",
        &[Type::Dark],
        stats(40, 65, 40, 80, 40, 65),
        &["Illusion"],
    ),
};

pub fn species_data(name: &str) -> Option<&'static SpeciesData> {
    POKEDEX.get(super::normalize_id(name).as_str())
}
