//! Static move table plus the Z-/Max-move conversion facts.

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::data::types::Type;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug)]
pub struct MoveData {
    pub name: &'static str,
    pub move_type: Type,
    pub category: MoveCategory,
    pub base_power: u16,
    /// `None` means the move cannot miss.
    pub accuracy: Option<u8>,
    pub priority: i8,
    pub z_base_power: Option<u16>,
    pub max_base_power: Option<u16>,
    /// Always results in a critical hit (e.g. Frost Breath).
    pub will_crit: bool,
}

const fn attack(
    name: &'static str,
    move_type: Type,
    category: MoveCategory,
    base_power: u16,
    accuracy: Option<u8>,
    z_base_power: u16,
    max_base_power: u16,
) -> MoveData {
    MoveData {
        name,
        move_type,
        category,
        base_power,
        accuracy,
        priority: 0,
        z_base_power: Some(z_base_power),
        max_base_power: Some(max_base_power),
        will_crit: false,
    }
}

const fn status(name: &'static str, move_type: Type, accuracy: Option<u8>) -> MoveData {
    MoveData {
        name,
        move_type,
        category: MoveCategory::Status,
        base_power: 0,
        accuracy,
        priority: 0,
        z_base_power: None,
        max_base_power: None,
        will_crit: false,
    }
}

use MoveCategory::{Physical, Special};

pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "tackle" => attack("Tackle", Type::Normal, Physical, 40, Some(100), 100, 90),
    "thunderbolt" => attack("Thunderbolt", Type::Electric, Special, 90, Some(100), 175, 130),
    "icebeam" => attack("Ice Beam", Type::Ice, Special, 90, Some(100), 175, 130),
    "flamethrower" => attack("Flamethrower", Type::Fire, Special, 90, Some(100), 175, 130),
    "fireblast" => attack("Fire Blast", Type::Fire, Special, 110, Some(85), 185, 140),
    "hydropump" => attack("Hydro Pump", Type::Water, Special, 110, Some(80), 185, 140),
    "gigadrain" => attack("Giga Drain", Type::Grass, Special, 75, Some(100), 140, 130),
    "earthquake" => attack("Earthquake", Type::Ground, Physical, 100, Some(100), 180, 130),
    "closecombat" => attack("Close Combat", Type::Fighting, Physical, 120, Some(100), 190, 95),
    "psychic" => attack("Psychic", Type::Psychic, Special, 90, Some(100), 175, 130),
    "shadowball" => attack("Shadow Ball", Type::Ghost, Special, 80, Some(100), 160, 130),
    "airslash" => attack("Air Slash", Type::Flying, Special, 75, Some(95), 140, 130),
    "knockoff" => attack("Knock Off", Type::Dark, Physical, 65, Some(100), 120, 120),
    "uturn" => attack("U-turn", Type::Bug, Physical, 70, Some(100), 140, 120),
    "iciclecrash" => attack("Icicle Crash", Type::Ice, Physical, 85, Some(90), 160, 130),
    // Special attackers that target the physical Defense stat.
    "psyshock" => attack("Psyshock", Type::Psychic, Special, 80, Some(100), 160, 130),
    "psystrike" => attack("Psystrike", Type::Psychic, Special, 100, Some(100), 180, 130),
    "secretsword" => attack("Secret Sword", Type::Fighting, Special, 85, Some(100), 160, 90),
    // Uses the user's Defense as the attacking stat.
    "bodypress" => attack("Body Press", Type::Fighting, Physical, 80, Some(100), 160, 90),
    // Ignore the target's defensive boosts.
    "sacredsword" => attack("Sacred Sword", Type::Fighting, Physical, 90, Some(100), 175, 90),
    "darkestlariat" => attack("Darkest Lariat", Type::Dark, Physical, 85, Some(100), 160, 120),
    "chipaway" => attack("Chip Away", Type::Normal, Physical, 70, Some(100), 140, 120),
    // Guaranteed critical hits.
    "frostbreath" => MoveData {
        will_crit: true,
        ..attack("Frost Breath", Type::Ice, Special, 60, Some(90), 120, 110)
    },
    "stormthrow" => MoveData {
        will_crit: true,
        ..attack("Storm Throw", Type::Fighting, Physical, 60, Some(100), 120, 75)
    },
    "wickedblow" => MoveData {
        will_crit: true,
        ..attack("Wicked Blow", Type::Dark, Physical, 75, Some(100), 140, 120)
    },
    "surgingstrikes" => MoveData {
        will_crit: true,
        ..attack("Surging Strikes", Type::Water, Physical, 25, Some(100), 100, 90)
    },
    "flowertrick" => MoveData {
        will_crit: true,
        ..attack("Flower Trick", Type::Grass, Physical, 70, None, 140, 120)
    },
    // Base power is computed from the holder's IVs, never read from here.
    "hiddenpower" => attack("Hidden Power", Type::Normal, Special, 60, Some(100), 120, 110),
    "swordsdance" => status("Swords Dance", Type::Normal, None),
    "recover" => status("Recover", Type::Normal, None),
    "willowisp" => status("Will-O-Wisp", Type::Fire, Some(85)),
    "toxic" => status("Toxic", Type::Poison, Some(90)),
    "protect" => MoveData {
        priority: 4,
        ..status("Protect", Type::Normal, None)
    },
};

pub fn move_data(name: &str) -> Option<&'static MoveData> {
    MOVES.get(super::normalize_id(name).as_str())
}

/// Z-crystal item -> the move type it converts.
static Z_CRYSTALS: phf::Map<&'static str, Type> = phf_map! {
    "normaliumz" => Type::Normal,
    "firiumz" => Type::Fire,
    "wateriumz" => Type::Water,
    "electriumz" => Type::Electric,
    "grassiumz" => Type::Grass,
    "iciumz" => Type::Ice,
    "fightiniumz" => Type::Fighting,
    "poisoniumz" => Type::Poison,
    "groundiumz" => Type::Ground,
    "flyiniumz" => Type::Flying,
    "psychiumz" => Type::Psychic,
    "buginiumz" => Type::Bug,
    "rockiumz" => Type::Rock,
    "ghostiumz" => Type::Ghost,
    "dragoniumz" => Type::Dragon,
    "darkiniumz" => Type::Dark,
    "steeliumz" => Type::Steel,
    "fairiumz" => Type::Fairy,
};

fn z_move_name(move_type: Type) -> &'static str {
    match move_type {
        Type::Normal => "Breakneck Blitz",
        Type::Fire => "Inferno Overdrive",
        Type::Water => "Hydro Vortex",
        Type::Electric => "Gigavolt Havoc",
        Type::Grass => "Bloom Doom",
        Type::Ice => "Subzero Slammer",
        Type::Fighting => "All-Out Pummeling",
        Type::Poison => "Acid Downpour",
        Type::Ground => "Tectonic Rage",
        Type::Flying => "Supersonic Skystrike",
        Type::Psychic => "Shattered Psyche",
        Type::Bug => "Savage Spin-Out",
        Type::Rock => "Continental Crush",
        Type::Ghost => "Never-Ending Nightmare",
        Type::Dragon => "Devastating Drake",
        Type::Dark => "Black Hole Eclipse",
        Type::Steel => "Corkscrew Crash",
        Type::Fairy => "Twinkle Tackle",
    }
}

fn max_move_name(move_type: Type) -> &'static str {
    match move_type {
        Type::Normal => "Max Strike",
        Type::Fire => "Max Flare",
        Type::Water => "Max Geyser",
        Type::Electric => "Max Lightning",
        Type::Grass => "Max Overgrowth",
        Type::Ice => "Max Hailstorm",
        Type::Fighting => "Max Knuckle",
        Type::Poison => "Max Ooze",
        Type::Ground => "Max Quake",
        Type::Flying => "Max Airstream",
        Type::Psychic => "Max Mindstorm",
        Type::Bug => "Max Flutterby",
        Type::Rock => "Max Rockfall",
        Type::Ghost => "Max Phantasm",
        Type::Dragon => "Max Wyrmwind",
        Type::Dark => "Max Darkness",
        Type::Steel => "Max Steelspike",
        Type::Fairy => "Max Starfall",
    }
}

/// The Z-move a damaging move converts to while the matching Z-crystal is
/// held, or `None` when no conversion applies.
pub fn z_move(move_name: &str, item: Option<&str>) -> Option<&'static str> {
    let data = move_data(move_name)?;
    if data.category == MoveCategory::Status {
        return None;
    }
    let crystal_type = item.and_then(|i| Z_CRYSTALS.get(super::normalize_id(i).as_str()))?;
    (*crystal_type == data.move_type).then(|| z_move_name(data.move_type))
}

/// The Max move a move converts to while Dynamaxed. Status moves all become
/// Max Guard.
pub fn max_move(move_name: &str) -> Option<&'static str> {
    let data = move_data(move_name)?;
    if data.category == MoveCategory::Status {
        return Some("Max Guard");
    }
    Some(max_move_name(data.move_type))
}
