//! Generation-accurate stat computation.
//!
//! Every intermediate step truncates through unsigned 32-bit arithmetic the
//! way the client's own data layer does; a floating-point rendition diverges
//! at specific boundary values, so nothing here touches floats.

use serde::{Deserialize, Serialize};

use crate::data::species::BaseStats;
use crate::format::{detect_gen, legacy_gen};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    pub fn as_id(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
        }
    }

    pub fn from_id(id: &str) -> Option<Stat> {
        match id {
            "hp" => Some(Stat::Hp),
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// The (+10%, -10%) stat pair, or `None` for neutral natures.
    pub fn plus_minus(&self) -> Option<(Stat, Stat)> {
        match self {
            Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => None,
            Nature::Lonely => Some((Stat::Atk, Stat::Def)),
            Nature::Brave => Some((Stat::Atk, Stat::Spe)),
            Nature::Adamant => Some((Stat::Atk, Stat::Spa)),
            Nature::Naughty => Some((Stat::Atk, Stat::Spd)),
            Nature::Bold => Some((Stat::Def, Stat::Atk)),
            Nature::Relaxed => Some((Stat::Def, Stat::Spe)),
            Nature::Impish => Some((Stat::Def, Stat::Spa)),
            Nature::Lax => Some((Stat::Def, Stat::Spd)),
            Nature::Timid => Some((Stat::Spe, Stat::Atk)),
            Nature::Hasty => Some((Stat::Spe, Stat::Def)),
            Nature::Jolly => Some((Stat::Spe, Stat::Spa)),
            Nature::Naive => Some((Stat::Spe, Stat::Spd)),
            Nature::Modest => Some((Stat::Spa, Stat::Atk)),
            Nature::Mild => Some((Stat::Spa, Stat::Def)),
            Nature::Quiet => Some((Stat::Spa, Stat::Spe)),
            Nature::Rash => Some((Stat::Spa, Stat::Spd)),
            Nature::Calm => Some((Stat::Spd, Stat::Atk)),
            Nature::Gentle => Some((Stat::Spd, Stat::Def)),
            Nature::Sassy => Some((Stat::Spd, Stat::Spe)),
            Nature::Careful => Some((Stat::Spd, Stat::Spa)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Nature::Hardy => "Hardy",
            Nature::Lonely => "Lonely",
            Nature::Brave => "Brave",
            Nature::Adamant => "Adamant",
            Nature::Naughty => "Naughty",
            Nature::Bold => "Bold",
            Nature::Docile => "Docile",
            Nature::Relaxed => "Relaxed",
            Nature::Impish => "Impish",
            Nature::Lax => "Lax",
            Nature::Timid => "Timid",
            Nature::Hasty => "Hasty",
            Nature::Serious => "Serious",
            Nature::Jolly => "Jolly",
            Nature::Naive => "Naive",
            Nature::Modest => "Modest",
            Nature::Mild => "Mild",
            Nature::Quiet => "Quiet",
            Nature::Bashful => "Bashful",
            Nature::Rash => "Rash",
            Nature::Calm => "Calm",
            Nature::Gentle => "Gentle",
            Nature::Sassy => "Sassy",
            Nature::Careful => "Careful",
            Nature::Quirky => "Quirky",
        }
    }

    pub fn from_name(name: &str) -> Option<Nature> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hardy" => Some(Nature::Hardy),
            "lonely" => Some(Nature::Lonely),
            "brave" => Some(Nature::Brave),
            "adamant" => Some(Nature::Adamant),
            "naughty" => Some(Nature::Naughty),
            "bold" => Some(Nature::Bold),
            "docile" => Some(Nature::Docile),
            "relaxed" => Some(Nature::Relaxed),
            "impish" => Some(Nature::Impish),
            "lax" => Some(Nature::Lax),
            "timid" => Some(Nature::Timid),
            "hasty" => Some(Nature::Hasty),
            "serious" => Some(Nature::Serious),
            "jolly" => Some(Nature::Jolly),
            "naive" => Some(Nature::Naive),
            "modest" => Some(Nature::Modest),
            "mild" => Some(Nature::Mild),
            "quiet" => Some(Nature::Quiet),
            "bashful" => Some(Nature::Bashful),
            "rash" => Some(Nature::Rash),
            "calm" => Some(Nature::Calm),
            "gentle" => Some(Nature::Gentle),
            "sassy" => Some(Nature::Sassy),
            "careful" => Some(Nature::Careful),
            "quirky" => Some(Nature::Quirky),
            _ => None,
        }
    }
}

impl serde::Serialize for Nature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Nature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Nature::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown nature: {name}")))
    }
}

/// A full per-stat value table (IVs, EVs, computed stats).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatTable {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatTable {
    pub fn filled(value: u16) -> Self {
        Self { hp: value, atk: value, def: value, spa: value, spd: value, spe: value }
    }

    /// The per-stat IV default (a missing IV reads as maxed).
    pub fn max_ivs() -> Self {
        Self::filled(31)
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Atk => self.atk = value,
            Stat::Def => self.def = value,
            Stat::Spa => self.spa = value,
            Stat::Spd => self.spd = value,
            Stat::Spe => self.spe = value,
        }
    }
}

// Client data layer: tr(num, bits) keeps the low `bits` of the u32 truncation.
fn tr16(value: u32) -> u32 {
    value % 0x1_0000
}

/// Computes one stat with exact integer truncation semantics.
///
/// Legacy gens treat a missing (or zero) EV as 252, reflecting the DV-to-EV
/// equivalence of those games. A base HP of exactly 1 short-circuits to 1
/// regardless of the other inputs.
pub fn calc_stat(
    format: &str,
    stat: Stat,
    base: u16,
    iv: u16,
    ev: Option<u16>,
    level: u8,
    nature: Option<Nature>,
) -> u16 {
    let legacy = legacy_gen(detect_gen(format));

    let ev = match ev.unwrap_or(0) {
        0 if legacy => 252,
        value => value,
    };
    let level = u32::from(level.min(100));
    let base = u32::from(base);
    let iv = u32::from(iv);
    let ev = u32::from(ev);

    if stat == Stat::Hp {
        if base == 1 {
            return 1;
        }
        return ((2 * base + iv + ev / 4 + 100) * level / 100 + 10) as u16;
    }

    let value = (2 * base + iv + ev / 4) * level / 100 + 5;

    // The 16-bit wrap on the nature multiply is load-bearing; it reproduces
    // the client's overflow behavior at very high stat values.
    match nature.and_then(|n| n.plus_minus()) {
        Some((plus, _)) if stat == plus => (tr16(value * 110) / 100) as u16,
        Some((_, minus)) if stat == minus => (tr16(value * 90) / 100) as u16,
        _ => value as u16,
    }
}

/// Computes the full stat spread for a set of genetics.
///
/// `evs` of `None` means "no spread known", which legacy gens resolve to
/// all-252 per the defaulting rule above.
pub fn calc_spread(
    format: &str,
    base: &BaseStats,
    ivs: &StatTable,
    evs: Option<&StatTable>,
    level: u8,
    nature: Option<Nature>,
) -> StatTable {
    let base_of = |stat: Stat| match stat {
        Stat::Hp => base.hp,
        Stat::Atk => base.atk,
        Stat::Def => base.def,
        Stat::Spa => base.spa,
        Stat::Spd => base.spd,
        Stat::Spe => base.spe,
    };

    let mut out = StatTable::default();
    for stat in Stat::ALL {
        let value = calc_stat(
            format,
            stat,
            base_of(stat),
            ivs.get(stat),
            evs.map(|t| t.get(stat)),
            level,
            nature,
        );
        out.set(stat, value);
    }
    out
}
