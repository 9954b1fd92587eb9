//! Hidden Power type and base power from the holder's IVs.
//!
//! Both values come from a fixed bit-extraction formula rather than the dex
//! (the move's dex entry is a generic Normal-type placeholder). Legacy gens
//! store DV-derived IVs in the same table, so the same extraction applies.

use crate::calc::stats::{Stat, StatTable};
use crate::data::types::Type;
use crate::format::detect_gen;

// Bit-weight order is fixed: hp, atk, def, spe, spa, spd.
const BIT_ORDER: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spe, Stat::Spa, Stat::Spd];

const TYPE_ORDER: [Type; 16] = [
    Type::Fighting,
    Type::Flying,
    Type::Poison,
    Type::Ground,
    Type::Rock,
    Type::Bug,
    Type::Ghost,
    Type::Steel,
    Type::Fire,
    Type::Water,
    Type::Grass,
    Type::Electric,
    Type::Psychic,
    Type::Ice,
    Type::Dragon,
    Type::Dark,
];

fn weighted_bits(ivs: &StatTable, shift: u16) -> u32 {
    BIT_ORDER
        .iter()
        .enumerate()
        .map(|(i, stat)| u32::from((ivs.get(*stat) >> shift) & 1) << i)
        .sum()
}

/// The type Hidden Power resolves to for these IVs.
pub fn hidden_power_type(ivs: &StatTable) -> Type {
    let index = weighted_bits(ivs, 0) * 15 / 63;
    TYPE_ORDER[index as usize]
}

/// The base power Hidden Power resolves to for these IVs: variable through
/// gen 5, a flat 60 from gen 6 on.
pub fn hidden_power_power(format: &str, ivs: &StatTable) -> u16 {
    if detect_gen(format) >= 6 {
        return 60;
    }
    (weighted_bits(ivs, 1) * 40 / 63 + 30) as u16
}
