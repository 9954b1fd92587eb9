//! Canonical per-combatant records and the per-battle record store.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calc::move_overrides::MoveOverride;
use crate::calc::stats::{calc_spread, Nature, Stat, StatTable};
use crate::data::species::BaseStats;
use crate::data::types::Type;
use crate::host::Gender;
use crate::sync::nonce::Nonce;

/// Stable identity tag for one tracked combatant.
///
/// Assigned once when a combatant is first recorded and restored across the
/// client's object churn by the identity resolver; never reassigned while a
/// plausible match exists.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalcTag(String);

impl CalcTag {
    /// Derives a tag from the identity-bearing fields of a freshly-observed
    /// combatant. Deterministic for identical inputs; uniqueness across a
    /// battle comes from the ident/details/slot mix.
    pub fn mint(
        ident: &str,
        details: &str,
        species_forme: &str,
        level: u8,
        gender: Gender,
        slot: Option<usize>,
    ) -> Self {
        let mut hasher = blake3::Hasher::new();
        for part in [ident, details, species_forme, gender.as_id()] {
            hasher.update(part.as_bytes());
            hasher.update(&[0x1f]);
        }
        hasher.update(&[level]);
        hasher.update(&slot.map(|s| s as u8 + 1).unwrap_or(0).to_le_bytes());
        let hex = hasher.finalize().to_hex();
        Self(hex[..32].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalcTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonStatus {
    Brn,
    Par,
    Psn,
    Tox,
    Slp,
    Frz,
}

impl PokemonStatus {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "brn" => Some(Self::Brn),
            "par" => Some(Self::Par),
            "psn" => Some(Self::Psn),
            "tox" => Some(Self::Tox),
            "slp" => Some(Self::Slp),
            "frz" => Some(Self::Frz),
            _ => None,
        }
    }

    pub fn as_id(&self) -> &'static str {
        match self {
            Self::Brn => "brn",
            Self::Par => "par",
            Self::Psn => "psn",
            Self::Tox => "tox",
            Self::Slp => "slp",
            Self::Frz => "frz",
        }
    }
}

/// Simulator-observed boost stages (no HP stage exists).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Boosts {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
}

/// User-overridden boost stages, layered on top of [`Boosts`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DirtyBoosts {
    pub atk: Option<i8>,
    pub def: Option<i8>,
    pub spa: Option<i8>,
    pub spd: Option<i8>,
    pub spe: Option<i8>,
}

/// User-overridden base stats (sparse).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DirtyBaseStats {
    pub atk: Option<u16>,
    pub def: Option<u16>,
    pub spa: Option<u16>,
    pub spd: Option<u16>,
    pub spe: Option<u16>,
}

/// Base stats copied from a Transform target. Transform never copies base HP,
/// so the table has no HP slot at all.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransformedStats {
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

/// The canonical, calculation-ready snapshot of one combatant.
///
/// Every field has a defined default; the sanitizer is the only constructor
/// and the store only ever replaces whole records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcPokemon {
    pub tag: Option<CalcTag>,
    pub slot: Option<usize>,
    pub ident: String,
    pub name: String,
    pub details: String,
    pub search_id: String,

    pub species_forme: String,
    pub transformed_forme: Option<String>,
    pub alt_formes: Vec<String>,
    pub dmaxable: bool,
    pub gmaxable: bool,

    pub level: u8,
    pub gender: Gender,
    pub shiny: bool,
    pub types: Vec<Type>,

    pub hp: u32,
    pub max_hp: u32,
    pub fainted: bool,
    pub status: Option<PokemonStatus>,
    pub sleep_turns: u8,
    pub toxic_turns: u8,

    pub ability: Option<String>,
    pub dirty_ability: Option<String>,
    pub base_ability: Option<String>,
    pub abilities: Vec<String>,
    pub alt_abilities: Vec<String>,
    pub transformed_abilities: Vec<String>,
    pub ability_toggleable: bool,
    pub ability_toggled: bool,

    pub item: Option<String>,
    pub dirty_item: Option<String>,
    pub alt_items: Vec<String>,
    pub item_effect: Option<String>,
    pub prev_item: Option<String>,
    pub prev_item_effect: Option<String>,

    pub nature: Option<Nature>,
    pub ivs: StatTable,
    pub evs: Option<StatTable>,
    pub base_stats: Option<BaseStatsTable>,
    pub transformed_base_stats: Option<TransformedStats>,
    pub dirty_base_stats: DirtyBaseStats,

    pub boosts: Boosts,
    pub dirty_boosts: DirtyBoosts,

    pub moves: Vec<String>,
    pub server_moves: Vec<String>,
    pub transformed_moves: Vec<String>,
    pub alt_moves: Vec<String>,
    pub last_move: Option<String>,
    pub move_track: Vec<(String, u16)>,
    pub revealed_moves: Vec<String>,
    pub move_overrides: BTreeMap<String, MoveOverride>,

    pub use_z: bool,
    pub use_max: bool,
    pub critical_hit: bool,

    pub server_sourced: bool,
    pub server_stats: Option<StatTable>,

    pub volatiles: BTreeMap<String, Option<String>>,
    pub turn_statuses: Vec<String>,
}

/// Owned copy of a dex base-stat row (records must not borrow the dex).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseStatsTable {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl From<&BaseStats> for BaseStatsTable {
    fn from(stats: &BaseStats) -> Self {
        Self {
            hp: stats.hp,
            atk: stats.atk,
            def: stats.def,
            spa: stats.spa,
            spd: stats.spd,
            spe: stats.spe,
        }
    }
}

impl CalcPokemon {
    /// The ability used for calculation: the user override, else observed.
    pub fn effective_ability(&self) -> Option<&str> {
        self.dirty_ability.as_deref().or(self.ability.as_deref())
    }

    /// The item used for calculation: the user override, else observed.
    pub fn effective_item(&self) -> Option<&str> {
        self.dirty_item.as_deref().or(self.item.as_deref())
    }

    /// The boost stage used for calculation for one stat.
    pub fn effective_boost(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Hp => 0,
            Stat::Atk => self.dirty_boosts.atk.unwrap_or(self.boosts.atk),
            Stat::Def => self.dirty_boosts.def.unwrap_or(self.boosts.def),
            Stat::Spa => self.dirty_boosts.spa.unwrap_or(self.boosts.spa),
            Stat::Spd => self.dirty_boosts.spd.unwrap_or(self.boosts.spd),
            Stat::Spe => self.dirty_boosts.spe.unwrap_or(self.boosts.spe),
        }
    }

    /// Full unboosted stat spread, honoring transformed base stats (which
    /// never replace base HP) and dirty base stats.
    pub fn spread_stats(&self, format: &str) -> StatTable {
        let Some(base) = self.base_stats else {
            return StatTable::default();
        };

        let t = self.transformed_base_stats;
        let d = self.dirty_base_stats;
        let merged = BaseStats {
            hp: base.hp,
            atk: d.atk.or(t.map(|t| t.atk)).unwrap_or(base.atk),
            def: d.def.or(t.map(|t| t.def)).unwrap_or(base.def),
            spa: d.spa.or(t.map(|t| t.spa)).unwrap_or(base.spa),
            spd: d.spd.or(t.map(|t| t.spd)).unwrap_or(base.spd),
            spe: d.spe.or(t.map(|t| t.spe)).unwrap_or(base.spe),
        };

        calc_spread(format, &merged, &self.ivs, self.evs.as_ref(), self.level, self.nature)
    }
}

/// Records for one battle side, ordered by party slot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SideRecords {
    pub side_id: String,
    pub records: Vec<CalcPokemon>,
}

impl SideRecords {
    pub fn by_tag(&self, tag: &CalcTag) -> Option<&CalcPokemon> {
        self.records.iter().find(|r| r.tag.as_ref() == Some(tag))
    }

    pub fn by_slot(&self, slot: usize) -> Option<&CalcPokemon> {
        self.records.get(slot)
    }

    /// Writes a record wholesale: replaces the existing record with the same
    /// tag, or appends. Concurrent readers never observe a half-updated
    /// record.
    pub fn replace(&mut self, record: CalcPokemon) {
        match record
            .tag
            .as_ref()
            .and_then(|tag| self.records.iter().position(|r| r.tag.as_ref() == Some(tag)))
        {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }
}

/// All records for one battle session, destroyed only at teardown.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BattleRecords {
    pub battle_id: String,
    pub format: String,
    pub nonce: Option<Nonce>,
    pub sides: Vec<SideRecords>,
}

impl BattleRecords {
    pub fn side(&self, side_id: &str) -> Option<&SideRecords> {
        self.sides.iter().find(|s| s.side_id == side_id)
    }

    pub fn side_mut(&mut self, side_id: &str) -> &mut SideRecords {
        if let Some(index) = self.sides.iter().position(|s| s.side_id == side_id) {
            return &mut self.sides[index];
        }
        self.sides.push(SideRecords {
            side_id: side_id.to_string(),
            records: Vec::new(),
        });
        self.sides.last_mut().expect("side was just pushed")
    }

    pub fn record(&self, tag: &CalcTag) -> Option<&CalcPokemon> {
        self.sides.iter().find_map(|s| s.by_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_deterministic_and_distinct() {
        let a = CalcTag::mint("p1: Pika", "Pikachu, L50, M", "Pikachu", 50, Gender::Male, Some(0));
        let b = CalcTag::mint("p1: Pika", "Pikachu, L50, M", "Pikachu", 50, Gender::Male, Some(0));
        let c = CalcTag::mint("p1: Pika", "Pikachu, L50, M", "Pikachu", 50, Gender::Male, Some(1));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn replace_is_wholesale_by_tag() {
        let tag = CalcTag::mint("p1: Chomp", "Garchomp, L100, F", "Garchomp", 100, Gender::Female, Some(0));
        let mut side = SideRecords { side_id: "p1".into(), records: Vec::new() };

        let mut first = CalcPokemon { tag: Some(tag.clone()), hp: 100, ..Default::default() };
        side.replace(first.clone());
        assert_eq!(side.records.len(), 1);

        first.hp = 55;
        side.replace(first);
        assert_eq!(side.records.len(), 1);
        assert_eq!(side.by_tag(&tag).expect("record exists").hp, 55);
    }

    #[test]
    fn transformed_stats_leave_hp_alone() {
        let pokemon = CalcPokemon {
            species_forme: "Ditto".into(),
            level: 100,
            ivs: StatTable::max_ivs(),
            evs: Some(StatTable::default()),
            base_stats: Some(BaseStatsTable { hp: 48, atk: 48, def: 48, spa: 48, spd: 48, spe: 48 }),
            transformed_base_stats: Some(TransformedStats {
                atk: 134,
                def: 95,
                spa: 100,
                spd: 100,
                spe: 80,
            }),
            ..Default::default()
        };
        let spread = pokemon.spread_stats("gen8ou");
        // HP from Ditto's own base 48, attack from the transform target
        assert_eq!(spread.hp, 237);
        assert_eq!(spread.atk, 304);
    }
}
