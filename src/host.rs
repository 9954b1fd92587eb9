//! Types mirroring the simulator client's battle objects.
//!
//! Everything here is owned, read-only input: the client mutates and
//! recreates these freely, so each notification hands the core a fresh
//! snapshot. Fields default the way the client leaves them (empty strings,
//! zeroes) rather than erroring on absence.

use std::collections::BTreeMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sync::record::CalcTag;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(rename = "N")]
    Genderless,
}

impl Gender {
    pub fn as_id(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Genderless => "N",
        }
    }
}

/// One volatile condition as tracked by the client: an effect id plus an
/// optional argument. The `transform` volatile's argument is the transform
/// target itself (a nested pokemon object); most others carry text or
/// nothing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostVolatile {
    pub id: String,
    pub arg: Option<VolatileArg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolatileArg {
    Text(String),
    Pokemon(Box<HostPokemon>),
}

/// Boost stages as reported by the client. Gen 1 clients report a single
/// combined `spc` stage instead of the split spa/spd keys.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostBoosts {
    pub atk: Option<i8>,
    pub def: Option<i8>,
    pub spa: Option<i8>,
    pub spd: Option<i8>,
    pub spe: Option<i8>,
    pub spc: Option<i8>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostStatusState {
    #[serde(rename = "sleepTurns")]
    pub sleep_turns: u8,
    #[serde(rename = "toxicTurns")]
    pub toxic_turns: u8,
}

/// One combatant as the client currently knows it.
///
/// `ident` is only stable within a single continuous appearance; the client
/// reassigns it across switch/reveal churn. `tag` is this core's own stable
/// identifier, written back additively once assigned.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostPokemon {
    pub tag: Option<CalcTag>,
    pub ident: String,
    pub name: String,
    pub details: String,
    #[serde(rename = "searchid")]
    pub search_id: String,
    #[serde(rename = "speciesForme")]
    pub species_forme: String,
    pub slot: Option<usize>,

    pub level: u8,
    pub gender: Gender,
    pub shiny: bool,

    pub hp: u32,
    pub maxhp: u32,
    pub fainted: Option<bool>,
    pub status: String,
    #[serde(rename = "statusState")]
    pub status_state: HostStatusState,

    pub ability: String,
    #[serde(rename = "baseAbility")]
    pub base_ability: String,
    pub item: String,
    #[serde(rename = "itemEffect")]
    pub item_effect: String,
    #[serde(rename = "prevItem")]
    pub prev_item: String,
    #[serde(rename = "prevItemEffect")]
    pub prev_item_effect: String,

    pub moves: Vec<String>,
    #[serde(rename = "lastMove")]
    pub last_move: String,
    /// Revealed moves with times-used counters.
    #[serde(rename = "moveTrack")]
    pub move_track: Vec<(String, u16)>,

    pub boosts: HostBoosts,
    pub volatiles: BTreeMap<String, HostVolatile>,
    pub turnstatuses: Vec<String>,
}

impl HostPokemon {
    pub fn volatile(&self, id: &str) -> Option<&HostVolatile> {
        self.volatiles.get(id)
    }

    /// The text argument of a volatile, if that volatile is active and
    /// carries one.
    pub fn volatile_text(&self, id: &str) -> Option<&str> {
        match self.volatiles.get(id)?.arg.as_ref()? {
            VolatileArg::Text(text) => Some(text.as_str()),
            VolatileArg::Pokemon(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSide {
    pub id: String,
    pub name: String,
    pub pokemon: Vec<HostPokemon>,
}

/// The battle object as delivered with each mutation notification.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostBattle {
    pub id: String,
    #[serde(rename = "formatid")]
    pub format_id: String,
    pub turn: u32,
    pub sides: Vec<HostSide>,
    pub weather: String,
    pub terrain: String,
    #[serde(rename = "pseudoWeather")]
    pub pseudo_weather: Vec<String>,
}

/// Exact holdings of one request-side combatant (the authoritative push the
/// simulator sends for the locally-controlled side only).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRequestPokemon {
    pub ident: String,
    pub details: String,
    /// e.g. `"317/317"` or `"0 fnt"`.
    pub condition: String,
    pub active: bool,
    pub stats: HostRequestStats,
    pub moves: Vec<String>,
    #[serde(rename = "baseAbility")]
    pub base_ability: String,
    pub ability: String,
    pub item: String,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRequestStats {
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRequestSide {
    pub id: String,
    pub name: String,
    pub pokemon: Vec<HostRequestPokemon>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRequest {
    pub rqid: u32,
    pub side: HostRequestSide,
}

/// Parses the raw request JSON the client relays from the simulator.
pub fn parse_request(json: &str) -> anyhow::Result<HostRequest> {
    serde_json::from_str(json).context("Failed to parse battle request payload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_payload_round_trips() {
        let json = r#"{
            "rqid": 3,
            "side": {
                "id": "p1",
                "name": "trainer",
                "pokemon": [{
                    "ident": "p1: Garchomp",
                    "details": "Garchomp, L100, F",
                    "condition": "357/357",
                    "active": true,
                    "stats": {"atk": 359, "def": 226, "spa": 176, "spd": 206, "spe": 303},
                    "moves": ["earthquake", "swordsdance"],
                    "baseAbility": "roughskin",
                    "ability": "roughskin",
                    "item": "lifeorb"
                }]
            }
        }"#;
        let request = parse_request(json).expect("payload should parse");
        assert_eq!(request.side.id, "p1");
        assert_eq!(request.side.pokemon[0].stats.atk, 359);
    }

    #[test]
    fn malformed_request_is_an_error_not_a_panic() {
        assert!(parse_request("{ not json").is_err());
        assert!(parse_request("{}").is_ok());
    }

    #[test]
    fn volatile_text_ignores_nested_pokemon_args() {
        let mut pokemon = HostPokemon::default();
        pokemon.volatiles.insert(
            "typechange".into(),
            HostVolatile { id: "typechange".into(), arg: Some(VolatileArg::Text("Ghost/Fairy".into())) },
        );
        pokemon.volatiles.insert(
            "transform".into(),
            HostVolatile {
                id: "transform".into(),
                arg: Some(VolatileArg::Pokemon(Box::new(HostPokemon::default()))),
            },
        );
        assert_eq!(pokemon.volatile_text("typechange"), Some("Ghost/Fairy"));
        assert_eq!(pokemon.volatile_text("transform"), None);
        assert_eq!(pokemon.volatile_text("absent"), None);
    }
}
