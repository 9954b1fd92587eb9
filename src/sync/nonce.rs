//! Change detection.
//!
//! A nonce is a cheap composite digest over every observable that can affect
//! calculation output. Consumers compare nonces to decide whether a
//! recomputation pass is worth running at all. Over-invalidation is
//! acceptable; missing a real change is not, so anything remotely
//! calculation-relevant feeds the digest.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::{HostBattle, HostPokemon, HostRequest, VolatileArg};

/// Fingerprint of one battle's calculation-relevant state.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(String);

impl Nonce {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const SEP: &[u8] = &[0x1f];

fn feed(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(value.as_bytes());
    hasher.update(SEP);
}

fn feed_pokemon(hasher: &mut blake3::Hasher, pokemon: &HostPokemon) {
    if let Some(tag) = &pokemon.tag {
        feed(hasher, tag.as_str());
    }
    feed(hasher, &pokemon.ident);
    feed(hasher, &pokemon.details);
    feed(hasher, &pokemon.search_id);
    feed(hasher, &pokemon.species_forme);
    feed(hasher, pokemon.gender.as_id());
    hasher.update(&[pokemon.level, pokemon.shiny as u8]);
    hasher.update(&pokemon.hp.to_le_bytes());
    hasher.update(&pokemon.maxhp.to_le_bytes());
    hasher.update(&[pokemon.fainted.unwrap_or(pokemon.hp == 0) as u8]);
    feed(hasher, &pokemon.status);
    hasher.update(&[
        pokemon.status_state.sleep_turns,
        pokemon.status_state.toxic_turns,
    ]);
    feed(hasher, &pokemon.ability);
    feed(hasher, &pokemon.base_ability);
    feed(hasher, &pokemon.item);
    feed(hasher, &pokemon.item_effect);
    feed(hasher, &pokemon.prev_item);

    for boost in [
        pokemon.boosts.atk,
        pokemon.boosts.def,
        pokemon.boosts.spa,
        pokemon.boosts.spd,
        pokemon.boosts.spe,
        pokemon.boosts.spc,
    ] {
        hasher.update(&[boost.map(|b| b as u8).unwrap_or(0x80)]);
    }

    for mv in &pokemon.moves {
        feed(hasher, mv);
    }
    feed(hasher, &pokemon.last_move);
    for (mv, used) in &pokemon.move_track {
        feed(hasher, mv);
        hasher.update(&used.to_le_bytes());
    }

    // BTreeMap iteration keeps volatile order deterministic
    for (id, volatile) in &pokemon.volatiles {
        feed(hasher, id);
        match &volatile.arg {
            Some(VolatileArg::Text(text)) => feed(hasher, text),
            // a nested pokemon argument (transform target) contributes its
            // forme; digesting the whole object would recurse for nothing
            Some(VolatileArg::Pokemon(target)) => feed(hasher, &target.species_forme),
            None => {
                hasher.update(SEP);
            }
        }
    }
    for status in &pokemon.turnstatuses {
        feed(hasher, status);
    }
    hasher.update(&[0x1e]);
}

fn feed_request(hasher: &mut blake3::Hasher, request: &HostRequest) {
    feed(hasher, &request.side.id);
    for pokemon in &request.side.pokemon {
        feed(hasher, &pokemon.ident);
        feed(hasher, &pokemon.details);
        feed(hasher, &pokemon.condition);
        hasher.update(&[pokemon.active as u8]);
        for stat in [
            pokemon.stats.atk,
            pokemon.stats.def,
            pokemon.stats.spa,
            pokemon.stats.spd,
            pokemon.stats.spe,
        ] {
            hasher.update(&stat.to_le_bytes());
        }
        for mv in &pokemon.moves {
            feed(hasher, mv);
        }
        feed(hasher, &pokemon.ability);
        feed(hasher, &pokemon.base_ability);
        feed(hasher, &pokemon.item);
        hasher.update(&[0x1e]);
    }
}

/// Fingerprints the battle plus the latest request payload, if any.
///
/// Pure function of its inputs: two calls on logically-unchanged state yield
/// equal nonces. The turn counter is deliberately excluded; a turn boundary
/// with no observable change must not invalidate consumers.
pub fn battle_nonce(battle: &HostBattle, request: Option<&HostRequest>) -> Nonce {
    let mut hasher = blake3::Hasher::new();

    feed(&mut hasher, &battle.id);
    feed(&mut hasher, &battle.format_id);
    feed(&mut hasher, &battle.weather);
    feed(&mut hasher, &battle.terrain);
    for condition in &battle.pseudo_weather {
        feed(&mut hasher, condition);
    }

    for side in &battle.sides {
        feed(&mut hasher, &side.id);
        for pokemon in &side.pokemon {
            feed_pokemon(&mut hasher, pokemon);
        }
    }

    if let Some(request) = request {
        hasher.update(&[1]);
        feed_request(&mut hasher, request);
    } else {
        hasher.update(&[0]);
    }

    Nonce(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostSide, HostVolatile};

    fn battle() -> HostBattle {
        let mut pokemon = HostPokemon {
            ident: "p1: Chomp".into(),
            details: "Garchomp, L100, F".into(),
            species_forme: "Garchomp".into(),
            level: 100,
            hp: 100,
            maxhp: 100,
            moves: vec!["earthquake".into()],
            ..Default::default()
        };
        pokemon.boosts.atk = Some(0);
        HostBattle {
            id: "battle-gen8ou-1".into(),
            format_id: "gen8ou".into(),
            sides: vec![HostSide {
                id: "p1".into(),
                name: "trainer".into(),
                pokemon: vec![pokemon],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn unchanged_state_fingerprints_identically() {
        let b = battle();
        assert_eq!(battle_nonce(&b, None), battle_nonce(&b, None));
    }

    #[test]
    fn turn_counter_alone_changes_nothing() {
        let mut b = battle();
        let before = battle_nonce(&b, None);
        b.turn += 1;
        assert_eq!(battle_nonce(&b, None), before);
    }

    #[test]
    fn every_relevant_mutation_changes_the_nonce() {
        let base = battle_nonce(&battle(), None);

        let mut b = battle();
        b.sides[0].pokemon[0].hp = 55;
        assert_ne!(battle_nonce(&b, None), base, "hp change missed");

        let mut b = battle();
        b.sides[0].pokemon[0].status = "brn".into();
        assert_ne!(battle_nonce(&b, None), base, "status change missed");

        let mut b = battle();
        b.sides[0].pokemon[0].boosts.atk = Some(2);
        assert_ne!(battle_nonce(&b, None), base, "boost change missed");

        let mut b = battle();
        b.sides[0].pokemon[0].species_forme = "Garchomp-Mega".into();
        assert_ne!(battle_nonce(&b, None), base, "forme change missed");

        let mut b = battle();
        b.sides[0].pokemon[0].moves.push("outrage".into());
        assert_ne!(battle_nonce(&b, None), base, "revealed move missed");

        let mut b = battle();
        b.sides[0].pokemon[0].volatiles.insert(
            "typechange".into(),
            HostVolatile { id: "typechange".into(), arg: None },
        );
        assert_ne!(battle_nonce(&b, None), base, "volatile change missed");

        let mut b = battle();
        b.weather = "RainDance".into();
        assert_ne!(battle_nonce(&b, None), base, "field change missed");
    }

    #[test]
    fn request_presence_and_contents_are_fingerprinted() {
        let b = battle();
        let none = battle_nonce(&b, None);
        let mut request = HostRequest::default();
        request.side.id = "p1".into();
        let with = battle_nonce(&b, Some(&request));
        assert_ne!(none, with);

        let mut changed = request.clone();
        changed.side.pokemon.push(Default::default());
        assert_ne!(battle_nonce(&b, Some(&changed)), with);
    }
}
