//! Host-facing entry point.
//!
//! The host delivers mutation notifications for one battle strictly serially;
//! this engine processes them in that order, synchronously, over the owned
//! per-battle record stores. A notification without a battle id is discarded
//! outright; an unchanged fingerprint short-circuits into a no-op.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::calc::stats::StatTable;
use crate::host::{HostBattle, HostRequest};
use crate::sync::identity::{resolve_identity, IdentityCandidate};
use crate::sync::nonce::{battle_nonce, Nonce};
use crate::sync::record::{BattleRecords, CalcTag};
use crate::sync::sanitize::sync_pokemon;

/// Result of one update notification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyncOutcome {
    /// The notification lacked the minimal fields; no state was touched.
    Discarded,
    /// The fingerprint is unchanged; consumers may keep everything cached.
    Unchanged(Nonce),
    /// Records were re-synchronized under the returned fingerprint.
    Synced(Nonce),
}

/// Owns the per-battle record stores and applies host notifications to them.
#[derive(Debug, Default)]
pub struct CalcEngine {
    battles: HashMap<String, BattleRecords>,
    /// Enumerate alternate formes beyond those consistent with the visible
    /// forme.
    pub show_all_formes: bool,
}

impl CalcEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record store for one battle, if it has been seen.
    pub fn battle(&self, battle_id: &str) -> Option<&BattleRecords> {
        self.battles.get(battle_id)
    }

    /// Applies a battle mutation notification.
    ///
    /// Runs the full pipeline per side entity: identity resolution against
    /// the prior records, sanitization carrying the matched record's user
    /// state, and a wholesale store write. The optional request payload then
    /// overlays authoritative holdings onto its own side only.
    pub fn apply_update(
        &mut self,
        battle: &HostBattle,
        request: Option<&HostRequest>,
    ) -> SyncOutcome {
        if battle.id.is_empty() {
            warn!("discarding battle update without a battle id");
            return SyncOutcome::Discarded;
        }

        let nonce = battle_nonce(battle, request);
        if let Some(records) = self.battles.get(&battle.id) {
            if records.nonce.as_ref() == Some(&nonce) {
                debug!(battle = %battle.id, "fingerprint unchanged, skipping resync");
                return SyncOutcome::Unchanged(nonce);
            }
        }

        let format = if battle.format_id.is_empty() {
            // battle room ids lead with the format, e.g. "battle-gen8ou-123"
            battle
                .id
                .split('-')
                .nth(1)
                .unwrap_or_default()
                .to_string()
        } else {
            battle.format_id.clone()
        };

        let show_all_formes = self.show_all_formes;
        let records = self
            .battles
            .entry(battle.id.clone())
            .or_insert_with(|| BattleRecords {
                battle_id: battle.id.clone(),
                format: format.clone(),
                nonce: None,
                sides: Vec::new(),
            });

        for side in &battle.sides {
            let side_records = records.side_mut(&side.id);
            for pokemon in &side.pokemon {
                let candidates: Vec<IdentityCandidate> = side
                    .pokemon
                    .iter()
                    .map(IdentityCandidate::from)
                    .chain(side_records.records.iter().map(IdentityCandidate::from))
                    .collect();

                let tag = pokemon.tag.clone().or_else(|| {
                    resolve_identity(&candidates, &pokemon.ident, &pokemon.details, None)
                });
                let prior = tag
                    .as_ref()
                    .and_then(|tag| side_records.by_tag(tag))
                    .cloned();

                let mut record = sync_pokemon(prior.as_ref(), pokemon, &format, show_all_formes);
                if tag.is_some() {
                    record.tag = tag;
                }
                side_records.replace(record);
            }
        }

        if let Some(request) = request {
            overlay_request(records, request);
        }

        records.nonce = Some(nonce.clone());
        SyncOutcome::Synced(nonce)
    }

    /// Handles an entity-addition/replacement notification: resolves the
    /// incoming entity against the side's records and returns the tag the
    /// caller should write back onto the new host object, or `None` when a
    /// fresh tag will be minted on the next sync pass.
    pub fn apply_pokemon_added(
        &self,
        battle_id: &str,
        side_id: &str,
        ident: &str,
        details: &str,
        replace_slot: Option<usize>,
    ) -> Option<CalcTag> {
        if battle_id.is_empty() {
            warn!("discarding pokemon-added notification without a battle id");
            return None;
        }
        let side = self.battles.get(battle_id)?.side(side_id)?;
        let candidates: Vec<IdentityCandidate> =
            side.records.iter().map(IdentityCandidate::from).collect();
        resolve_identity(&candidates, ident, details, replace_slot)
    }

    /// Tears down one battle's records. The only record-deletion path;
    /// per-entity churn never deletes records.
    pub fn destroy(&mut self, battle_id: &str) {
        if self.battles.remove(battle_id).is_some() {
            debug!(battle = battle_id, "battle records destroyed");
        }
    }
}

/// Overlays the periodic authoritative push onto its own side's records.
/// Other sides are never touched by a request.
fn overlay_request(records: &mut BattleRecords, request: &HostRequest) {
    if request.side.id.is_empty() {
        return;
    }
    let side = records.side_mut(&request.side.id);

    for pokemon in &request.side.pokemon {
        let matched = side.records.iter_mut().find(|record| {
            (!pokemon.ident.is_empty() && record.ident == pokemon.ident)
                || (!pokemon.details.is_empty() && record.details == pokemon.details)
                || (!record.species_forme.is_empty()
                    && pokemon.details.contains(record.species_forme.as_str()))
        });
        let Some(record) = matched else {
            continue;
        };

        record.server_sourced = true;
        if !pokemon.moves.is_empty() {
            record.server_moves = pokemon.moves.clone();
        }
        if record.ability.is_none() && !pokemon.ability.is_empty() {
            record.ability = Some(pokemon.ability.clone());
        }
        if record.item.is_none() && !pokemon.item.is_empty() {
            record.item = Some(pokemon.item.clone());
        }
        record.server_stats = Some(StatTable {
            hp: max_hp_from_condition(&pokemon.condition).unwrap_or(record.max_hp as u16),
            atk: pokemon.stats.atk,
            def: pokemon.stats.def,
            spa: pokemon.stats.spa,
            spd: pokemon.stats.spd,
            spe: pokemon.stats.spe,
        });
    }
}

/// Extracts the max HP from a request condition string like `"357/357"` or
/// `"120/357 par"`; fainted conditions (`"0 fnt"`) carry no max.
fn max_hp_from_condition(condition: &str) -> Option<u16> {
    let (_, rest) = condition.split_once('/')?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
