//! Identity resolution across the client's object churn.
//!
//! The client destroys and recreates its pokemon objects on switch-ins, forme
//! changes and reveal events, with no persistent identifier. This resolver
//! matches a newly-observed entity against previously-tagged candidates so
//! the stable tag survives the churn.

use tracing::debug;

use crate::host::HostPokemon;
use crate::sync::record::{CalcPokemon, CalcTag};

/// The identity-bearing projection of either a live host entity or a stored
/// record.
#[derive(Clone, Debug, Default)]
pub struct IdentityCandidate {
    pub tag: Option<CalcTag>,
    pub ident: String,
    pub details: String,
    pub search_id: String,
    pub species_forme: String,
}

impl From<&HostPokemon> for IdentityCandidate {
    fn from(pokemon: &HostPokemon) -> Self {
        Self {
            tag: pokemon.tag.clone(),
            ident: pokemon.ident.clone(),
            details: pokemon.details.clone(),
            search_id: pokemon.search_id.clone(),
            species_forme: pokemon.species_forme.clone(),
        }
    }
}

impl From<&CalcPokemon> for IdentityCandidate {
    fn from(record: &CalcPokemon) -> Self {
        Self {
            tag: record.tag.clone(),
            ident: record.ident.clone(),
            details: record.details.clone(),
            search_id: record.search_id.clone(),
            species_forme: record.species_forme.clone(),
        }
    }
}

/// Finds the previously-assigned tag for a newly-observed entity, or `None`
/// when the caller must mint a fresh one.
///
/// When `replace_slot` addresses a valid candidate, that candidate is matched
/// unconditionally (the simulator told us exactly which slot is being
/// replaced, e.g. on an Illusion reveal); an out-of-range slot falls through
/// to the heuristics. The heuristic chain runs criterion-major, in priority
/// order: exact ident, ident within the search key, exact details, details
/// within the search key, then non-wildcard forme substring of details.
///
/// `ident` is most specific but only survives one continuous appearance;
/// `details` survives some churn events ident does not; the containment
/// clauses absorb suffix decorations between the two fields. Two same-species
/// party members with identical details can therefore match the wrong prior
/// record; that ambiguity is inherent to the available inputs and is kept
/// as-is rather than papered over with stricter rules.
pub fn resolve_identity(
    candidates: &[IdentityCandidate],
    ident: &str,
    details: &str,
    replace_slot: Option<usize>,
) -> Option<CalcTag> {
    if let Some(slot) = replace_slot {
        if let Some(candidate) = candidates.get(slot) {
            debug!(slot, ident, "identity matched by explicit replacement slot");
            return candidate.tag.clone();
        }
    }

    let tagged = || candidates.iter().filter(|c| c.tag.is_some());

    let checks: [&dyn Fn(&IdentityCandidate) -> bool; 5] = [
        &|c| !ident.is_empty() && !c.ident.is_empty() && c.ident == ident,
        &|c| !ident.is_empty() && !c.search_id.is_empty() && c.search_id.contains(ident),
        &|c| !details.is_empty() && !c.details.is_empty() && c.details == details,
        &|c| !details.is_empty() && !c.search_id.is_empty() && c.search_id.contains(details),
        &|c| {
            !details.is_empty()
                && !c.species_forme.is_empty()
                && !c.species_forme.ends_with("-*")
                && details.contains(c.species_forme.as_str())
        },
    ];

    for check in checks {
        if let Some(candidate) = tagged().find(|c| check(c)) {
            return candidate.tag.clone();
        }
    }

    None
}
