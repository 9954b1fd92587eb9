//! Battle-state synchronization: change detection, identity resolution,
//! sanitization, and the canonical record store.

pub mod identity;
pub mod nonce;
pub mod record;
pub mod sanitize;

pub use identity::{resolve_identity, IdentityCandidate};
pub use nonce::{battle_nonce, Nonce};
pub use record::{BattleRecords, CalcPokemon, CalcTag, SideRecords};
pub use sanitize::{sanitize_pokemon, sync_pokemon, SanitizeSource};
