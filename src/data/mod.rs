//! Read-only dex data consumed by the calc and sync layers.

pub mod learnsets;
pub mod moves;
pub mod species;
pub mod types;

#[cfg(test)]
mod tests;

pub use learnsets::pokemon_learnset;
pub use moves::{max_move, move_data, z_move, MoveCategory, MoveData, MOVES};
pub use species::{species_data, BaseStats, SpeciesData, POKEDEX};
pub use types::{parse_type, parse_type_list, Type};

/// Normalizes a display name into a dex id, e.g. `"Urshifu-Rapid-Strike"` ->
/// `"urshifurapidstrike"`.
pub fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
