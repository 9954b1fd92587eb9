use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
        }
    }
}

pub fn parse_type(name: &str) -> Option<Type> {
    match name.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(Type::Normal),
        "fire" => Some(Type::Fire),
        "water" => Some(Type::Water),
        "electric" => Some(Type::Electric),
        "grass" => Some(Type::Grass),
        "ice" => Some(Type::Ice),
        "fighting" => Some(Type::Fighting),
        "poison" => Some(Type::Poison),
        "ground" => Some(Type::Ground),
        "flying" => Some(Type::Flying),
        "psychic" => Some(Type::Psychic),
        "bug" => Some(Type::Bug),
        "rock" => Some(Type::Rock),
        "ghost" => Some(Type::Ghost),
        "dragon" => Some(Type::Dragon),
        "dark" => Some(Type::Dark),
        "steel" => Some(Type::Steel),
        "fairy" => Some(Type::Fairy),
        _ => None,
    }
}

/// Parses a slash-separated type list as sent by the client,
/// e.g. `"Ghost/Fairy"` from a `typechange` volatile.
pub fn parse_type_list(list: &str) -> Vec<Type> {
    list.split('/').filter_map(parse_type).collect()
}
