//! Pure calculation helpers: stats, Hidden Power, crits, move overrides.

pub mod crit;
pub mod hidden_power;
pub mod move_overrides;
pub mod stats;

pub use crit::{always_critical_hits, determine_critical_hit};
pub use hidden_power::{hidden_power_power, hidden_power_type};
pub use move_overrides::{
    has_move_overrides, move_override_defaults, resolve_move_override, DefensiveStat,
    MoveOverride, MoveOverrideDefaults,
};
pub use stats::{calc_spread, calc_stat, Nature, Stat, StatTable};
