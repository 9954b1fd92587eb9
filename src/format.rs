//! Battle format identifier resolution.

/// Generation assumed when a format id carries no `gen` prefix; the client
/// omits the prefix only for current-gen formats.
pub const CURRENT_GEN: u8 = 9;

/// Normalizes a format or effect name into an id, e.g. `"Gen 8 OU"` ->
/// `"gen8ou"`.
pub fn format_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Extracts the generation number from a format id like `"gen8ou"`.
pub fn detect_gen(format: &str) -> u8 {
    let id = format_id(format);
    let Some(digits) = id.strip_prefix("gen") else {
        return CURRENT_GEN;
    };
    let digits: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(CURRENT_GEN)
}

/// Gens 1 and 2 use DV-based genetics: no natures, no EV spreads, no
/// abilities, and (in gen 1) no held items.
pub fn legacy_gen(gen: u8) -> bool {
    gen <= 2
}

/// Convenience for callers holding the raw format id.
pub fn legacy_format(format: &str) -> bool {
    legacy_gen(detect_gen(format))
}
