use crate::core::elements::{UNKNOWN_ELEMENT, canonical_symbol};

type Strategy = fn(&str) -> Option<&str>;

/// Candidate symbols derived from a site label, tried in order until one is canonical.
///
/// Longer prefixes come first so that `Na1` resolves to sodium rather than nitrogen.
const STRATEGIES: [(&str, Strategy); 3] = [
    ("exact", exact),
    ("two-character prefix", two_char_prefix),
    ("one-character prefix", one_char_prefix),
];

fn exact(label: &str) -> Option<&str> {
    Some(label)
}

fn two_char_prefix(label: &str) -> Option<&str> {
    char_prefix(label, 2)
}

fn one_char_prefix(label: &str) -> Option<&str> {
    char_prefix(label, 1)
}

/// Returns the first `n` characters of `label`, or `None` if it is shorter than that.
fn char_prefix(label: &str, n: usize) -> Option<&str> {
    match label.char_indices().nth(n) {
        Some((end, _)) => Some(&label[..end]),
        None if label.chars().count() == n => Some(label),
        None => None,
    }
}

/// Maps a site label (`OW`, `Na1`, `H2`, ...) to an element symbol.
///
/// Never fails: labels with no recognizable element resolve to [`UNKNOWN_ELEMENT`].
pub fn resolve_symbol(label: &str) -> &'static str {
    STRATEGIES
        .iter()
        .find_map(|(name, candidate)| {
            let symbol = canonical_symbol(candidate(label)?)?;
            tracing::trace!("Resolved label '{}' to '{}' by {} match.", label, symbol, name);
            Some(symbol)
        })
        .unwrap_or(UNKNOWN_ELEMENT)
}
