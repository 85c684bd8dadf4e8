//! Language-code normalization for the Kurdish fallback group
//!
//! All Kurdish variants are interchangeable when resolving a locale and are
//! stored under one canonical code. Every other code passes through untouched.

use std::borrow::Cow;

/// Canonical representative of the Kurdish fallback group
pub const CANONICAL_KURDISH: &str = "ckb";

/// Kurdish aliases in resolution priority order, canonical first
pub const KURDISH_ALIASES: [&str; 8] = [
    CANONICAL_KURDISH,
    "ku",
    "kmr",
    "kur",
    "kurdish",
    "sorani",
    "central-kurdish",
    "kurdish-sorani",
];

/// Case-insensitive membership test against the Kurdish alias list
pub fn is_in_fallback_group(code: &str) -> bool {
    let code = code.trim();
    KURDISH_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(code))
}

/// Canonical code for fallback-group members; other input is returned unchanged
pub fn to_canonical(code: &str) -> Cow<'_, str> {
    if is_in_fallback_group(code) {
        Cow::Borrowed(CANONICAL_KURDISH)
    } else {
        Cow::Borrowed(code)
    }
}

/// Public name for [`to_canonical`] used by callers resolving request locales
pub fn normalize_locale(code: &str) -> Cow<'_, str> {
    to_canonical(code)
}

/// Locales the resolver tries for `code`, most preferred first
///
/// A group member expands to the requested code followed by the whole group.
/// Any other code only matches itself.
pub fn fallback_candidates(code: &str) -> Vec<&str> {
    let requested = code.trim();
    if !is_in_fallback_group(requested) {
        return vec![requested];
    }

    let mut candidates = Vec::with_capacity(KURDISH_ALIASES.len() + 1);
    candidates.push(requested);
    candidates.extend(
        KURDISH_ALIASES
            .iter()
            .copied()
            .filter(|alias| !alias.eq_ignore_ascii_case(requested)),
    );
    candidates
}
