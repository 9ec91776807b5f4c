//! Text canonicalization shared by station matching and time parsing.
//!
//! Catalog aliases are normalized once at load time and entity text is
//! normalized at match time, so both sides of every comparison live in the
//! same alphabet: lowercase ASCII letters, digits and single spaces.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize free text for matching.
///
/// Lower-cases, strips diacritics (NFD decomposition, combining marks
/// dropped), turns every character outside `[a-z0-9 ]` into a space,
/// collapses whitespace runs and trims both ends.
///
/// # Examples
///
/// ```
/// use travel_server::text::normalize;
///
/// assert_eq!(normalize("  Gare de l'Est  "), "gare de l est");
/// assert_eq!(normalize("Besançon-Viotte"), "besancon viotte");
/// assert_eq!(normalize("Après-midi"), "apres midi");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in c.to_lowercase() {
            if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(lower);
            } else {
                pending_space = true;
            }
        }
    }

    out
}

/// Split normalized text into its space-separated tokens.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|t| !t.is_empty())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalizing twice is the same as normalizing once
        #[test]
        fn idempotent(s in "\\PC{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Output alphabet is lowercase alphanumerics and single inner spaces
        #[test]
        fn output_alphabet(s in "\\PC{0,40}") {
            let out = normalize(&s);
            prop_assert!(out
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.starts_with(' '));
            prop_assert!(!out.ends_with(' '));
        }
    }
}
