//! Key normalization for city and club names.
//!
//! A normalized key is safe to use as a file name and as a URL path
//! segment: it contains only lowercase ASCII letters, digits, and
//! underscores.

use regex::Regex;
use std::sync::LazyLock;

/// Matches every character that is not an ASCII letter, digit, whitespace,
/// or underscore.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s_]").expect("valid regex"));

/// Matches runs of separators. Underscores count as separators so that an
/// already-normalized key passes through unchanged.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid regex"));

/// Normalizes a city or club name into a key.
///
/// The pipeline:
/// 1. Strip everything except ASCII letters, digits, whitespace, `_`
/// 2. Lowercase
/// 3. Collapse each run of whitespace/underscores into a single `_`
///
/// Leading and trailing separators are kept (as a single `_`), not trimmed.
#[must_use]
pub fn normalize_key(input: &str) -> String {
    let stripped = DISALLOWED_RE.replace_all(input, "");
    let lower = stripped.to_ascii_lowercase();
    SEPARATOR_RE.replace_all(&lower, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_multi_word_city() {
        assert_eq!(normalize_key("New York"), "new_york");
        assert_eq!(normalize_key("Tel Aviv"), "tel_aviv");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize_key("Joe's Bar & Grill"), "joes_bar_grill");
        assert_eq!(normalize_key("St. Louis"), "st_louis");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize_key("San  \t Francisco"), "san_francisco");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(normalize_key("São Paulo"), "so_paulo");
        assert_eq!(normalize_key("Zürich"), "zrich");
    }

    #[test]
    fn keeps_edge_separators() {
        assert_eq!(normalize_key("Paris !"), "paris_");
        assert_eq!(normalize_key(" Berlin"), "_berlin");
    }

    #[test]
    fn is_idempotent() {
        for input in ["New York", "Joe's  Bar", "a_b", "x __ y", "Ünïcode City 9", ""] {
            let once = normalize_key(input);
            assert_eq!(normalize_key(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn output_is_restricted_charset() {
        for input in ["Köln/Bonn", "L.A. (Downtown)", "\u{3000}Tokyo\u{a0}Bay", "1-2-3"] {
            let key = normalize_key(input);
            assert!(
                key.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "{input:?} -> {key:?}"
            );
        }
    }
}
