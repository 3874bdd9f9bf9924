//! Query and item text normalization.
//!
//! Matching across sources is case- and accent-insensitive: both the query
//! and the searchable item attributes pass through [`normalize`] exactly once
//! (items at ingestion, queries at tokenization), so the hot filter path only
//! ever compares pre-folded strings.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lower-case `text` and strip combining diacritical marks.
///
/// The input is lower-cased, canonically decomposed (NFD), and every
/// combining mark dropped, leaving the base letters. The function is pure and
/// idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Split a free-text query into normalized search terms.
///
/// The query is passed through [`normalize`] and split on runs of whitespace,
/// hyphens, and underscores. Empty tokens are discarded, so `"gtk--3"` and
/// `"gtk 3"` produce the same terms.
pub fn tokenize(query: &str) -> Vec<String> {
    normalize(query)
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_and_accent_insensitive() {
        assert_eq!(normalize("Núcleo"), normalize("nucleo"));
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("ÐigiKam"), normalize("ðigikam"));
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["Núcleo", "FIREFOX", "grüße", "plain"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn tokenize_splits_on_whitespace_hyphen_underscore_runs() {
        assert_eq!(tokenize("gtk-3 _demo"), vec!["gtk", "3", "demo"]);
        assert_eq!(tokenize("Foo--Bar__baz"), vec!["foo", "bar", "baz"]);
        assert!(tokenize("  -_ ").is_empty());
        assert!(tokenize("").is_empty());
    }
}
