//! Small utility helpers for encoding, JSON extraction, and display formatting.
//!
//! The functions in this module are intentionally lightweight to keep the
//! ingestion and networking hot paths fast. They are used by the source
//! adapters and by the external renderer's display contract.

use serde_json::Value;

/// Percent-encode a string for use in URLs.
///
/// Encoding rules:
///
/// - Unreserved characters as per RFC 3986 (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`)
///   are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - All other bytes are encoded as two uppercase hexadecimal digits prefixed by `%`.
///
/// The function operates on raw bytes from the input string. Any non-ASCII bytes
/// are hex-escaped.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

/// Extract a string value from a JSON object by key, defaulting to empty string.
///
/// Returns `""` if the key is missing or not a string.
pub fn s(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Extract the first available string from a list of candidate keys.
///
/// Returns `Some(String)` for the first key that maps to a JSON string, or `None`
/// if none match.
pub fn ss(v: &Value, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(s) = v.get(*k).and_then(|x| x.as_str()) {
            return Some(s.to_owned());
        }
    }
    None
}

/// Extract an array of strings from a JSON object by trying keys in order.
///
/// Returns the first found array as `Vec<String>`, filtering out non-string elements.
/// If no array of strings is found, returns an empty vector.
pub fn arrs(v: &Value, keys: &[&str]) -> Vec<String> {
    for k in keys {
        if let Some(arr) = v.get(*k).and_then(|x| x.as_array()) {
            return arr
                .iter()
                .filter_map(|e| e.as_str().map(|s| s.to_owned()))
                .collect();
        }
    }
    Vec::new()
}

/// Read a truthy flag from a JSON object by key.
///
/// The listing endpoints emit installed flags either as a JSON boolean or as
/// the string `"true"`; both are accepted. Anything else is `false`.
pub fn flag(v: &Value, key: &str) -> bool {
    match v.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Build curl command arguments for fetching a URL.
///
/// Base arguments are `-sSLf` (silent, show errors, follow redirects, fail on
/// HTTP errors); `extra_args` (e.g. `["--max-time", "30"]`) are appended and
/// the URL goes last.
pub fn curl_args(url: &str, extra_args: &[&str]) -> Vec<String> {
    let mut args = vec!["-sSLf".to_string()];
    for arg in extra_args {
        args.push((*arg).to_string());
    }
    args.push(url.to_string());
    args
}

/// Turn a package identifier into a human-facing title.
///
/// Hyphens and underscores become spaces and every word longer than two
/// characters is capitalized, so `"gimp-help"` renders as `"Gimp Help"` while
/// short joiners like `"of"` stay lower-case.
pub fn format_title(title: &str) -> String {
    title
        .replace(['_', '-'], " ")
        .split(' ')
        .map(|word| {
            if word.chars().count() > 2 {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tidy a raw package description for display.
///
/// Trims surrounding whitespace, capitalizes the first letter, and appends a
/// trailing period when missing. Empty descriptions stay empty.
pub fn format_description(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut chars = trimmed.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn util_percent_encode() {
        assert_eq!(percent_encode(""), "");
        assert_eq!(percent_encode("abc-_.~"), "abc-_.~");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("C++"), "C%2B%2B");
        assert_eq!(percent_encode("π"), "%CF%80");
    }

    #[test]
    fn util_json_extractors() {
        let v: serde_json::Value = serde_json::json!({
            "a": "str",
            "b": ["x", 1, "y"],
            "t": true,
            "ts": "true",
            "f": "false",
        });
        assert_eq!(s(&v, "a"), "str");
        assert_eq!(s(&v, "missing"), "");
        assert_eq!(ss(&v, &["z", "a"]).as_deref(), Some("str"));
        assert_eq!(
            arrs(&v, &["b", "missing"]),
            vec!["x".to_string(), "y".to_string()]
        );
        assert!(flag(&v, "t"));
        assert!(flag(&v, "ts"));
        assert!(!flag(&v, "f"));
        assert!(!flag(&v, "missing"));
    }

    #[test]
    fn util_curl_args_order() {
        let args = curl_args("http://localhost/x", &["--max-time", "30"]);
        assert_eq!(args, vec!["-sSLf", "--max-time", "30", "http://localhost/x"]);
    }

    #[test]
    fn util_format_title_capitalizes_long_words() {
        assert_eq!(format_title("gimp-help"), "Gimp Help");
        assert_eq!(format_title("tree_of_life"), "Tree of Life");
        assert_eq!(format_title("qt"), "qt");
    }

    #[test]
    fn util_format_description_trims_and_terminates() {
        assert_eq!(format_description("  a web browser  "), "A web browser.");
        assert_eq!(format_description("Already done."), "Already done.");
        assert_eq!(format_description("   "), "");
    }
}
