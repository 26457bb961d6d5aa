//! Key ordering and quoting for section headers.

use itertools::Itertools;

/// Orders map entries by the string form of their keys so that encoding the
/// same map twice renders identical text.
pub fn sorted_entries<V>(entries: Vec<(String, V)>) -> Vec<(String, V)> {
    entries
        .into_iter()
        .sorted_by(|(left, _), (right, _)| left.cmp(right))
        .collect()
}

/// A map key as it appears inside a `[parent.key]` header. Keys that are not
/// bare (letters, digits, `_` and `-`) are quoted.
pub fn section_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if !bare {
        quote(key)
    } else {
        key.to_string()
    }
}

/// Wraps `text` in double quotes with basic-string escaping.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0c}' => escaped.push_str("\\f"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}
