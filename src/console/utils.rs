use std::collections::BTreeMap;

use super::error::{KnaError, KnaResult};

pub mod resource;

/// Parse `key=value` entries, one per line.
///
/// Only the first `=` separates the key, so values may hold
/// any text. Blank lines and lines starting with `#` are skipped.
/// A bare `key` is treated as a key with an empty value.
/// Backslash escapes written by [`format_pairs`] are decoded.
pub fn parse_key_values(input: &str) -> KnaResult<BTreeMap<String, String>> {
    let mut pairs = BTreeMap::new();
    for line in input.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').unwrap_or((line, ""));
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(KnaError::InvalidKeyValue(line.to_string()));
        }
        pairs.insert(key.to_string(), unescape_value(value));
    }
    Ok(pairs)
}

/// Render pairs the way [`parse_key_values`] reads them.
#[must_use]
pub fn format_pairs(pairs: &BTreeMap<String, String>) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}\n", escape_value(value)))
        .collect()
}

fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn unescape_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => unescaped.push('\\'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Keys of `old` which are missing from `new`.
#[must_use]
pub fn removed_keys<'a>(
    old: &'a BTreeMap<String, String>,
    new: &BTreeMap<String, String>,
) -> Vec<&'a str> {
    old.keys()
        .filter(|key| !new.contains_key(*key))
        .map(String::as_str)
        .collect()
}

/// Build a merge patch which turns `old` map into `new` one.
///
/// Keys missing from `new` are set to `null`, so the API server removes them.
#[must_use]
pub fn replace_map_patch(
    old: &BTreeMap<String, String>,
    new: &BTreeMap<String, String>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut patch = serde_json::Map::new();
    for key in old.keys().filter(|key| !new.contains_key(*key)) {
        patch.insert(key.clone(), serde_json::Value::Null);
    }
    for (key, value) in new {
        if old.get(key) != Some(value) {
            patch.insert(key.clone(), serde_json::Value::String(value.clone()));
        }
    }
    patch
}
