//! Key-based redaction over JSON documents

use super::mask::MaskStyle;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Configured key names, trimmed and lowercased; blank names are dropped
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: HashSet<String>,
}

impl KeySet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|key| key.as_ref().trim().to_lowercase())
            .filter(|key| !key.is_empty())
            .collect();
        Self { keys }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }
}

/// Number of object keys anywhere in `value` that match, including keys
/// nested under a matching key
pub fn count_key_matches(value: &Value, keys: &KeySet) -> usize {
    match value {
        Value::Array(items) => items.iter().map(|item| count_key_matches(item, keys)).sum(),
        Value::Object(map) => map
            .iter()
            .map(|(key, item)| usize::from(keys.matches(key)) + count_key_matches(item, keys))
            .sum(),
        _ => 0,
    }
}

/// New tree with the value of every matching key replaced by its mask
pub fn redact_by_keys(value: &Value, keys: &KeySet, style: MaskStyle) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_by_keys(item, keys, style))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| {
                    let next = if keys.matches(key) {
                        Value::String(style.mask(&text_form(item)))
                    } else {
                        redact_by_keys(item, keys, style)
                    };
                    (key.clone(), next)
                })
                .collect::<Map<String, Value>>(),
        ),
        scalar => scalar.clone(),
    }
}

/// Text a masked value is fingerprinted from: strings as is, everything
/// else as JavaScript's `String(value)` renders it
fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => text_form(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        scalar => scalar.to_string(),
    }
}

/// Integral floats drop their fraction (`2.0` renders as `2`)
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}
