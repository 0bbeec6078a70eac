//! Shaping arbitrary JSON into CSV rows

use serde_json::{Map, Value};

/// Column used when a value is not an object
pub const VALUE_COLUMN: &str = "value";

/// Normalize a parsed JSON document into row objects.
///
/// Precedence:
/// 1. Array whose first element is an object: objects are rows as-is
/// 2. Any other array: each element becomes `{value: element}`
/// 3. Object: a single row
/// 4. Scalar: a single `{value: scalar}` row
pub fn normalize_rows(value: &Value) -> Vec<Map<String, Value>> {
    match value {
        Value::Array(items) => match items.first() {
            None => Vec::new(),
            Some(Value::Object(_)) => items.iter().map(object_row).collect(),
            Some(_) => items.iter().map(value_row).collect(),
        },
        Value::Object(map) => vec![map.clone()],
        scalar => vec![value_row(scalar)],
    }
}

fn object_row(item: &Value) -> Map<String, Value> {
    match item {
        Value::Object(map) => map.clone(),
        other => value_row(other),
    }
}

fn value_row(item: &Value) -> Map<String, Value> {
    let mut row = Map::new();
    row.insert(VALUE_COLUMN.to_string(), item.clone());
    row
}
