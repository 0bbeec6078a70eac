//! Output serializers for JSON, YAML and CSV

pub mod rows;
pub mod table;

pub use rows::normalize_rows;
pub use table::{collect_columns, write_csv};

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde::Serialize;

/// JSON with 2-space indentation and no trailing newline
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> ConversionResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::serialization(e.to_string()))
    })
}

/// Canonical block-style YAML ending in a newline
pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> ConversionResult<String> {
    serde_yaml::to_string(value).map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::serialization(e.to_string()))
    })
}
