//! Readers for the supported source syntaxes

pub mod table;
pub mod source;

pub use table::{parse_csv, CsvTable};
pub use source::InputSource;

use crate::error::{ParseError, ParseResult};
use serde_json::Value;

/// Parse a complete JSON document
pub fn parse_json(content: &str) -> ParseResult<Value> {
    serde_json::from_str(content).map_err(|e| ParseError::json(&e))
}

/// Parse YAML into JSON values; YAML scalars keep their natural type
pub fn parse_yaml_as_json(content: &str) -> ParseResult<Value> {
    serde_yaml::from_str(content).map_err(|e| ParseError::yaml(&e))
}

/// Parse YAML keeping its own data model (tags, non-string keys)
pub fn parse_yaml(content: &str) -> ParseResult<serde_yaml::Value> {
    serde_yaml::from_str(content).map_err(|e| ParseError::yaml(&e))
}

/// Like [`parse_json`] but for callers where non-JSON text is not an error
pub fn try_parse_json(content: &str) -> Option<Value> {
    serde_json::from_str(content).ok()
}
