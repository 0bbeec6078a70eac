//! Tool dispatch for format conversion

use crate::conversion::detect::format_input;
use crate::conversion::tool::ToolId;
use crate::error::ConversionResult;
use crate::formatter::{collect_columns, normalize_rows, to_pretty_json, to_yaml, write_csv};
use crate::parser::{parse_csv, parse_json, parse_yaml_as_json};
use tracing::debug;

/// Run `tool` over `input`.
///
/// Input is trimmed first; blank input yields empty output for every tool
/// without attempting to parse.
pub fn convert(tool: ToolId, input: &str) -> ConversionResult<String> {
    let source = input.trim();
    if source.is_empty() {
        debug!(tool = %tool, "blank input, nothing to convert");
        return Ok(String::new());
    }

    debug!(tool = %tool, bytes = source.len(), "converting");
    match tool {
        ToolId::JsonCsv => json_to_csv(source),
        ToolId::CsvJson => csv_to_json(source),
        ToolId::YamlJson => yaml_to_json(source),
        ToolId::JsonYaml => json_to_yaml(source),
        ToolId::Format => format_input(source),
    }
}

fn json_to_csv(input: &str) -> ConversionResult<String> {
    let value = parse_json(input)?;
    let rows = normalize_rows(&value);
    write_csv(&collect_columns(&rows), &rows)
}

fn csv_to_json(input: &str) -> ConversionResult<String> {
    let table = parse_csv(input)?;
    to_pretty_json(&table.into_json())
}

fn yaml_to_json(input: &str) -> ConversionResult<String> {
    let value = parse_yaml_as_json(input)?;
    to_pretty_json(&value)
}

fn json_to_yaml(input: &str) -> ConversionResult<String> {
    let value = parse_json(input)?;
    to_yaml(&value)
}
