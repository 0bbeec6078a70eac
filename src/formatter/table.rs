//! RFC 4180 CSV output: CRLF record terminators, fields quoted only when
//! they contain a comma, a quote or a line break, no trailing terminator.

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Union of row keys in first-seen order
pub fn collect_columns(rows: &[Map<String, Value>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        if seen.insert(key.as_str()) {
            columns.push(key.clone());
        }
    }
    columns
}

/// Serialize rows under `columns`; cells missing from a row are empty
pub fn write_csv(columns: &[String], rows: &[Map<String, Value>]) -> ConversionResult<String> {
    if rows.is_empty() || columns.is_empty() {
        return Ok(String::new());
    }

    let mut records = Vec::with_capacity(rows.len() + 1);
    records.push(encode_record(columns)?);
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| row.get(column).map(cell_text).unwrap_or_default())
            .collect();
        records.push(encode_record(&cells)?);
    }

    Ok(records.join("\r\n"))
}

/// One record without its terminator.
///
/// csv writes a record made of a single empty field as `""`; here it stays
/// an empty line.
fn encode_record(fields: &[String]) -> ConversionResult<String> {
    if matches!(fields, [only] if only.is_empty()) {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(fields).map_err(csv_write_error)?;

    let bytes = writer.into_inner().map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::csv_write(e.error().to_string()))
    })?;
    let mut record = String::from_utf8(bytes).map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::csv_write(e.to_string()))
    })?;

    if record.ends_with("\r\n") {
        record.truncate(record.len() - 2);
    }
    Ok(record)
}

/// Text of a single cell
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

fn csv_write_error(error: csv::Error) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::csv_write(error.to_string()))
}
