//! Header-mode CSV reading
//!
//! The first record names the columns. Header names are trimmed, blank
//! lines are skipped and every data record must have as many fields as the
//! header. Values are kept as strings.

use crate::error::{ParseError, ParseResult, Syntax};
use serde_json::{Map, Value};

/// Parsed CSV document
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl CsvTable {
    /// Rows as a JSON array of string-valued objects
    pub fn into_json(self) -> Value {
        Value::Array(self.rows.into_iter().map(Value::Object).collect())
    }
}

/// Parse CSV text with a header row
pub fn parse_csv(content: &str) -> ParseResult<CsvTable> {
    if let Some(line) = find_unterminated_quote(content) {
        return Err(ParseError::new(
            Syntax::Csv,
            format!("Quoted field unterminated (field opened on line {})", line),
            None,
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::csv(&e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::csv(&e))?;
        let mut row = Map::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), Value::String(field.to_string()));
        }
        rows.push(row);
    }

    Ok(CsvTable { headers, rows })
}

/// Line on which a quoted field that never closes was opened.
///
/// The csv reader accepts an open quote running to end of input as one
/// field, so this is checked up front. A quote only opens a field when it
/// is the field's first character; `""` inside a quoted field is an escape.
fn find_unterminated_quote(content: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut line = 1;
    let mut opened_on = 0;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                opened_on = line;
                at_field_start = false;
            }
            ',' | '\r' => at_field_start = true,
            '\n' => {
                line += 1;
                at_field_start = true;
            }
            _ => at_field_start = false,
        }
    }

    in_quotes.then_some(opened_on)
}
