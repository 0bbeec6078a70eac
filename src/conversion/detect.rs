//! Auto-detection for the `format` tool
//!
//! Attempts run in a fixed order and the first one that succeeds wins:
//! JSON (pretty-printed), then YAML (re-emitted canonically), then CSV
//! (re-emitted with CRLF terminators). There is no retry with other
//! parameters.

use crate::error::{ConversionError, ConversionResult, ParseError, Syntax};
use crate::formatter::{collect_columns, to_pretty_json, to_yaml, write_csv};
use crate::parser::{parse_csv, parse_json, parse_yaml};
use tracing::debug;

/// One step of the auto-detect chain
#[derive(Clone, Copy)]
pub struct FormatAttempt {
    pub syntax: Syntax,
    run: fn(&str) -> ConversionResult<String>,
}

impl FormatAttempt {
    pub fn run(&self, input: &str) -> ConversionResult<String> {
        (self.run)(input)
    }
}

impl std::fmt::Debug for FormatAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatAttempt")
            .field("syntax", &self.syntax)
            .finish()
    }
}

const FORMAT_ATTEMPTS: [FormatAttempt; 3] = [
    FormatAttempt {
        syntax: Syntax::Json,
        run: format_json,
    },
    FormatAttempt {
        syntax: Syntax::Yaml,
        run: format_yaml,
    },
    FormatAttempt {
        syntax: Syntax::Csv,
        run: format_csv,
    },
];

/// The chain in evaluation order
pub fn format_attempts() -> &'static [FormatAttempt] {
    &FORMAT_ATTEMPTS
}

/// Normalize `input` in the first syntax that accepts it
pub fn format_input(input: &str) -> ConversionResult<String> {
    for attempt in format_attempts() {
        match attempt.run(input) {
            Ok(output) => {
                debug!(syntax = attempt.syntax.as_str(), "format input detected");
                return Ok(output);
            }
            Err(e) => {
                debug!(syntax = attempt.syntax.as_str(), error = %e, "format attempt rejected");
            }
        }
    }
    Err(ConversionError::UnsupportedFormat)
}

fn format_json(input: &str) -> ConversionResult<String> {
    let value = parse_json(input)?;
    to_pretty_json(&value)
}

fn format_yaml(input: &str) -> ConversionResult<String> {
    let value = parse_yaml(input)?;
    if is_folded_plain_scalar(input, &value) {
        return Err(ParseError::new(
            Syntax::Yaml,
            "multi-line input folds into a single plain scalar",
            None,
        )
        .into());
    }
    to_yaml(&value)
}

fn format_csv(input: &str) -> ConversionResult<String> {
    let table = parse_csv(input)?;
    write_csv(&collect_columns(&table.rows), &table.rows)
}

/// A multi-line document that YAML reads as one unquoted string carries no
/// YAML structure (CSV is read this way, for instance). Block scalars and
/// quoted strings are explicit and still count as YAML.
fn is_folded_plain_scalar(input: &str, value: &serde_yaml::Value) -> bool {
    if !matches!(value, serde_yaml::Value::String(_)) || !input.contains('\n') {
        return false;
    }
    let body = input
        .trim_start()
        .strip_prefix("---")
        .map(str::trim_start)
        .unwrap_or_else(|| input.trim_start());
    !matches!(body.chars().next(), Some('|' | '>' | '"' | '\''))
}
