//! Error types for conversion and redaction, plus user-facing classification

pub mod classify;

pub use classify::{classify, AppError, ErrorContext, Stage};

use std::fmt;

/// Message used when the `format` tool exhausts every syntax
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported format. Please provide valid JSON, CSV, or YAML.";

/// Source syntax a parse error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Json,
    Yaml,
    Csv,
}

impl Syntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::Json => "JSON",
            Syntax::Yaml => "YAML",
            Syntax::Csv => "CSV",
        }
    }
}

/// Malformed JSON, YAML or CSV input
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub syntax: Syntax,
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(syntax: Syntax, message: impl Into<String>, location: Option<(usize, usize)>) -> Self {
        Self {
            syntax,
            message: message.into(),
            location,
        }
    }

    pub fn json(error: &serde_json::Error) -> Self {
        let location = (error.line() > 0).then(|| (error.line(), error.column()));
        Self::new(Syntax::Json, strip_location(&error.to_string()), location)
    }

    pub fn yaml(error: &serde_yaml::Error) -> Self {
        let location = error.location().map(|loc| (loc.line(), loc.column()));
        Self::new(Syntax::Yaml, strip_location(&error.to_string()), location)
    }

    /// csv already names the record, line and byte offset in its message
    pub fn csv(error: &csv::Error) -> Self {
        Self::new(Syntax::Csv, error.to_string(), None)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.syntax {
            Syntax::Csv => write!(f, "Invalid CSV: {}", self.message)?,
            syntax => write!(f, "{} parse error: {}", syntax.as_str(), self.message)?,
        }
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// serde_json and serde_yaml embed " at line X column Y" in their messages;
/// the location is carried separately so that segment is dropped.
fn strip_location(message: &str) -> String {
    let Some(start) = message.find(" at line ") else {
        return message.to_string();
    };
    let rest = &message[start + " at line ".len()..];
    let Some(col) = rest.find(" column ") else {
        return message.to_string();
    };
    let digits = &rest[col + " column ".len()..];
    let digits_len = digits.chars().take_while(|c| c.is_ascii_digit()).count();
    let end = start + " at line ".len() + col + " column ".len() + digits_len;
    format!("{}{}", &message[..start], &message[end..])
}

/// Failures that are not attributable to malformed input
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    #[error("CSV output failed: {message}")]
    CsvWrite { message: String },
}

impl ConversionErrorKind {
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn csv_write(message: impl Into<String>) -> Self {
        Self::CsvWrite {
            message: message.into(),
        }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{}", UNSUPPORTED_FORMAT_MESSAGE)]
    UnsupportedFormat,

    #[error("Conversion failed: {kind}")]
    Conversion { kind: ConversionErrorKind },
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(err) => match err.location {
                Some((line, col)) => format!(
                    "{} input is malformed at line {}, column {}: {}",
                    err.syntax.as_str(),
                    line,
                    col,
                    err.message
                ),
                None => format!("{} input is malformed: {}", err.syntax.as_str(), err.message),
            },
            Self::UnsupportedFormat => UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            Self::Conversion { kind } => kind.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() || error.is_data() {
            Self::conversion(ConversionErrorKind::serialization(error.to_string()))
        } else {
            Self::Parse(ParseError::json(&error))
        }
    }
}

/// Errors raised while compiling redaction rules
#[derive(Debug, thiserror::Error)]
pub enum RedactionError {
    #[error("Invalid regex for rule '{name}' ({pattern}): {source}")]
    RuleCompile {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl RedactionError {
    pub fn rule_compile(name: &str, pattern: &str, source: regex::Error) -> Self {
        Self::RuleCompile {
            name: name.to_string(),
            pattern: pattern.to_string(),
            source,
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for redaction operations
pub type RedactionResult<T> = Result<T, RedactionError>;
