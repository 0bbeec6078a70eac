//! Mapping of raw failures onto stage-tagged, user-facing errors
//!
//! Callers never show engine errors directly. Every failure is routed
//! through [`classify`] together with the context it occurred in, and the
//! resulting [`AppError`] carries a fixed hint plus the local processing
//! notice.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const LOCAL_NOTICE: &str = "All processing is completed locally.";

const PARSE_HINT: &str =
    "We could not parse your input. Please check JSON, CSV, or YAML syntax and try again.";
const CONVERT_HINT: &str =
    "We could not complete the conversion. Please verify tool selection and input format.";
const REDACT_HINT: &str =
    "We could not complete redaction. Please review your redaction rules and input content.";

/// Lowercased fragments that mark a failure as malformed input
const PARSE_SIGNATURES: [&str; 7] = [
    "unexpected token",
    "unexpected end",
    "invalid csv",
    "unsupported format",
    "yaml",
    "json",
    "parse",
];

/// Operation the caller was performing when the failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    Format,
    Convert,
    Redact,
    Preview,
}

impl FromStr for ErrorContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "format" => Ok(Self::Format),
            "convert" => Ok(Self::Convert),
            "redact" => Ok(Self::Redact),
            "preview" => Ok(Self::Preview),
            other => Err(format!(
                "Invalid error context '{}'. Use 'format', 'convert', 'redact', or 'preview'",
                other
            )),
        }
    }
}

/// Pipeline stage a user-facing error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Parse,
    Redact,
    Convert,
    Format,
}

impl Stage {
    fn label(&self) -> &'static str {
        match self {
            Stage::Parse => "Parse error",
            Stage::Redact => "Redact error",
            Stage::Convert => "Convert error",
            Stage::Format => "Format error",
        }
    }
}

/// Error as presented to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    pub stage: Stage,
    pub message: String,
}

impl AppError {
    fn new(stage: Stage, hint: &str) -> Self {
        Self {
            stage,
            message: format!("{}: {} {}", stage.label(), hint, LOCAL_NOTICE),
        }
    }
}

/// Classify a raw failure raised while performing `context`
pub fn classify<E>(context: ErrorContext, error: &E) -> AppError
where
    E: fmt::Display + ?Sized,
{
    if matches!(context, ErrorContext::Redact | ErrorContext::Preview) {
        return AppError::new(Stage::Redact, REDACT_HINT);
    }

    let raw = error.to_string().to_lowercase();
    if is_parse_like(&raw) {
        AppError::new(Stage::Parse, PARSE_HINT)
    } else {
        AppError::new(Stage::Convert, CONVERT_HINT)
    }
}

fn is_parse_like(raw: &str) -> bool {
    PARSE_SIGNATURES.iter().any(|signature| raw.contains(signature))
}
