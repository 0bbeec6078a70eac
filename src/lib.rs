//! Local text tools: JSON / CSV / YAML conversion and sensitive-data
//! redaction.
//!
//! Every operation is a pure function over a complete in-memory string.
//! Failures from either engine are meant to be routed through
//! [`classify`] before they are shown to a user.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod redaction;

// Re-export commonly used types
pub use conversion::{convert, ToolId};
pub use error::{
    classify, AppError, ConversionError, ErrorContext, ParseError, RedactionError, Stage,
};
pub use redaction::{
    apply_redaction, detect_sensitive, AdvancedState, CustomRegexRule, Detection, MaskStyle,
    PreviewSample, PreviewSummary, QuickRules, RedactKind, RedactionConfig,
};
