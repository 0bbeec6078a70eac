//! JSON / CSV / YAML conversion
//!
//! This module contains the tool selection, the dispatcher and the
//! auto-detect chain used by the `format` tool.

pub mod detect;
pub mod engine;
pub mod tool;

pub use detect::{format_attempts, format_input, FormatAttempt};
pub use engine::convert;
pub use tool::ToolId;
