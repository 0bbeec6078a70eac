//! Replacement text for matched spans

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a matched span is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaskStyle {
    /// Literal `[REDACTED]`
    #[default]
    Redacted,
    /// Literal `***`
    Asterisks,
    /// `#` and an 8-digit hex fingerprint of the matched text
    Hash,
}

impl MaskStyle {
    pub fn mask(&self, value: &str) -> String {
        match self {
            MaskStyle::Redacted => "[REDACTED]".to_string(),
            MaskStyle::Asterisks => "***".to_string(),
            MaskStyle::Hash => format!("#{:08x}", rolling_hash(value)),
        }
    }
}

impl FromStr for MaskStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redacted" => Ok(MaskStyle::Redacted),
            "asterisks" => Ok(MaskStyle::Asterisks),
            "hash" => Ok(MaskStyle::Hash),
            other => Err(format!(
                "Invalid mask style '{}'. Use 'redacted', 'asterisks', or 'hash'",
                other
            )),
        }
    }
}

/// 32-bit rolling hash over UTF-16 code units: `acc = acc * 31 + unit`,
/// seeded at 0, wrapping. A fingerprint, not a cryptographic digest.
pub fn rolling_hash(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)))
}
