//! Redaction configuration supplied by the caller

use super::mask::MaskStyle;
use serde::{Deserialize, Serialize};

/// Built-in detectors, each toggled independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickRules {
    pub email: bool,
    pub phone: bool,
    pub ip: bool,
    pub token: bool,
}

impl QuickRules {
    pub fn all() -> Self {
        Self {
            email: true,
            phone: true,
            ip: true,
            token: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// User-authored regular expression rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRegexRule {
    /// Label only, never matched against
    #[serde(default)]
    pub name: String,
    pub pattern: String,
    /// Raw flag string; sanitized at compile time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

impl CustomRegexRule {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            flags: None,
        }
    }

    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }
}

/// Advanced rules, honoured only when `include_advanced` is set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedState {
    pub json_keys: Vec<String>,
    pub custom_regex_rules: Vec<CustomRegexRule>,
    pub mask_style: MaskStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedactionConfig {
    pub quick_rules: QuickRules,
    pub advanced: AdvancedState,
    pub include_advanced: bool,
}

impl RedactionConfig {
    /// Only the given quick rules, `[REDACTED]` masks
    pub fn quick_only(quick_rules: QuickRules) -> Self {
        Self {
            quick_rules,
            ..Default::default()
        }
    }

    pub fn with_mask_style(mut self, style: MaskStyle) -> Self {
        self.advanced.mask_style = style;
        self
    }

    /// Replace the advanced rules and turn them on
    pub fn with_advanced(mut self, advanced: AdvancedState) -> Self {
        self.advanced = advanced;
        self.include_advanced = true;
        self
    }

    pub fn mask_style(&self) -> MaskStyle {
        self.advanced.mask_style
    }

    /// Whether the JSON-key stage participates
    pub fn json_keys_active(&self) -> bool {
        self.include_advanced && !self.advanced.json_keys.is_empty()
    }
}
