//! Sensitive-data detection and redaction
//!
//! [`detect_sensitive`] reports what the configured rules would touch;
//! [`apply_redaction`] rewrites the text. Both compile the same rule list
//! and scan in the same order.

pub mod config;
pub mod json_keys;
pub mod mask;
pub mod rules;

pub use config::{AdvancedState, CustomRegexRule, QuickRules, RedactionConfig};
pub use json_keys::KeySet;
pub use mask::MaskStyle;
pub use rules::{compile_rules, sanitize_flags, CompiledRule, RedactKind};

use crate::error::RedactionResult;
use crate::parser::try_parse_json;
use serde::Serialize;
use tracing::{debug, trace};

/// Sample entries kept by [`detect_sensitive`]
pub const MAX_SAMPLE: usize = 10;

/// Exact match counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreviewSummary {
    pub emails: usize,
    pub phones: usize,
    pub ips: usize,
    pub tokens: usize,
    pub customs: usize,
}

impl PreviewSummary {
    fn record(&mut self, kind: RedactKind) {
        match kind {
            RedactKind::Email => self.emails += 1,
            RedactKind::Phone => self.phones += 1,
            RedactKind::Ip => self.ips += 1,
            RedactKind::Token => self.tokens += 1,
            RedactKind::Custom => self.customs += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.emails + self.phones + self.ips + self.tokens + self.customs
    }
}

/// One previewed match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSample {
    pub kind: RedactKind,
    pub before: String,
    pub after: String,
}

/// Result of [`detect_sensitive`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub summary: PreviewSummary,
    pub sample: Vec<PreviewSample>,
}

/// Count what the configured rules match in `text`.
///
/// The sample holds the first [`MAX_SAMPLE`] matches in rule order, then
/// text order. JSON-key matches only add to `customs`; text that is not
/// JSON contributes nothing to them.
pub fn detect_sensitive(text: &str, config: &RedactionConfig) -> RedactionResult<Detection> {
    let rules = compile_rules(config)?;
    let style = config.mask_style();
    let mut detection = Detection::default();

    for rule in &rules {
        let matches = rule.find_all(text);
        trace!(rule = %rule.name, kind = %rule.kind, matches = matches.len(), "rule scanned");
        for m in matches {
            detection.summary.record(rule.kind);
            if detection.sample.len() < MAX_SAMPLE {
                detection.sample.push(PreviewSample {
                    kind: rule.kind,
                    before: m.as_str().to_string(),
                    after: style.mask(m.as_str()),
                });
            }
        }
    }

    if config.json_keys_active() {
        let keys = KeySet::new(&config.advanced.json_keys);
        match try_parse_json(text) {
            Some(value) => {
                let count = json_keys::count_key_matches(&value, &keys);
                debug!(matches = count, "json key matches counted");
                detection.summary.customs += count;
            }
            None => debug!("input is not JSON, json key rules skipped"),
        }
    }

    Ok(detection)
}

/// Replace everything the configured rules match in `text`.
///
/// Rules run in order over the current text, so later rules see earlier
/// masks. If JSON-key rules are active and the result parses as JSON, the
/// values of matching keys are masked and the document is re-emitted with
/// 2-space indentation; otherwise the text is returned as is.
pub fn apply_redaction(text: &str, config: &RedactionConfig) -> RedactionResult<String> {
    let rules = compile_rules(config)?;
    let style = config.mask_style();

    let mut redacted = text.to_string();
    for rule in &rules {
        redacted = rule.replace_all(&redacted, style);
    }

    if config.json_keys_active() {
        let keys = KeySet::new(&config.advanced.json_keys);
        match try_parse_json(&redacted) {
            Some(value) => {
                let rewritten = json_keys::redact_by_keys(&value, &keys, style);
                redacted = format!("{:#}", rewritten);
                debug!("json key redaction applied");
            }
            None => debug!("input is not JSON, json key rules skipped"),
        }
    }

    Ok(redacted)
}
