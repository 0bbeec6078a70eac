//! Rule compilation
//!
//! A redaction config compiles into an ordered list of matchers: the
//! enabled quick rules in the order email, phone, ip, token, followed by
//! the custom rules in configured order when advanced rules are included.
//! Every call compiles its own matchers; nothing is cached between calls.

use super::config::{CustomRegexRule, RedactionConfig};
use super::mask::MaskStyle;
use crate::error::{RedactionError, RedactionResult};
use regex::{Match, Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
pub const PHONE_PATTERN: &str =
    r"\b(?:\+?\d{1,3}[\s-]?)?(?:\(?\d{3}\)?[\s-]?)\d{3}[\s-]?\d{4}\b";
pub const IPV4_PATTERN: &str =
    r"\b(?:(?:25[0-5]|2[0-4]\d|1?\d?\d)\.){3}(?:25[0-5]|2[0-4]\d|1?\d?\d)\b";
pub const TOKEN_PATTERN: &str =
    r"\b(?:[A-Za-z0-9_-]{24,}|ghp_[A-Za-z0-9]{20,}|sk_[A-Za-z0-9]{16,}|AIza[0-9A-Za-z_-]{20,})\b";

/// Flags a custom rule may carry; anything else is dropped
const ALLOWED_FLAGS: [char; 8] = ['d', 'g', 'i', 'm', 's', 'u', 'v', 'y'];

/// Origin of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactKind {
    Email,
    Phone,
    Ip,
    Token,
    Custom,
}

impl RedactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactKind::Email => "email",
            RedactKind::Phone => "phone",
            RedactKind::Ip => "ip",
            RedactKind::Token => "token",
            RedactKind::Custom => "custom",
        }
    }
}

impl fmt::Display for RedactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An executable matcher built for a single detect/apply call
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub kind: RedactKind,
    pub name: String,
    regex: Regex,
    sticky: bool,
}

impl CompiledRule {
    /// All matches, left to right.
    ///
    /// Sticky rules only match contiguously from the start of the text: the
    /// scan stops at the first gap.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        if !self.sticky {
            return self.regex.find_iter(text).collect();
        }

        let mut found = Vec::new();
        let mut cursor = 0;
        for m in self.regex.find_iter(text) {
            if m.start() != cursor {
                break;
            }
            cursor = if m.is_empty() {
                m.end() + text[m.end()..].chars().next().map_or(1, char::len_utf8)
            } else {
                m.end()
            };
            found.push(m);
        }
        found
    }

    /// Replace every match with its mask
    pub fn replace_all(&self, text: &str, style: MaskStyle) -> String {
        let matches = self.find_all(text);
        if matches.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for m in matches {
            output.push_str(&text[last..m.start()]);
            output.push_str(&style.mask(m.as_str()));
            last = m.end();
        }
        output.push_str(&text[last..]);
        output
    }
}

/// Build the ordered rule list for `config`
pub fn compile_rules(config: &RedactionConfig) -> RedactionResult<Vec<CompiledRule>> {
    let quick = config.quick_rules;
    let enabled = [
        (quick.email, RedactKind::Email, EMAIL_PATTERN),
        (quick.phone, RedactKind::Phone, PHONE_PATTERN),
        (quick.ip, RedactKind::Ip, IPV4_PATTERN),
        (quick.token, RedactKind::Token, TOKEN_PATTERN),
    ];

    let mut rules = Vec::new();
    for (on, kind, pattern) in enabled {
        if on {
            rules.push(compile_quick_rule(kind, pattern)?);
        }
    }

    if config.include_advanced {
        for rule in &config.advanced.custom_regex_rules {
            rules.push(compile_custom_rule(rule)?);
        }
    }

    debug!(rules = rules.len(), "compiled redaction rules");
    Ok(rules)
}

/// Quick rules use ASCII semantics for `\b`, `\d` and `\s`
fn compile_quick_rule(kind: RedactKind, pattern: &str) -> RedactionResult<CompiledRule> {
    let regex = RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .map_err(|e| RedactionError::rule_compile(kind.as_str(), pattern, e))?;

    Ok(CompiledRule {
        kind,
        name: kind.as_str().to_string(),
        regex,
        sticky: false,
    })
}

fn compile_custom_rule(rule: &CustomRegexRule) -> RedactionResult<CompiledRule> {
    let flags = sanitize_flags(rule.flags.as_deref());
    let regex = RegexBuilder::new(&ascii_classes(&rule.pattern))
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
        .map_err(|e| RedactionError::rule_compile(&rule.name, &rule.pattern, e))?;

    Ok(CompiledRule {
        kind: RedactKind::Custom,
        name: rule.name.clone(),
        regex,
        sticky: flags.contains('y'),
    })
}

/// Rewrite `\d`, `\w` and `\b` and their negations to ASCII forms. The rest
/// of a custom pattern keeps Unicode semantics (`.` matches one character).
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_class = false;
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('d') if in_class => out.push_str("0-9"),
                Some('d') => out.push_str("[0-9]"),
                Some('D') => out.push_str("[^0-9]"),
                Some('w') if in_class => out.push_str("0-9A-Za-z_"),
                Some('w') => out.push_str("[0-9A-Za-z_]"),
                Some('W') => out.push_str("[^0-9A-Za-z_]"),
                Some('b') if !in_class => out.push_str("(?-u:\\b)"),
                Some('B') if !in_class => out.push_str("(?-u:\\B)"),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Intersect `flags` with the allowed set, deduplicated in first-seen
/// order, and always include the global flag
pub fn sanitize_flags(flags: Option<&str>) -> String {
    let mut sanitized = String::new();
    for flag in flags.unwrap_or_default().chars() {
        if ALLOWED_FLAGS.contains(&flag) && !sanitized.contains(flag) {
            sanitized.push(flag);
        }
    }
    if !sanitized.contains('g') {
        sanitized.push('g');
    }
    sanitized
}
