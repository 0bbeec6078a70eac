//! Unit tests for sensitive-data detection and redaction

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scrubconv::{
    apply_redaction, detect_sensitive, AdvancedState, CustomRegexRule, MaskStyle,
    PreviewSummary, QuickRules, RedactKind, RedactionConfig, RedactionError,
};

fn quick_config() -> RedactionConfig {
    RedactionConfig::quick_only(QuickRules::all())
}

fn advanced_config(quick_rules: QuickRules, advanced: AdvancedState) -> RedactionConfig {
    RedactionConfig::quick_only(quick_rules).with_advanced(advanced)
}

fn keys(keys: &[&str]) -> AdvancedState {
    AdvancedState {
        json_keys: keys.iter().map(|k| k.to_string()).collect(),
        ..Default::default()
    }
}

#[cfg(test)]
mod detect_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_quick_rule_matches_and_records_samples() {
        let text = "Email a@test.com, phone 415-555-1212, ip 192.168.1.10, token ghp_ABCDEFGHIJKLMNOPQRST";
        let result = detect_sensitive(text, &quick_config()).unwrap();

        assert_eq!(
            result.summary,
            PreviewSummary {
                emails: 1,
                phones: 1,
                ips: 1,
                tokens: 1,
                customs: 0,
            }
        );
        assert_eq!(result.sample.len(), 4);
        let kinds: Vec<RedactKind> = result.sample.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![RedactKind::Email, RedactKind::Phone, RedactKind::Ip, RedactKind::Token]
        );
        assert_eq!(result.sample[0].before, "a@test.com");
        assert_eq!(result.sample[0].after, "[REDACTED]");
    }

    #[test]
    fn test_custom_regex_and_json_key_matches() {
        let config = advanced_config(
            QuickRules::all(),
            AdvancedState {
                json_keys: vec!["password".to_string()],
                custom_regex_rules: vec![CustomRegexRule::new("acct", r"ACC-\d{4}").with_flags("igx")],
                mask_style: MaskStyle::Redacted,
            },
        );
        let text = r#"{"password":"secret","note":"ACC-1234 and acc-5678"}"#;
        let result = detect_sensitive(text, &config).unwrap();

        assert_eq!(result.summary.customs, 3);
    }

    #[test]
    fn test_sample_capped_at_ten() {
        let emails = (0..12)
            .map(|i| format!("u{}@test.com", i))
            .collect::<Vec<_>>()
            .join(" ");
        let result = detect_sensitive(&emails, &quick_config()).unwrap();

        assert_eq!(result.summary.emails, 12);
        assert_eq!(result.sample.len(), 10);
        assert_eq!(result.sample[9].before, "u9@test.com");
    }

    #[test]
    fn test_sample_uses_configured_mask() {
        let config = quick_config().with_mask_style(MaskStyle::Hash);
        let result = detect_sensitive("a@test.com", &config).unwrap();
        assert_eq!(result.sample[0].after, MaskStyle::Hash.mask("a@test.com"));
    }

    #[test]
    fn test_advanced_rules_ignored_without_include_advanced() {
        let mut config = quick_config();
        config.advanced = AdvancedState {
            json_keys: vec!["password".to_string()],
            custom_regex_rules: vec![CustomRegexRule::new("acct", r"ACC-\d{4}").with_flags("g")],
            mask_style: MaskStyle::Redacted,
        };
        let result = detect_sensitive(r#"{"password":"secret","note":"ACC-1234"}"#, &config).unwrap();

        assert_eq!(result.summary.customs, 0);
    }

    #[test]
    fn test_json_keys_on_non_json_text() {
        let config = advanced_config(QuickRules::all(), keys(&["password"]));
        let result = detect_sensitive("password=secret", &config).unwrap();

        assert_eq!(result.summary.customs, 0);
    }

    #[test]
    fn test_invalid_pattern_fails_detect() {
        let config = advanced_config(
            QuickRules::all(),
            AdvancedState {
                custom_regex_rules: vec![CustomRegexRule::new("bad", "(").with_flags("g")],
                ..Default::default()
            },
        );
        assert_matches!(
            detect_sensitive("text", &config),
            Err(RedactionError::RuleCompile { .. })
        );
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let config = quick_config();
        let first = detect_sensitive("a@test.com b@test.com", &config).unwrap();
        let second = detect_sensitive("a@test.com b@test.com", &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.summary.emails, 2);
    }
}

#[cfg(test)]
mod apply_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_asterisks_style() {
        let config = quick_config().with_mask_style(MaskStyle::Asterisks);
        assert_eq!(
            apply_redaction("Contact me at a@test.com", &config).unwrap(),
            "Contact me at ***"
        );
    }

    #[test]
    fn test_hash_style_is_eight_hex_digits() {
        let config = quick_config().with_mask_style(MaskStyle::Hash);
        let output = apply_redaction("a@test.com", &config).unwrap();

        assert_eq!(output.len(), 9);
        assert!(output.starts_with('#'));
        assert!(output[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_style_is_stable() {
        let config = quick_config().with_mask_style(MaskStyle::Hash);
        let first = apply_redaction("a@test.com", &config).unwrap();
        let second = apply_redaction("a@test.com", &config).unwrap();
        let third = apply_redaction("b@test.com", &config).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, third);
    }

    #[test]
    fn test_global_flag_forced_and_invalid_flags_dropped() {
        let config = advanced_config(
            QuickRules::none(),
            AdvancedState {
                custom_regex_rules: vec![CustomRegexRule::new("word", "foo").with_flags("iz")],
                ..Default::default()
            },
        );
        assert_eq!(apply_redaction("foo FOO", &config).unwrap(), "[REDACTED] [REDACTED]");
    }

    #[test]
    fn test_redacts_json_values_by_key() {
        let config = advanced_config(QuickRules::none(), keys(&["password"]));
        let output = apply_redaction(r#"{"password":"secret","nested":{"password":"n2"}}"#, &config).unwrap();

        assert_eq!(
            output,
            "{\n  \"password\": \"[REDACTED]\",\n  \"nested\": {\n    \"password\": \"[REDACTED]\"\n  }\n}"
        );
    }

    #[test]
    fn test_json_keys_case_insensitive_and_trimmed() {
        let config = advanced_config(QuickRules::none(), keys(&[" Password "]));
        let output = apply_redaction(r#"{"PASSWORD":"s1","nested":{"password":"s2"}}"#, &config).unwrap();

        assert_eq!(
            output,
            "{\n  \"PASSWORD\": \"[REDACTED]\",\n  \"nested\": {\n    \"password\": \"[REDACTED]\"\n  }\n}"
        );
    }

    #[test]
    fn test_json_keys_inside_arrays() {
        let config = advanced_config(QuickRules::none(), keys(&["token"]))
            .with_mask_style(MaskStyle::Asterisks);
        let output = apply_redaction(r#"[{"token":"a"},{"id":1,"token":"b"}]"#, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{"token": "***"}, {"id": 1, "token": "***"}])
        );
    }

    #[test]
    fn test_non_json_text_unchanged_by_key_stage() {
        let config = advanced_config(QuickRules::none(), keys(&["password"]));
        assert_eq!(apply_redaction("password=secret", &config).unwrap(), "password=secret");
    }

    #[test]
    fn test_regex_stage_runs_before_key_stage() {
        let config = advanced_config(
            QuickRules {
                email: true,
                ..QuickRules::none()
            },
            keys(&["password"]),
        );
        let output = apply_redaction(r#"{"password":"p","owner":"a@test.com"}"#, &config).unwrap();
        assert_eq!(
            output,
            "{\n  \"password\": \"[REDACTED]\",\n  \"owner\": \"[REDACTED]\"\n}"
        );
    }

    #[test]
    fn test_advanced_rules_ignored_without_include_advanced() {
        let mut config = RedactionConfig::quick_only(QuickRules::none());
        config.advanced = AdvancedState {
            json_keys: vec!["password".to_string()],
            custom_regex_rules: vec![CustomRegexRule::new("acct", r"ACC-\d{4}").with_flags("g")],
            mask_style: MaskStyle::Redacted,
        };
        let text = r#"{"password":"secret","note":"ACC-1234"}"#;

        assert_eq!(apply_redaction(text, &config).unwrap(), text);
    }

    #[test]
    fn test_invalid_pattern_fails_apply() {
        let config = advanced_config(
            QuickRules::all(),
            AdvancedState {
                custom_regex_rules: vec![CustomRegexRule::new("bad", "(").with_flags("g")],
                ..Default::default()
            },
        );
        assert!(apply_redaction("text", &config).is_err());
    }
}
