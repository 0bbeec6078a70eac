//! End-to-end tests for the scrubconv binary
//!
//! Each test spawns the built executable and checks stdout, stderr and the
//! exit status.

use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, NamedTempFile};

fn scrubconv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scrubconv"))
}

fn run(args: &[&str]) -> Output {
    scrubconv()
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run scrubconv")
}

fn run_stdin(args: &[&str], input: &str) -> Output {
    let mut child = scrubconv()
        .args(args)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start scrubconv");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for scrubconv")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[cfg(test)]
mod convert_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_convert_literal_text() {
        let output = run(&["convert", "--tool", "json-csv", r#"[{"name":"Alice","age":20}]"#]);

        assert!(output.status.success());
        assert_eq!(stdout(&output), "name,age\r\nAlice,20\n");
    }

    #[test]
    fn test_convert_from_stdin() {
        let output = run_stdin(&["convert", "--tool", "yaml-json", "--stdin"], "name: Alice\n");

        assert!(output.status.success());
        assert_eq!(stdout(&output), "{\n  \"name\": \"Alice\"\n}\n");
    }

    #[test]
    fn test_convert_file_to_output_file() {
        let mut input = NamedTempFile::with_suffix(".csv").unwrap();
        write!(input, "name,age\nAlice,20").unwrap();
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("out/data.json");

        let output = run(&[
            "convert",
            "--tool",
            "csv-json",
            input.path().to_str().unwrap(),
            "-o",
            out_path.to_str().unwrap(),
        ]);

        assert!(output.status.success());
        assert_eq!(
            fs::read_to_string(&out_path).unwrap(),
            "[\n  {\n    \"name\": \"Alice\",\n    \"age\": \"20\"\n  }\n]"
        );
    }

    #[test]
    fn test_parse_failure_is_classified() {
        let output = run(&["convert", "--tool", "json-yaml", "{bad json"]);

        assert!(!output.status.success());
        let err = stderr(&output);
        assert!(err.contains("Parse error: We could not parse your input."));
        assert!(err.contains("All processing is completed locally."));
        assert!(err.contains("cause: JSON input is malformed at line 1"));
    }

    #[test]
    fn test_unsupported_format_fails() {
        let output = run(&["convert", "--tool", "format", "name,age\n\"Alice,20"]);

        assert!(!output.status.success());
        assert!(stderr(&output).contains("Unsupported format."));
        assert!(stdout(&output).is_empty());
    }

    #[test]
    fn test_missing_input() {
        let output = run(&["convert", "--tool", "format"]);

        assert!(!output.status.success());
        assert!(stderr(&output).contains("No input provided"));
    }
}

#[cfg(test)]
mod redaction_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_redact_with_asterisks() {
        let output = run(&["redact", "--mask", "asterisks", "Contact me at a@test.com"]);

        assert!(output.status.success());
        assert_eq!(stdout(&output), "Contact me at ***\n");
    }

    #[test]
    fn test_redact_json_keys() {
        let output = run_stdin(
            &["redact", "--stdin", "--rules", "email", "--advanced", "--json-key", "password"],
            r#"{"password":"secret","owner":"a@test.com"}"#,
        );

        assert!(output.status.success());
        assert_eq!(
            stdout(&output),
            "{\n  \"password\": \"[REDACTED]\",\n  \"owner\": \"[REDACTED]\"\n}\n"
        );
    }

    #[test]
    fn test_json_key_without_advanced_warns() {
        let output = run(&["redact", "--json-key", "password", r#"{"password":"secret"}"#]);

        assert!(output.status.success());
        assert!(stderr(&output).contains("--json-key has no effect without --advanced"));
        assert_eq!(stdout(&output), "{\"password\":\"secret\"}\n");
    }

    #[test]
    fn test_detect_json_report() {
        let output = run(&["detect", "--json", "mail a@test.com from 10.0.0.1"]);

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["summary"]["emails"], 1);
        assert_eq!(report["summary"]["ips"], 1);
        assert_eq!(report["sample"][0]["kind"], "email");
        assert_eq!(report["sample"][0]["after"], "[REDACTED]");
    }

    #[test]
    fn test_detect_text_report() {
        let output = run(&["detect", "a@test.com"]);

        assert!(output.status.success());
        assert_eq!(
            stdout(&output),
            "Detected: 1 emails, 0 phones, 0 ips, 0 tokens, 0 customs\n  email: a@test.com -> [REDACTED]\n"
        );
    }

    #[test]
    fn test_detect_clean_text() {
        let output = run(&["detect", "nothing to see here"]);

        assert!(output.status.success());
        assert_eq!(stdout(&output), "No sensitive data detected\n");
    }

    #[test]
    fn test_config_file_rules() {
        let mut config = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            config,
            r#"{{"quickRules":{{}},"includeAdvanced":true,"advanced":{{"customRegexRules":[{{"name":"acct","pattern":"ACC-\\d{{4}}","flags":"i"}}],"maskStyle":"ASTERISKS"}}}}"#
        )
        .unwrap();

        let output = run(&[
            "redact",
            "--config",
            config.path().to_str().unwrap(),
            "acc-1234 and a@test.com",
        ]);

        assert!(output.status.success());
        assert_eq!(stdout(&output), "*** and a@test.com\n");
    }

    #[test]
    fn test_invalid_rule_is_redact_error() {
        let mut config = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(
            config,
            "includeAdvanced: true\nadvanced:\n  customRegexRules:\n    - name: broken\n      pattern: \"(\"\n"
        )
        .unwrap();

        let output = run(&["detect", "--config", config.path().to_str().unwrap(), "text"]);

        assert!(!output.status.success());
        let err = stderr(&output);
        assert!(err.contains("Redact error: We could not complete redaction."));
        assert!(err.contains("broken"));
    }
}
