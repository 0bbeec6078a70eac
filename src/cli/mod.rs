//! Command-line interface module

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

use crate::conversion::{convert, ToolId};
use crate::error::{classify, ConversionError, ErrorContext};
use crate::formatter::to_pretty_json;
use crate::parser::InputSource;
use crate::redaction::{
    apply_redaction, detect_sensitive, Detection, MaskStyle, QuickRules, RedactionConfig,
};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "scrubconv")]
#[command(about = "Convert JSON, CSV and YAML, and redact sensitive data, all locally")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert between JSON, CSV and YAML, or normalize with `format`
    Convert {
        /// Conversion to run
        #[arg(short, long)]
        tool: Tool,

        #[command(flatten)]
        input: InputArgs,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report sensitive data without changing anything
    Detect {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        rules: RuleArgs,

        /// Print the summary and sample as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mask sensitive data
    Redact {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Context failures of this command are classified under
    pub fn error_context(&self) -> ErrorContext {
        match self {
            Commands::Convert {
                tool: Tool::Format, ..
            } => ErrorContext::Format,
            Commands::Convert { .. } => ErrorContext::Convert,
            Commands::Detect { .. } => ErrorContext::Preview,
            Commands::Redact { .. } => ErrorContext::Redact,
        }
    }
}

/// Where the input text comes from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input text, or a path to a file containing it
    #[arg()]
    pub input: Option<String>,

    /// Read input from standard input
    #[arg(long)]
    pub stdin: bool,
}

impl InputArgs {
    pub fn source(&self) -> Result<InputSource> {
        InputSource::from_arg(self.input.as_deref(), self.stdin)
            .context("No input provided. Use --stdin or provide input text or a file path")
    }

    pub fn read(&self) -> Result<String> {
        let source = self.source()?;
        tracing::debug!(source = %source.description(), "reading input");
        source
            .read_content()
            .with_context(|| format!("Failed to read {}", source.description()))
    }
}

/// Redaction rule selection
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Redaction config file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Quick rules to enable (default without --config: all)
    #[arg(long, value_delimiter = ',')]
    pub rules: Option<Vec<QuickRule>>,

    /// Include advanced rules: custom regexes and JSON keys
    #[arg(long)]
    pub advanced: bool,

    /// JSON key whose value is masked (repeatable, needs --advanced)
    #[arg(long = "json-key")]
    pub json_keys: Vec<String>,

    /// Mask style
    #[arg(long)]
    pub mask: Option<Mask>,
}

impl RuleArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn build_config(&self) -> Result<RedactionConfig> {
        let mut config = match &self.config {
            Some(path) => load_redaction_config(path)?,
            None => RedactionConfig::quick_only(QuickRules::all()),
        };

        if let Some(rules) = &self.rules {
            config.quick_rules = QuickRules::none();
            for rule in rules {
                match rule {
                    QuickRule::Email => config.quick_rules.email = true,
                    QuickRule::Phone => config.quick_rules.phone = true,
                    QuickRule::Ip => config.quick_rules.ip = true,
                    QuickRule::Token => config.quick_rules.token = true,
                }
            }
        }
        if self.advanced {
            config.include_advanced = true;
        }
        config.advanced.json_keys.extend(self.json_keys.iter().cloned());
        if let Some(mask) = self.mask {
            config.advanced.mask_style = mask.into();
        }

        Ok(config)
    }
}

/// Conversion tools for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    #[value(name = "json-csv")]
    JsonCsv,
    #[value(name = "csv-json")]
    CsvJson,
    #[value(name = "yaml-json")]
    YamlJson,
    #[value(name = "json-yaml")]
    JsonYaml,
    #[value(name = "format")]
    Format,
}

impl From<Tool> for ToolId {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::JsonCsv => ToolId::JsonCsv,
            Tool::CsvJson => ToolId::CsvJson,
            Tool::YamlJson => ToolId::YamlJson,
            Tool::JsonYaml => ToolId::JsonYaml,
            Tool::Format => ToolId::Format,
        }
    }
}

/// Quick rule names for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRule {
    Email,
    Phone,
    Ip,
    Token,
}

/// Mask styles for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    Redacted,
    Asterisks,
    Hash,
}

impl From<Mask> for MaskStyle {
    fn from(mask: Mask) -> Self {
        match mask {
            Mask::Redacted => MaskStyle::Redacted,
            Mask::Asterisks => MaskStyle::Asterisks,
            Mask::Hash => MaskStyle::Hash,
        }
    }
}

/// Load a redaction config; `.yaml`/`.yml` files are YAML, others JSON
pub fn load_redaction_config(path: &Path) -> Result<RedactionConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read redaction config {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let config = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid redaction config {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid redaction config {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), "loaded redaction config");
    Ok(config)
}

/// Execute the parsed command
pub fn run(args: &Args) -> Result<()> {
    match &args.command {
        Commands::Convert {
            tool,
            input,
            output,
        } => {
            let content = input.read()?;
            let converted = convert((*tool).into(), &content)?;
            write_output(output.as_deref(), &converted, args.quiet)
        }
        Commands::Detect { input, rules, json } => {
            let config = rules.build_config()?;
            warn_on_inactive_keys(rules, &config, args.quiet);
            let content = input.read()?;
            let detection = detect_sensitive(&content, &config)?;
            if *json {
                println!("{}", to_pretty_json(&detection)?);
            } else {
                print_detection(&detection);
            }
            Ok(())
        }
        Commands::Redact {
            input,
            rules,
            output,
        } => {
            let config = rules.build_config()?;
            warn_on_inactive_keys(rules, &config, args.quiet);
            let content = input.read()?;
            let redacted = apply_redaction(&content, &config)?;
            write_output(output.as_deref(), &redacted, args.quiet)
        }
    }
}

fn warn_on_inactive_keys(rules: &RuleArgs, config: &RedactionConfig, quiet: bool) {
    if !rules.json_keys.is_empty() && !config.include_advanced {
        CliUtils::show_warning("--json-key has no effect without --advanced", quiet);
    }
}

/// Write to a file (creating parent directories) or to stdout
pub fn write_output(path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    match path {
        Some(output_path) => {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(output_path, content)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            CliUtils::show_success(&format!("Wrote {}", output_path.display()), quiet);
        }
        None if content.ends_with('\n') => print!("{}", content),
        None => println!("{}", content),
    }
    Ok(())
}

fn print_detection(detection: &Detection) {
    let summary = &detection.summary;
    if summary.total() == 0 {
        println!("No sensitive data detected");
        return;
    }
    let label = if CliUtils::should_use_color() {
        style("Detected:").bold().to_string()
    } else {
        "Detected:".to_string()
    };
    println!(
        "{} {} emails, {} phones, {} ips, {} tokens, {} customs",
        label, summary.emails, summary.phones, summary.ips, summary.tokens, summary.customs
    );
    for sample in &detection.sample {
        println!("  {}: {} -> {}", sample.kind, sample.before, sample.after);
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if quiet {
            return;
        }
        if Self::should_use_color() {
            eprintln!("{} {}", style("✓").green(), message);
        } else {
            eprintln!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        if Self::should_use_color() {
            eprintln!("{} {}", style("✗").red(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stderr) && std::env::var("NO_COLOR").is_err()
    }
}

/// Report a failed command: the classified message, then the cause
pub fn handle_error(context: ErrorContext, error: &anyhow::Error) {
    let raw = format!("{:#}", error);
    let app_error = classify(context, &raw);
    tracing::debug!(stage = ?app_error.stage, "command failed");

    CliUtils::show_error(&app_error.message);
    eprintln!("  cause: {}", cause_line(error, raw));
    eprintln!("\nTry 'scrubconv --help' for usage information.");
}

/// Conversion failures have a one-line form; anything else shows its context chain
fn cause_line(error: &anyhow::Error, chain: String) -> String {
    match error.downcast_ref::<ConversionError>() {
        Some(conversion) => conversion.user_message(),
        None => chain,
    }
}
