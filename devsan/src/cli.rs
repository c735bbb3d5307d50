// devsan/src/cli.rs
//! This file defines the command-line interface (CLI) for the devsan application,
//! including all available commands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "devsan",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clean sensitive data from logs and API payloads",
    long_about = "devsan redacts emails, API keys, IP addresses and user-defined patterns from text files by applying an ordered list of regex rules. Patterns with known catastrophic-backtracking shapes are rejected, and every rule runs under iteration, time and output-size guards.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress informational messages. Warnings are still printed.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `devsan` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes an input file or stdin, redacting sensitive information.
    #[command(about = "Sanitizes an input file or stdin, redacting sensitive information.")]
    Sanitize(SanitizeCommand),

    /// Validates and compiles patterns without touching any content.
    #[command(about = "Checks whether patterns would be accepted as redaction rules.")]
    Check(CheckCommand),

    /// Prints the effective, ordered rule list.
    #[command(about = "Prints the effective, ordered rule list.")]
    Rules(RulesCommand),
}

/// Rule selection shared by `sanitize` and `rules`.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleSource {
    /// Path to a rules file (YAML or JSON), applied after the default rules.
    #[arg(long = "rules", short = 'r', value_name = "FILE", help = "Path to a rules file (YAML or JSON), applied after the default rules.")]
    pub rules_file: Option<PathBuf>,

    /// Do not load the built-in email / API key / IPv4 rules.
    #[arg(long = "no-defaults", help = "Do not load the built-in email, API key and IPv4 rules.")]
    pub no_defaults: bool,

    /// Keep only rules with these types (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', value_name = "TYPE", help = "Keep only rules with these types (comma-separated).")]
    pub enable: Vec<String>,

    /// Drop rules with these types (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', value_name = "TYPE", help = "Drop rules with these types (comma-separated).")]
    pub disable: Vec<String>,
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub source: RuleSource,

    /// Copy sanitized output to the system clipboard.
    #[arg(long, short = 'c', help = "Copy sanitized output to the system clipboard.")]
    pub clipboard: bool,

    /// Show a unified diff to highlight the changes made.
    #[arg(long, short = 'D', conflicts_with = "json", help = "Show a unified diff of the original and sanitized text.")]
    pub diff: bool,

    /// Print the full result (output, warnings, per-rule reports) as JSON.
    #[arg(long, help = "Print the full result (output, warnings, per-rule reports) as JSON.")]
    pub json: bool,

    /// Override the per-rule pass cap.
    #[arg(long = "max-iterations", value_name = "N", help = "Override the maximum number of substitution passes per rule.")]
    pub max_iterations: Option<usize>,

    /// Override the per-rule wall-clock budget.
    #[arg(long = "timeout-ms", value_name = "MS", help = "Override the per-rule time budget in milliseconds.")]
    pub timeout_ms: Option<u64>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Patterns to check.
    #[arg(value_name = "PATTERN", required = true, help = "One or more regex patterns to check.")]
    pub patterns: Vec<String>,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    #[command(flatten)]
    pub source: RuleSource,

    /// Print the rule list as JSON.
    #[arg(long, help = "Print the rule list as JSON.")]
    pub json: bool,
}
