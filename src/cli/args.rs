use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use unawait_common::diagnostics::DiagnosticCategory;

/// CLI arguments for the unawait binary.
#[derive(Parser, Debug)]
#[command(
    name = "unawait",
    version,
    about = "Finds async functions that only forward awaited tasks"
)]
pub struct CliArgs {
    /// Source files or directories to analyze (defaults to the current directory).
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Path to unawait.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Rewrite every reported function in place.
    #[arg(long)]
    pub fix: bool,

    /// Output format for findings.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Method treated as a discard-context wrapper (repeatable; replaces the configured list).
    #[arg(long = "wrapper", value_name = "NAME")]
    pub wrappers: Vec<String>,

    /// Severity of reported findings.
    #[arg(long, value_enum, ignore_case = true)]
    pub severity: Option<Severity>,

    /// Enable color and source snippets in text output.
    #[arg(long)]
    pub pretty: Option<bool>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Severity {
    Error,
    #[value(alias = "warn")]
    Warning,
    #[value(alias = "hint")]
    Suggestion,
    #[value(alias = "info")]
    Message,
}

impl From<Severity> for DiagnosticCategory {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => DiagnosticCategory::Error,
            Severity::Warning => DiagnosticCategory::Warning,
            Severity::Suggestion => DiagnosticCategory::Suggestion,
            Severity::Message => DiagnosticCategory::Message,
        }
    }
}
