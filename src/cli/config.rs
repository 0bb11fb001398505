//! `unawait.json` project configuration.

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use unawait_checker::CheckerOptions;
use unawait_common::diagnostics::DiagnosticCategory;

use super::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "unawait.json";

/// Custom deserializer for boolean options that accepts both bool and string values.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub discard_context_methods: Option<Vec<String>>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub analyze_lambdas: Option<bool>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

/// Configuration after merging the project file with command-line flags.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub checker: CheckerOptions,
    /// Directory the exclude patterns are relative to.
    pub base_dir: PathBuf,
    pub exclude: GlobSet,
}

impl ResolvedOptions {
    pub fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        self.exclude.is_match(relative) || self.exclude.is_match(path)
    }
}

pub fn parse_config(source: &str) -> Result<ProjectConfig> {
    let normalized = strip_jsonc(source);
    let config =
        serde_json::from_str(&normalized).context("failed to parse unawait.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// The config file named by `--project` (a file or a directory holding
/// `unawait.json`), or `unawait.json` in `cwd` when present.
pub fn find_config(project: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        return Ok(candidate.is_file().then_some(candidate));
    };
    let project = cwd.join(project);
    let path = if project.is_dir() {
        project.join(CONFIG_FILE_NAME)
    } else {
        project
    };
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    Ok(Some(path))
}

/// Merge `config` with the command line. Flags win over the file.
pub fn resolve_options(config: &ProjectConfig, args: &CliArgs, base_dir: &Path) -> Result<ResolvedOptions> {
    let mut checker = CheckerOptions::default();

    if let Some(methods) = &config.discard_context_methods {
        checker.discard_context_methods = methods.clone();
    }
    if !args.wrappers.is_empty() {
        checker.discard_context_methods = args.wrappers.clone();
    }

    if let Some(severity) = config.severity.as_deref() {
        checker.severity = parse_severity(severity)?;
    }
    if let Some(severity) = args.severity {
        checker.severity = severity.into();
    }

    if let Some(analyze_lambdas) = config.analyze_lambdas {
        checker.analyze_lambdas = analyze_lambdas;
    }

    let exclude = build_glob_set(config.exclude.as_deref().unwrap_or_default())?;
    Ok(ResolvedOptions {
        checker,
        base_dir: base_dir.to_path_buf(),
        exclude,
    })
}

fn parse_severity(value: &str) -> Result<DiagnosticCategory> {
    match DiagnosticCategory::from_name(value) {
        Some(category) => Ok(category),
        None => bail!("unsupported severity '{}'", value),
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to compile exclude patterns")
}

/// Drop `//` and `/* */` comments and trailing commas before `}` or `]`,
/// leaving string contents alone.
fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    previous = next;
                }
            }
            ',' => {
                let rest = chars.clone().find(|next| !next.is_whitespace());
                if !matches!(rest, Some('}' | ']')) {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}
