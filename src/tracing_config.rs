//! Log output for the `unawait` binary.
//!
//! `UNAWAIT_LOG` (or `RUST_LOG`) selects what is logged, using `EnvFilter`
//! directives. `UNAWAIT_LOG_FORMAT` selects how:
//!
//! | value  | output                                               |
//! |--------|------------------------------------------------------|
//! | `text` | flat `fmt` lines (default, also for unknown values)  |
//! | `tree` | `tracing-tree`, nested under the per-file span       |
//! | `json` | newline-delimited JSON events                        |
//!
//! ```bash
//! UNAWAIT_LOG=debug UNAWAIT_LOG_FORMAT=tree unawait src/
//! UNAWAIT_LOG="unawait_checker=trace" unawait Service.cs
//! ```
//!
//! Logs always go to stderr; stdout carries findings only.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "UNAWAIT_LOG";
const LOG_FORMAT_VAR: &str = "UNAWAIT_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Directives from `UNAWAIT_LOG`, then `RUST_LOG`. `None` when neither is set.
fn env_filter() -> Option<EnvFilter> {
    match std::env::var(LOG_VAR) {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() => {
            Some(EnvFilter::from_default_env())
        }
        Err(_) => None,
    }
}

/// Install the global subscriber. No-op unless a filter variable is set.
pub fn init_tracing() {
    let Some(filter) = env_filter() else {
        return;
    };
    let format = LogFormat::parse(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default());
    let registry = Registry::default().with(filter);

    match format {
        LogFormat::Tree => registry
            .with(
                tracing_tree::HierarchicalLayer::default()
                    .with_writer(std::io::stderr)
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_targets(true),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn parses_log_formats() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    }
}
