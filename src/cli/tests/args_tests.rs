use clap::Parser;
use std::path::{Path, PathBuf};

use super::args::{CliArgs, OutputFormat, Severity};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["unawait"]).expect("default args should parse");

    assert!(args.paths.is_empty());
    assert!(args.project.is_none());
    assert!(!args.fix);
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.wrappers.is_empty());
    assert_eq!(args.severity, None);
    assert_eq!(args.pretty, None);
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "unawait",
        "--project",
        "configs/unawait.json",
        "--fix",
        "--format",
        "JSON",
        "--wrapper",
        "ConfigureAwait",
        "--wrapper",
        "WithCancellation",
        "--severity",
        "warn",
        "--pretty",
        "false",
        "src",
        "Program.cs",
    ])
    .expect("flagged args should parse");

    assert_eq!(
        args.project.as_deref(),
        Some(Path::new("configs/unawait.json"))
    );
    assert!(args.fix);
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.wrappers, vec!["ConfigureAwait", "WithCancellation"]);
    assert_eq!(args.severity, Some(Severity::Warning));
    assert_eq!(args.pretty, Some(false));
    assert_eq!(
        args.paths,
        vec![PathBuf::from("src"), PathBuf::from("Program.cs")]
    );
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["unawait", "--format", "xml"]).is_err());
}
