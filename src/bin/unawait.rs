#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use unawait::cli::args::{CliArgs, OutputFormat};
use unawait::cli::driver;
use unawait::cli::reporter::{Reporter, render_json};

/// Nothing was reported.
const EXIT_SUCCESS: u8 = 0;
/// Something was reported, or the run itself failed.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    // Initialize tracing if UNAWAIT_LOG or RUST_LOG is set.
    unawait::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(true) => ExitCode::from(EXIT_FAILURE),
        Ok(false) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Returns whether anything was reported.
fn run(args: &CliArgs) -> Result<bool> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(args, &cwd)?;

    let output = match args.format {
        OutputFormat::Json => render_json(&result)?,
        OutputFormat::Text => {
            let pretty = args
                .pretty
                .unwrap_or_else(|| std::io::stdout().is_terminal());
            let mut reporter = Reporter::new(pretty);
            for file in &result.files {
                reporter.add_source(&file.file_name, &file.source);
            }
            reporter.render_result(&result)
        }
    };
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(result.has_reports())
}
