//! Source discovery, analysis and fix application for the CLI.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use unawait_binder::{BinderState, DeclarationTable};
use unawait_checker::{CheckerContext, CheckerOptions, CheckerState, Finding};
use unawait_common::TextRange;
use unawait_common::diagnostics::Diagnostic;
use unawait_lsp::{TextEdit, apply_edits, plan};
use unawait_parser::{NodeArena, NodeIndex, ParserState};
use unawait_solver::{TypeInterner, WellKnownTypes};

use super::args::CliArgs;
use super::config::{ProjectConfig, ResolvedOptions, find_config, load_config, resolve_options};

/// Extension of analyzed source files.
pub const SOURCE_EXTENSION: &str = "cs";

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Name used in diagnostics (relative to the working directory when possible).
    pub file_name: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub file_name: String,
    pub source: String,
    /// Parse errors and findings, ordered by start offset.
    pub diagnostics: Vec<Diagnostic>,
    pub finding_count: usize,
    /// Rewritten text when `--fix` was requested and the text changed.
    pub fixed_source: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub files: Vec<FileResult>,
}

impl AnalysisResult {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| file.diagnostics.iter())
    }

    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|file| file.diagnostics.len()).sum()
    }

    pub fn has_reports(&self) -> bool {
        self.diagnostic_count() > 0
    }

    pub fn fixed_files(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|file| file.fixed_source.is_some())
    }
}

struct ParsedFile {
    source: SourceFile,
    arena: NodeArena,
    root: NodeIndex,
    parse_diagnostics: Vec<Diagnostic>,
}

/// Run the analysis described by `args` from `cwd`. Fixed files are written
/// back when `--fix` is set.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<AnalysisResult> {
    let config_path = find_config(args.project.as_deref(), cwd)?;
    let (config, base_dir) = match &config_path {
        Some(path) => {
            let base_dir = path.parent().unwrap_or(cwd).to_path_buf();
            (load_config(path)?, base_dir)
        }
        None => (ProjectConfig::default(), cwd.to_path_buf()),
    };
    let options = resolve_options(&config, args, &base_dir)?;

    let roots: Vec<PathBuf> = if args.paths.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        args.paths.iter().map(|path| cwd.join(path)).collect()
    };
    let paths = discover_sources(&roots, &options)?;
    let sources = read_sources(&paths, cwd)?;

    let result = analyze_sources(sources, &options.checker, args.fix);
    if args.fix {
        write_fixes(&result)?;
    }
    Ok(result)
}

/// Every `.cs` file below `roots`, sorted and without excluded paths.
/// Explicitly named files are always included.
pub fn discover_sources(roots: &[PathBuf], options: &ResolvedOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("path not found: {}", root.display());
        }
        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().is_none_or(|ext| ext != SOURCE_EXTENSION)
                || options.is_excluded(path)
            {
                continue;
            }
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    debug!(files = files.len(), "discovered sources");
    Ok(files)
}

pub fn read_sources(paths: &[PathBuf], cwd: &Path) -> Result<Vec<SourceFile>> {
    paths
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .strip_prefix(cwd)
                .unwrap_or(path)
                .display()
                .to_string();
            Ok(SourceFile {
                path: path.clone(),
                file_name,
                text,
            })
        })
        .collect()
}

/// Parse, declare, bind and check `sources`. Declarations are shared across
/// files; everything else runs per file on the rayon pool.
#[tracing::instrument(level = "debug", skip_all, fields(files = sources.len()))]
pub fn analyze_sources(sources: Vec<SourceFile>, options: &CheckerOptions, fix: bool) -> AnalysisResult {
    let interner = TypeInterner::new();
    let parsed: Vec<ParsedFile> = sources.into_par_iter().map(parse_file).collect();

    let mut declarations = DeclarationTable::with_prelude(&interner);
    for file in &parsed {
        declarations.declare_source_file(&interner, &file.arena, file.root);
    }
    let well_known = options.well_known_types(&interner);

    let files = parsed
        .into_par_iter()
        .map(|file| check_file(file, &interner, &declarations, &well_known, options, fix))
        .collect();
    AnalysisResult { files }
}

fn parse_file(source: SourceFile) -> ParsedFile {
    let mut parser = ParserState::new(source.file_name.clone(), source.text.clone());
    let root = parser.parse_source_file();
    let parse_diagnostics = parser
        .get_diagnostics()
        .iter()
        .map(|diag| {
            Diagnostic::error(
                source.file_name.clone(),
                diag.start,
                diag.length,
                diag.message.clone(),
                diag.code,
            )
        })
        .collect();
    ParsedFile {
        source,
        arena: parser.into_arena(),
        root,
        parse_diagnostics,
    }
}

fn check_file(
    file: ParsedFile,
    interner: &TypeInterner,
    declarations: &DeclarationTable,
    well_known: &WellKnownTypes,
    options: &CheckerOptions,
    fix: bool,
) -> FileResult {
    let model = BinderState::new(interner, declarations).bind_source_file(&file.arena, file.root);
    let ctx = CheckerContext::new(&file.arena, &model, interner, well_known, options);
    let findings = CheckerState::new(ctx).check_source_file(file.root);

    // A tree recovered from syntax errors is reported but never rewritten.
    let fixed_source = if fix && file.parse_diagnostics.is_empty() && !findings.is_empty() {
        rewrite(&file.source.text, &fix_edits(&ctx, &findings))
    } else {
        None
    };

    let mut diagnostics = file.parse_diagnostics;
    diagnostics.extend(findings.iter().map(Finding::to_diagnostic));
    diagnostics.sort_by_key(|diag| diag.start);

    FileResult {
        path: file.source.path,
        file_name: file.source.file_name,
        source: file.source.text,
        diagnostics,
        finding_count: findings.len(),
        fixed_source,
    }
}

/// Edits for every finding whose rewrite does not touch an earlier one.
/// A function nested inside a rewritten statement is left for the next run.
fn fix_edits(ctx: &CheckerContext<'_>, findings: &[Finding]) -> Vec<TextEdit> {
    let mut accepted: Vec<TextEdit> = Vec::new();
    for finding in findings {
        let edits = plan(ctx, &finding.unit, &finding.points);
        let overlaps = edits
            .iter()
            .any(|edit| accepted.iter().any(|done| touches(done.range, edit.range)));
        if overlaps {
            debug!(
                function = finding.unit.display_name(),
                "deferring fix nested in another rewrite"
            );
            continue;
        }
        accepted.extend(edits);
    }
    accepted
}

/// `text` with `edits` applied, or `None` when that leaves it unchanged.
pub(super) fn rewrite(text: &str, edits: &[TextEdit]) -> Option<String> {
    let fixed = apply_edits(text, edits);
    (fixed != text).then_some(fixed)
}

fn touches(a: TextRange, b: TextRange) -> bool {
    a.intersects(b) || (a.is_empty() && b.contains_range(a)) || (b.is_empty() && a.contains_range(b))
}

fn write_fixes(result: &AnalysisResult) -> Result<()> {
    for file in result.fixed_files() {
        if let Some(text) = &file.fixed_source {
            std::fs::write(&file.path, text)
                .with_context(|| format!("failed to write {}", file.path.display()))?;
        }
    }
    Ok(())
}
