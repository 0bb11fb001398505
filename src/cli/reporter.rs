use anyhow::{Context, Result};
use colored::Colorize;
use rustc_hash::FxHashMap;
use serde::Serialize;

use unawait_common::LineMap;
use unawait_common::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, RULES,
};

use super::driver::AnalysisResult;

/// Renders diagnostics as text. `pretty` output is colored, uses the
/// `file:line:col - category CODE: message` form and adds a source snippet;
/// plain output uses `file(line,col): category CODE: message`.
pub struct Reporter {
    pretty: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(pretty: bool) -> Self {
        Reporter {
            pretty,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Register the text diagnostics in `file` point into.
    pub fn add_source(&mut self, file: &str, text: &str) {
        self.line_maps.insert(file.to_string(), LineMap::build(text));
        self.sources.insert(file.to_string(), text.to_string());
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|diagnostic| self.format_diagnostic(diagnostic))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every diagnostic of `result` followed by a summary line.
    pub fn render_result(&self, result: &AnalysisResult) -> String {
        let diagnostics: Vec<Diagnostic> = result.diagnostics().cloned().collect();
        let mut out = self.render(&diagnostics);
        let fixed = result.fixed_files().count();
        if fixed > 0 {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&format!(
                "Fixed {} {}.",
                fixed,
                plural(fixed, "file", "files")
            ));
        }
        if !diagnostics.is_empty() {
            let files = result
                .files
                .iter()
                .filter(|file| !file.diagnostics.is_empty())
                .count();
            out.push_str("\n\n");
            out.push_str(&format!(
                "Found {} {} in {} {}.",
                diagnostics.len(),
                plural(diagnostics.len(), "problem", "problems"),
                files,
                plural(files, "file", "files")
            ));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = self
            .format_location(&diagnostic.file, diagnostic.start)
            .unwrap_or_else(|| display_file(&diagnostic.file));
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = location;
        output.push_str(if self.pretty { " - " } else { ": " });
        output.push_str(&category);
        output.push(' ');
        output.push_str(&code);
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
            if let Some(snippet) = self.format_snippet(&related.file, related.start, related.length)
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// The source line holding `start`, underlined from `start` to the end of
    /// the span or of the line. Pretty output only.
    fn format_snippet(&self, file: &str, start: u32, length: u32) -> Option<String> {
        if !self.pretty || length == 0 {
            return None;
        }
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        let position = line_map.offset_to_position(start, source);
        let line_start = line_map.line_start(position.line as usize)? as usize;
        let line_text = line_map.line_text(position.line as usize, source)?;

        let column = (start as usize).saturating_sub(line_start).min(line_text.len());
        let span_end = ((start + length) as usize)
            .saturating_sub(line_start)
            .min(line_text.len());
        let prefix: String = line_text
            .get(..column)
            .unwrap_or("")
            .chars()
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();
        let width = line_text
            .get(column..span_end)
            .map_or(1, |span| span.chars().count().max(1));
        let underline = "~".repeat(width);

        Some(format!(
            "\n\n  {:>3}   {}\n        {}{}\n",
            position.line + 1,
            line_text,
            prefix,
            underline.red()
        ))
    }

    fn format_related(&self, related: &DiagnosticRelatedInformation) -> String {
        let location = self
            .format_location(&related.file, related.start)
            .unwrap_or_else(|| display_file(&related.file));
        let prefix = if self.pretty {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };
        format!("{}: {}: {}", prefix, location, related.message_text)
    }

    fn format_location(&self, file: &str, offset: u32) -> Option<String> {
        let source = self.sources.get(file)?;
        let position = self.line_maps.get(file)?.offset_to_position(offset, source);
        let (line, column) = (position.line + 1, position.character + 1);
        Some(if self.pretty {
            format!("{}:{}:{}", file.cyan(), line.to_string().yellow(), column.to_string().yellow())
        } else {
            format!("{file}({line},{column})")
        })
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.pretty {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    /// Rule id for rule diagnostics (`UA0001`), `UA<code>` for the rest.
    fn format_code(&self, code: u32) -> String {
        let label = RULES
            .iter()
            .find(|rule| rule.code == code)
            .map_or_else(|| format!("UA{code}"), |rule| rule.id.to_string());
        if self.pretty {
            label.bright_black().to_string()
        } else {
            label
        }
    }
}

fn display_file(file: &str) -> String {
    if file.is_empty() {
        "<unknown>".to_string()
    } else {
        file.to_string()
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    fixed_files: Vec<&'a str>,
}

/// `result` as a JSON document: `{ "diagnostics": [...], "fixedFiles": [...] }`.
pub fn render_json(result: &AnalysisResult) -> Result<String> {
    let report = JsonReport {
        diagnostics: result.diagnostics().collect(),
        fixed_files: result
            .fixed_files()
            .map(|file| file.file_name.as_str())
            .collect(),
    };
    serde_json::to_string_pretty(&report).context("failed to serialize diagnostics")
}
