//! LSP diagnostics and conversion from analyzer diagnostics.

use serde::{Deserialize, Serialize};
use unawait_common::diagnostics::{Diagnostic, DiagnosticCategory};
use unawait_common::{LineMap, Location, Range};

const DIAGNOSTIC_SOURCE: &str = "unawait";

/// Diagnostic severity level (matches LSP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum DiagnosticSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl From<DiagnosticSeverity> for u8 {
    fn from(severity: DiagnosticSeverity) -> u8 {
        severity as u8
    }
}

impl TryFrom<u8> for DiagnosticSeverity {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, <DiagnosticSeverity as TryFrom<u8>>::Error> {
        match value {
            1 => Ok(Self::Error),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Information),
            4 => Ok(Self::Hint),
            _ => Err("invalid diagnostic severity"),
        }
    }
}

impl From<DiagnosticCategory> for DiagnosticSeverity {
    fn from(category: DiagnosticCategory) -> Self {
        match category {
            DiagnosticCategory::Error => DiagnosticSeverity::Error,
            DiagnosticCategory::Warning => DiagnosticSeverity::Warning,
            DiagnosticCategory::Suggestion => DiagnosticSeverity::Hint,
            DiagnosticCategory::Message => DiagnosticSeverity::Information,
        }
    }
}

/// LSP diagnostic payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspDiagnostic {
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<DiagnosticSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_information: Option<Vec<LspDiagnosticRelatedInformation>>,
}

/// Related diagnostic information for LSP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspDiagnosticRelatedInformation {
    pub location: Location,
    pub message: String,
}

/// Convert an analyzer diagnostic to an LSP diagnostic. Related information
/// from other files is dropped.
pub fn convert_diagnostic(diag: &Diagnostic, line_map: &LineMap, source: &str) -> LspDiagnostic {
    let start = line_map.offset_to_position(diag.start, source);
    let end = line_map.offset_to_position(diag.start.saturating_add(diag.length), source);

    let related_information = if diag.related_information.is_empty() {
        None
    } else {
        let items: Vec<_> = diag
            .related_information
            .iter()
            .filter(|related| related.file == diag.file)
            .map(|related| {
                let related_start = line_map.offset_to_position(related.start, source);
                let related_end = line_map
                    .offset_to_position(related.start.saturating_add(related.length), source);
                LspDiagnosticRelatedInformation {
                    location: Location::new(
                        related.file.clone(),
                        Range::new(related_start, related_end),
                    ),
                    message: related.message_text.clone(),
                }
            })
            .collect();

        if items.is_empty() { None } else { Some(items) }
    };

    LspDiagnostic {
        range: Range::new(start, end),
        severity: Some(diag.category.into()),
        code: Some(diag.code),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diag.message_text.clone(),
        related_information,
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
