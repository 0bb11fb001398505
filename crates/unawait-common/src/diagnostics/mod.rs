//! Diagnostic types, rule descriptors and message lookup.
//!
//! Message data lives in `data.rs`.

use serde::Serialize;

mod data;
pub use data::{
    DIAGNOSTIC_MESSAGES, RULES, UNNECESSARY_ASYNC_AWAIT_RULE, diagnostic_codes, diagnostic_messages,
};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    /// Parse a category name as written in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "suggestion" | "hint" => Some(Self::Suggestion),
            "message" | "info" => Some(Self::Message),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

/// Related information for a diagnostic (e.g., additional await locations).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A reported finding with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Secondary locations attached to the same finding
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new diagnostic with an explicit category.
    #[must_use]
    pub const fn new(
        file: String,
        start: u32,
        length: u32,
        message: String,
        category: DiagnosticCategory,
        code: u32,
    ) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self::new(file, start, length, message, DiagnosticCategory::Error, code)
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, file: String, start: u32, length: u32, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Static description of an analyzer rule.
///
/// The message is fixed text: findings never interpolate data into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    /// Stable identifier shown to users (e.g. `UA0001`).
    pub id: &'static str,
    /// Numeric diagnostic code.
    pub code: u32,
    pub title: &'static str,
    pub message: &'static str,
    /// Rule family (e.g. `Performance`).
    pub category: &'static str,
    pub default_severity: DiagnosticCategory,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Look up a rule by its numeric code or its `UA` identifier.
#[must_use]
pub fn get_rule(code_or_id: &str) -> Option<&'static RuleDescriptor> {
    RULES
        .iter()
        .find(|rule| rule.id.eq_ignore_ascii_case(code_or_id) || rule.code.to_string() == code_or_id)
}

#[cfg(test)]
#[path = "../../tests/diagnostics_tests.rs"]
mod tests;
