//! Editor-facing adapters for the unawait analyzer.
//!
//! This crate provides:
//! - The rewrite planner for UA0001 (`code_actions::remove_async`)
//! - Code fix metadata in tsserver shape (`code_actions::code_action_fixes`)
//! - Conversion of findings to LSP diagnostics

pub mod code_actions;
pub mod diagnostics;

pub use code_actions::{
    CodeFixFileChange, CodeFixInfo, CodeFixPosition, CodeFixRegistry, CodeFixTextChange, TextEdit,
    apply_edits, plan, remove_unnecessary_async_fix,
};
pub use diagnostics::{
    DiagnosticSeverity, LspDiagnostic, LspDiagnosticRelatedInformation, convert_diagnostic,
};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
