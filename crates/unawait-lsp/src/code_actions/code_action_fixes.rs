use serde::Serialize;
use unawait_checker::{CheckerContext, Finding};
use unawait_common::LineMap;
use unawait_common::diagnostics::diagnostic_codes;

use super::remove_async::{TextEdit, plan};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixInfo {
    /// The internal name of the code fix (e.g., "removeUnnecessaryAsync").
    pub fix_name: String,
    /// Human-readable description of the fix.
    pub description: String,
    /// The file changes to apply.
    pub changes: Vec<CodeFixFileChange>,
    /// Optional commands to run after applying the fix.
    pub commands: Vec<serde_json::Value>,
    /// An identifier for fix-all support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_id: Option<String>,
    /// Human-readable description of the fix-all action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_all_description: Option<String>,
}

/// A file change in a code fix.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixFileChange {
    pub file_name: String,
    pub text_changes: Vec<CodeFixTextChange>,
}

/// A text change within a file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixTextChange {
    pub start: CodeFixPosition,
    pub end: CodeFixPosition,
    pub new_text: String,
}

/// A position in the tsserver protocol (1-based line/offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeFixPosition {
    pub line: u32,
    pub offset: u32,
}

impl CodeFixPosition {
    fn from_offset(line_map: &LineMap, offset: u32, source: &str) -> Self {
        let position = line_map.offset_to_position(offset, source);
        CodeFixPosition {
            line: position.line + 1,
            offset: position.character + 1,
        }
    }
}

/// Mapping from diagnostic codes to code fix metadata.
pub struct CodeFixRegistry;

impl CodeFixRegistry {
    /// Get code fixes applicable for a given diagnostic code.
    /// Returns a list of (`fix_name`, `fix_id`, `description`, `fix_all_description`) tuples.
    pub fn fixes_for_error_code(
        error_code: u32,
    ) -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
        match error_code {
            diagnostic_codes::UNNECESSARY_ASYNC_AWAIT => vec![(
                "removeUnnecessaryAsync",
                "fixRemoveUnnecessaryAsync",
                "Remove unnecessary 'async' and 'await'",
                "Remove all unnecessary 'async' and 'await'",
            )],
            _ => Vec::new(),
        }
    }

    /// Check if a diagnostic code has any registered code fixes.
    pub fn has_fixes(error_code: u32) -> bool {
        !Self::fixes_for_error_code(error_code).is_empty()
    }
}

/// The UA0001 fix for `finding`, with positions in tsserver form.
pub fn remove_unnecessary_async_fix(ctx: &CheckerContext<'_>, finding: &Finding) -> Option<CodeFixInfo> {
    let (fix_name, fix_id, description, fix_all_description) =
        CodeFixRegistry::fixes_for_error_code(finding.rule.code)
            .into_iter()
            .next()?;
    let edits = plan(ctx, &finding.unit, &finding.points);
    if edits.is_empty() {
        return None;
    }

    let source = ctx.arena.source_text();
    let line_map = LineMap::build(source);
    let text_changes = edits
        .iter()
        .map(|edit| text_change(&line_map, source, edit))
        .collect();

    Some(CodeFixInfo {
        fix_name: fix_name.to_string(),
        description: description.to_string(),
        changes: vec![CodeFixFileChange {
            file_name: finding.file_name.clone(),
            text_changes,
        }],
        commands: Vec::new(),
        fix_id: Some(fix_id.to_string()),
        fix_all_description: Some(fix_all_description.to_string()),
    })
}

fn text_change(line_map: &LineMap, source: &str, edit: &TextEdit) -> CodeFixTextChange {
    CodeFixTextChange {
        start: CodeFixPosition::from_offset(line_map, edit.range.pos, source),
        end: CodeFixPosition::from_offset(line_map, edit.range.end, source),
        new_text: edit.new_text.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/code_action_fixes_tests.rs"]
mod tests;
