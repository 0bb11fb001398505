//! Rewrite planner for UA0001: turn every await of an eligible function
//! into a direct return of the awaited handle and drop `async`.

use serde::Serialize;
use tracing::{debug, warn};
use unawait_checker::covariance::unwrap_discard_context;
use unawait_checker::{CheckerContext, EnclosingForm, FunctionUnit, SuspensionPoint};
use unawait_common::TextRange;

/// Replace `range` (byte offsets) with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

impl TextEdit {
    pub const fn new(range: TextRange, new_text: String) -> Self {
        TextEdit { range, new_text }
    }
}

/// Edits converting `points` of `unit`, in descending position order.
///
/// `points` must come from `EligibilityVerdict::Eligible` for `unit`;
/// eligibility is not re-checked here.
pub fn plan(ctx: &CheckerContext<'_>, unit: &FunctionUnit, points: &[SuspensionPoint]) -> Vec<TextEdit> {
    let arena = ctx.arena;
    let mut edits: Vec<TextEdit> = points
        .iter()
        .filter_map(|point| {
            let operation = arena.text_of(unwrap_discard_context(ctx, point.operation));
            match point.enclosing_form {
                EnclosingForm::TailExpression => Some(TextEdit::new(
                    arena.range(unit.body.node()),
                    operation.to_string(),
                )),
                EnclosingForm::TailStatementOfBlock => Some(TextEdit::new(
                    arena.range(point.statement),
                    format!("return {operation};"),
                )),
                EnclosingForm::ReturnStatementOperand => {
                    let exit = if point.return_statement.is_some() {
                        point.return_statement
                    } else {
                        point.statement
                    };
                    let range = arena.range(point.statement).cover(arena.range(exit));
                    Some(TextEdit::new(range, format!("return {operation};")))
                }
                EnclosingForm::Other => None,
            }
        })
        .collect();

    if let Some(keyword) = unit.async_keyword {
        edits.push(TextEdit::new(
            extend_over_whitespace(arena.source_text(), keyword),
            String::new(),
        ));
    }

    edits.sort_by(|a, b| b.range.pos.cmp(&a.range.pos));
    debug!(
        function = unit.display_name(),
        edits = edits.len(),
        "planned rewrite"
    );
    edits
}

/// `keyword` plus the whitespace that follows it.
fn extend_over_whitespace(text: &str, keyword: TextRange) -> TextRange {
    let rest = text.get(keyword.end as usize..).unwrap_or("");
    let trailing = rest.len() - rest.trim_start().len();
    TextRange::new(keyword.pos, keyword.end + trailing as u32)
}

/// Apply `edits` to `text`. Edits are applied from the highest offset down,
/// so earlier ranges stay valid; an edit whose range does not fit the text
/// is skipped.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.range.pos.cmp(&a.range.pos));

    let mut result = text.to_string();
    for edit in ordered {
        let (start, end) = (edit.range.pos as usize, edit.range.end as usize);
        if start > end
            || end > result.len()
            || !result.is_char_boundary(start)
            || !result.is_char_boundary(end)
        {
            warn!(range = ?edit.range, "skipping edit outside the text");
            continue;
        }
        result.replace_range(start..end, &edit.new_text);
    }
    result
}

#[cfg(test)]
#[path = "../../tests/remove_async_tests.rs"]
mod tests;
