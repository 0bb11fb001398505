//! Reported findings.

use unawait_common::TextRange;
use unawait_common::diagnostics::{
    Diagnostic, DiagnosticCategory, RuleDescriptor, UNNECESSARY_ASYNC_AWAIT_RULE,
    diagnostic_messages,
};

use crate::context::CheckerContext;
use crate::function_unit::FunctionUnit;
use crate::suspension::SuspensionPoint;

/// The redundant-await rule.
pub fn rule() -> &'static RuleDescriptor {
    &UNNECESSARY_ASYNC_AWAIT_RULE
}

/// One eligible function, with everything the rewrite needs.
#[derive(Clone, Debug)]
pub struct Finding {
    pub file_name: String,
    /// First await.
    pub primary: TextRange,
    /// The remaining awaits, in source order.
    pub secondary: Vec<TextRange>,
    pub rule: &'static RuleDescriptor,
    pub severity: DiagnosticCategory,
    pub unit: FunctionUnit,
    pub points: Vec<SuspensionPoint>,
}

impl Finding {
    /// Build a finding from an eligible verdict. `points` must be non-empty.
    pub fn new(ctx: &CheckerContext<'_>, unit: FunctionUnit, points: Vec<SuspensionPoint>) -> Option<Finding> {
        let (first, rest) = points.split_first()?;
        let primary = ctx.arena.range(first.await_expression);
        let secondary = rest
            .iter()
            .map(|point| ctx.arena.range(point.await_expression))
            .collect();
        Some(Finding {
            file_name: ctx.file_name().to_string(),
            primary,
            secondary,
            rule: rule(),
            severity: ctx.options.severity,
            unit,
            points,
        })
    }

    /// The finding as a diagnostic; secondary awaits become related
    /// information.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::new(
            self.file_name.clone(),
            self.primary.pos,
            self.primary.len(),
            self.rule.message.to_string(),
            self.severity,
            self.rule.code,
        );
        self.secondary.iter().fold(diagnostic, |diagnostic, range| {
            diagnostic.with_related(
                self.file_name.clone(),
                range.pos,
                range.len(),
                diagnostic_messages::ADDITIONAL_AWAIT_LOCATION.to_string(),
            )
        })
    }
}
