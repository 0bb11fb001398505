//! Per-file driver for the redundant-await check.

use rayon::prelude::*;
use tracing::debug;
use unawait_common::diagnostics::Diagnostic;
use unawait_parser::NodeIndex;

use crate::classifier::{EligibilityVerdict, classify};
use crate::context::CheckerContext;
use crate::finding::Finding;
use crate::function_unit::{FunctionUnit, collect_function_nodes};

/// Checks every function of one bound file.
///
/// Functions are independent of each other, so classification runs on the
/// rayon pool. Results keep source order.
pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(ctx: CheckerContext<'a>) -> Self {
        CheckerState { ctx }
    }

    /// Candidate units of the file, in source order.
    pub fn function_units(&self, root: NodeIndex) -> Vec<FunctionUnit> {
        collect_function_nodes(self.ctx.arena, root, self.ctx.options.analyze_lambdas)
            .into_iter()
            .filter_map(|node| FunctionUnit::from_node(&self.ctx, node))
            .collect()
    }

    /// Verdict for every candidate unit, in source order.
    pub fn classify_all(&self, root: NodeIndex) -> Vec<(FunctionUnit, EligibilityVerdict)> {
        let ctx = self.ctx;
        self.function_units(root)
            .into_par_iter()
            .map(|unit| {
                let verdict = classify(&ctx, &unit);
                (unit, verdict)
            })
            .collect()
    }

    /// Findings for every eligible function, in source order.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.ctx.file_name()))]
    pub fn check_source_file(&self, root: NodeIndex) -> Vec<Finding> {
        let findings: Vec<Finding> = self
            .classify_all(root)
            .into_iter()
            .filter_map(|(unit, verdict)| match verdict {
                EligibilityVerdict::Eligible(points) => {
                    Finding::new(&self.ctx, unit, points.into_vec())
                }
                EligibilityVerdict::Ineligible(_) => None,
            })
            .collect();
        debug!(findings = findings.len(), "checked");
        findings
    }

    /// `check_source_file`, reported as diagnostics.
    pub fn check_source_file_diagnostics(&self, root: NodeIndex) -> Vec<Diagnostic> {
        self.check_source_file(root)
            .iter()
            .map(Finding::to_diagnostic)
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod tests;
