//! The eligibility verdict for one function.
//!
//! Three strategies, chosen by body shape:
//!
//! - expression-bodied: the body is a single await of a matching operation
//! - block-bodied, no value: every await is a tail statement or an
//!   `await op; return;` pair and the body never falls through
//! - block-bodied, with value: every return is `return await op;`
//!
//! In all cases no await may be protected and every awaited operation must
//! produce exactly the declared type. The verdict is all-or-nothing.

use tracing::{debug, trace};
use unawait_parser::{NodeArena, NodeIndex, NodeKind};

use crate::context::CheckerContext;
use crate::covariance::matches_declared_type;
use crate::function_unit::{FunctionBody, FunctionUnit, ResultShape};
use crate::protected_scope::block_directly_contains_resource_scope;
use crate::suspension::{EnclosingForm, SuspensionPoint, SuspensionPoints, collect_suspension_points};

#[derive(Clone, Debug)]
pub enum EligibilityVerdict {
    /// Every point converts; points are in source order.
    Eligible(SuspensionPoints),
    Ineligible(RejectionReason),
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible(_))
    }

    pub fn points(&self) -> Option<&[SuspensionPoint]> {
        match self {
            EligibilityVerdict::Eligible(points) => Some(points),
            EligibilityVerdict::Ineligible(_) => None,
        }
    }
}

/// Why a function was rejected. Only used for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    NotAsync,
    NoSuspensionPoints,
    /// A `using` statement or declaration directly in the body block.
    ResourceScopeInBody,
    NotInTailPosition,
    ProtectedScope,
    TypeMismatch,
    /// A `return` whose operand is not an await.
    ReturnWithoutAwait,
    /// The body can complete without reaching a converted point.
    FallsThrough,
}

/// Decide whether every await of `unit` can become a direct return.
pub fn classify(ctx: &CheckerContext<'_>, unit: &FunctionUnit) -> EligibilityVerdict {
    let verdict = classify_inner(ctx, unit);
    match &verdict {
        EligibilityVerdict::Eligible(points) => debug!(
            function = unit.display_name(),
            points = points.len(),
            "eligible"
        ),
        EligibilityVerdict::Ineligible(reason) => trace!(
            function = unit.display_name(),
            ?reason,
            "not eligible"
        ),
    }
    verdict
}

fn classify_inner(ctx: &CheckerContext<'_>, unit: &FunctionUnit) -> EligibilityVerdict {
    use EligibilityVerdict::Ineligible;

    if !unit.is_async {
        return Ineligible(RejectionReason::NotAsync);
    }
    let points = collect_suspension_points(ctx, unit);
    if points.is_empty() {
        return Ineligible(RejectionReason::NoSuspensionPoints);
    }

    let result = match (unit.body, unit.result_shape) {
        (FunctionBody::Expression(_), _) => {
            check_points(unit, &points, &[EnclosingForm::TailExpression])
        }
        (FunctionBody::Block(block), ResultShape::NoValue) => {
            check_no_value_block(ctx.arena, unit, block, &points)
        }
        (FunctionBody::Block(block), ResultShape::ValueOf(_)) => {
            check_value_block(ctx.arena, unit, block, &points)
        }
    };
    match result {
        Ok(()) => EligibilityVerdict::Eligible(points),
        Err(reason) => Ineligible(reason),
    }
}

/// Position, protection and type rules shared by every strategy.
fn check_points(
    unit: &FunctionUnit,
    points: &[SuspensionPoint],
    allowed_forms: &[EnclosingForm],
) -> Result<(), RejectionReason> {
    for point in points {
        if !allowed_forms.contains(&point.enclosing_form) {
            return Err(RejectionReason::NotInTailPosition);
        }
        if point.is_protected {
            return Err(RejectionReason::ProtectedScope);
        }
        if !matches_declared_type(point.resolved_type, unit.declared_type) {
            return Err(RejectionReason::TypeMismatch);
        }
    }
    Ok(())
}

fn check_no_value_block(
    arena: &NodeArena,
    unit: &FunctionUnit,
    block: NodeIndex,
    points: &[SuspensionPoint],
) -> Result<(), RejectionReason> {
    if block_directly_contains_resource_scope(arena, block) {
        return Err(RejectionReason::ResourceScopeInBody);
    }
    check_points(
        unit,
        points,
        &[
            EnclosingForm::TailStatementOfBlock,
            EnclosingForm::ReturnStatementOperand,
        ],
    )?;

    // Every `return;` must be the exit of an `await op; return;` pair.
    for return_statement in return_statements(arena, block) {
        let paired = points
            .iter()
            .any(|point| point.return_statement == return_statement);
        if !paired {
            return Err(RejectionReason::ReturnWithoutAwait);
        }
    }
    if !ends_with_conversion(arena, block, points) {
        return Err(RejectionReason::FallsThrough);
    }
    Ok(())
}

fn check_value_block(
    arena: &NodeArena,
    unit: &FunctionUnit,
    block: NodeIndex,
    points: &[SuspensionPoint],
) -> Result<(), RejectionReason> {
    for return_statement in return_statements(arena, block) {
        let operand = match arena.kind(return_statement) {
            Some(NodeKind::ReturnStatement { expression }) => arena.skip_parentheses(*expression),
            _ => NodeIndex::NONE,
        };
        if !matches!(arena.kind(operand), Some(NodeKind::AwaitExpression { .. })) {
            return Err(RejectionReason::ReturnWithoutAwait);
        }
    }
    // A value-returning point must be the operand itself, not a pair.
    for point in points {
        if point.statement != point.return_statement {
            return Err(RejectionReason::NotInTailPosition);
        }
    }
    check_points(unit, points, &[EnclosingForm::ReturnStatementOperand])
}

/// Return statements of a body, not looking into nested functions.
fn return_statements(arena: &NodeArena, body: NodeIndex) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    arena.walk_descendants(body, |node| {
        if arena.is_function_like(node) {
            return false;
        }
        if matches!(arena.kind(node), Some(NodeKind::ReturnStatement { .. })) {
            out.push(node);
        }
        true
    });
    out
}

/// True when every path through `statement` ends in a converted point, a
/// paired `return;` or a `throw`.
fn ends_with_conversion(arena: &NodeArena, statement: NodeIndex, points: &[SuspensionPoint]) -> bool {
    match arena.kind(statement) {
        Some(NodeKind::Block { statements }) => statements
            .last()
            .is_some_and(|&last| ends_with_conversion(arena, last, points)),
        Some(NodeKind::ExpressionStatement { .. }) => points.iter().any(|point| {
            point.statement == statement
                && point.enclosing_form == EnclosingForm::TailStatementOfBlock
        }),
        Some(NodeKind::ReturnStatement { .. }) => points
            .iter()
            .any(|point| point.return_statement == statement),
        Some(NodeKind::ThrowStatement { .. }) => true,
        Some(NodeKind::IfStatement {
            then_statement,
            else_statement,
            ..
        }) => {
            else_statement.is_some()
                && ends_with_conversion(arena, *then_statement, points)
                && ends_with_conversion(arena, *else_statement, points)
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod tests;
