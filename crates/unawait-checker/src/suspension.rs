//! Suspension point discovery.

use smallvec::SmallVec;
use unawait_parser::{NodeArena, NodeIndex, NodeKind};
use unawait_solver::TypeId;

use crate::context::CheckerContext;
use crate::covariance::resolved_result_type;
use crate::function_unit::{FunctionBody, FunctionUnit};
use crate::protected_scope::is_inside_protected_scope;

/// Where an `await` sits relative to the function's exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnclosingForm {
    /// The whole body of an expression-bodied function.
    TailExpression,
    /// An expression statement in tail position of the body.
    TailStatementOfBlock,
    /// `return await op;`, or `await op;` directly followed by `return;`.
    ReturnStatementOperand,
    Other,
}

/// One `await` of a function body (nested functions excluded).
#[derive(Clone, Debug)]
pub struct SuspensionPoint {
    pub await_expression: NodeIndex,
    /// The awaited expression with parentheses removed.
    pub operation: NodeIndex,
    pub enclosing_form: EnclosingForm,
    /// Statement containing the await; `NONE` for expression bodies.
    pub statement: NodeIndex,
    /// The `return` that exits the function, for `ReturnStatementOperand`.
    pub return_statement: NodeIndex,
    pub is_protected: bool,
    pub resolved_type: Option<TypeId>,
}

pub type SuspensionPoints = SmallVec<[SuspensionPoint; 2]>;

/// All suspension points of `unit`, in source order.
pub fn collect_suspension_points(ctx: &CheckerContext<'_>, unit: &FunctionUnit) -> SuspensionPoints {
    let arena = ctx.arena;
    let body = unit.body.node();
    let mut awaits: SmallVec<[NodeIndex; 4]> = SmallVec::new();
    if matches!(arena.kind(body), Some(NodeKind::AwaitExpression { .. })) {
        awaits.push(body);
    }
    arena.walk_descendants(body, |node| {
        if arena.is_function_like(node) {
            return false;
        }
        if matches!(arena.kind(node), Some(NodeKind::AwaitExpression { .. })) {
            awaits.push(node);
        }
        true
    });

    awaits
        .into_iter()
        .map(|await_expression| describe_point(ctx, unit, await_expression))
        .collect()
}

fn describe_point(ctx: &CheckerContext<'_>, unit: &FunctionUnit, await_expression: NodeIndex) -> SuspensionPoint {
    let arena = ctx.arena;
    let operation = match arena.kind(await_expression) {
        Some(NodeKind::AwaitExpression { expression }) => arena.skip_parentheses(*expression),
        _ => NodeIndex::NONE,
    };
    let (enclosing_form, statement, return_statement) = enclosing_form(arena, unit, await_expression);
    SuspensionPoint {
        await_expression,
        operation,
        enclosing_form,
        statement,
        return_statement,
        is_protected: is_inside_protected_scope(arena, unit.node, await_expression),
        resolved_type: resolved_result_type(ctx, operation),
    }
}

/// Form, containing statement and exiting return of one await.
fn enclosing_form(
    arena: &NodeArena,
    unit: &FunctionUnit,
    await_expression: NodeIndex,
) -> (EnclosingForm, NodeIndex, NodeIndex) {
    let parent = arena.parent_skipping_parentheses(await_expression);

    if let FunctionBody::Expression(body) = unit.body {
        let form = if parent == unit.node && arena.skip_parentheses(body) == await_expression {
            EnclosingForm::TailExpression
        } else {
            EnclosingForm::Other
        };
        return (form, NodeIndex::NONE, NodeIndex::NONE);
    }

    match arena.kind(parent) {
        Some(NodeKind::ReturnStatement { .. }) => {
            (EnclosingForm::ReturnStatementOperand, parent, parent)
        }
        Some(NodeKind::ExpressionStatement { .. }) => {
            if let Some(bare_return) = following_bare_return(arena, parent) {
                (EnclosingForm::ReturnStatementOperand, parent, bare_return)
            } else if is_tail_statement(arena, unit.body.node(), parent) {
                (EnclosingForm::TailStatementOfBlock, parent, NodeIndex::NONE)
            } else {
                (EnclosingForm::Other, parent, NodeIndex::NONE)
            }
        }
        _ => (
            EnclosingForm::Other,
            containing_statement(arena, unit.node, await_expression),
            NodeIndex::NONE,
        ),
    }
}

/// The bare `return;` directly after `statement` in its block.
pub(crate) fn following_bare_return(arena: &NodeArena, statement: NodeIndex) -> Option<NodeIndex> {
    let NodeKind::Block { statements } = arena.kind(arena.parent(statement))? else {
        return None;
    };
    let position = statements.iter().position(|&s| s == statement)?;
    let next = *statements.get(position + 1)?;
    match arena.kind(next)? {
        NodeKind::ReturnStatement { expression } if expression.is_none() => Some(next),
        _ => None,
    }
}

/// True when `statement` is the last statement of `body`, or the last
/// statement of a block that is itself in tail position. `if`/`else`
/// branches in tail position are in tail position.
pub(crate) fn is_tail_statement(arena: &NodeArena, body: NodeIndex, statement: NodeIndex) -> bool {
    let mut current = statement;
    loop {
        if current == body {
            return true;
        }
        let parent = arena.parent(current);
        match arena.kind(parent) {
            Some(NodeKind::Block { statements }) => {
                if statements.last() != Some(&current) {
                    return false;
                }
            }
            Some(NodeKind::IfStatement {
                then_statement,
                else_statement,
                ..
            }) => {
                if current != *then_statement && current != *else_statement {
                    return false;
                }
            }
            _ => return false,
        }
        current = parent;
    }
}

/// Innermost statement-level ancestor of `node` below `function`.
fn containing_statement(arena: &NodeArena, function: NodeIndex, node: NodeIndex) -> NodeIndex {
    let mut current = node;
    for ancestor in arena.ancestors(node) {
        if ancestor == function {
            break;
        }
        if matches!(arena.kind(ancestor), Some(NodeKind::Block { .. })) {
            return current;
        }
        current = ancestor;
    }
    NodeIndex::NONE
}
