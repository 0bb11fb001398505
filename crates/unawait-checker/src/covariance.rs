//! Discard-context unwrapping and the result type check.

use unawait_common::limits::MAX_WRAPPER_UNWRAP_DEPTH;
use unawait_parser::{NodeIndex, NodeKind};
use unawait_solver::TypeId;

use crate::context::CheckerContext;

/// Strip parentheses and discard-context wrapper calls
/// (`op().ConfigureAwait(false)` becomes `op()`).
pub fn unwrap_discard_context(ctx: &CheckerContext<'_>, operation: NodeIndex) -> NodeIndex {
    let mut current = ctx.arena.skip_parentheses(operation);
    for _ in 0..MAX_WRAPPER_UNWRAP_DEPTH {
        match discard_context_receiver(ctx, current) {
            Some(receiver) => current = ctx.arena.skip_parentheses(receiver),
            None => break,
        }
    }
    current
}

/// Receiver of `receiver.Wrapper(..)` when `Wrapper` is a discard-context
/// method.
fn discard_context_receiver(ctx: &CheckerContext<'_>, call: NodeIndex) -> Option<NodeIndex> {
    let NodeKind::CallExpression { callee, .. } = ctx.arena.kind(call)? else {
        return None;
    };
    let callee = ctx.arena.skip_parentheses(*callee);
    let NodeKind::PropertyAccessExpression {
        expression, name, ..
    } = ctx.arena.kind(callee)?
    else {
        return None;
    };
    ctx.well_known
        .is_discard_context_method(name)
        .then_some(*expression)
}

/// Result type of the operation an `await` waits on, after unwrapping.
/// Invocations report their target's declared result type, constructions
/// the constructed type; anything else is unknown.
pub fn resolved_result_type(ctx: &CheckerContext<'_>, operation: NodeIndex) -> Option<TypeId> {
    let unwrapped = unwrap_discard_context(ctx, operation);
    let ty = match ctx.arena.kind(unwrapped)? {
        NodeKind::CallExpression { .. } => ctx.semantics.call_target(unwrapped)?.return_type,
        NodeKind::NewExpression { .. } => ctx.semantics.type_of(unwrapped)?,
        _ => return None,
    };
    ty.is_resolved().then_some(ty)
}

/// Identity comparison; unknown never matches.
pub fn matches_declared_type(resolved: Option<TypeId>, declared: TypeId) -> bool {
    resolved.is_some_and(|ty| ty == declared)
}
