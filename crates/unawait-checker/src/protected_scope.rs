//! Exception and resource scopes.
//!
//! Returning a handle instead of awaiting it moves completion outside any
//! enclosing `try` or `using`: exceptions are no longer caught there and
//! resources are disposed before the operation finishes.

use unawait_parser::{NodeArena, NodeIndex, NodeKind};

/// `try`, `using (...)` and `using var` nodes.
pub fn is_protective(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::TryStatement { .. }
            | NodeKind::UsingStatement { .. }
            | NodeKind::VariableStatement { is_using: true, .. }
    )
}

/// `using (...)` and `using var` nodes.
pub fn is_resource_scope(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::UsingStatement { .. } | NodeKind::VariableStatement { is_using: true, .. }
    )
}

/// True when `node` is inside a protective construct below `function`, or
/// when the smallest block enclosing `node` contains one anywhere.
pub fn is_inside_protected_scope(arena: &NodeArena, function: NodeIndex, node: NodeIndex) -> bool {
    let mut enclosing_block = NodeIndex::NONE;
    for ancestor in arena.ancestors(node) {
        if ancestor == function {
            break;
        }
        let Some(kind) = arena.kind(ancestor) else {
            break;
        };
        if is_protective(kind) {
            return true;
        }
        if enclosing_block.is_none() && matches!(kind, NodeKind::Block { .. }) {
            enclosing_block = ancestor;
        }
    }
    enclosing_block.is_some() && block_contains_protective(arena, enclosing_block)
}

/// Any protective construct below `block`, not looking into nested
/// function-like nodes.
pub fn block_contains_protective(arena: &NodeArena, block: NodeIndex) -> bool {
    let mut found = false;
    arena.walk_descendants(block, |node| {
        if found || arena.is_function_like(node) {
            return false;
        }
        if arena.kind(node).is_some_and(is_protective) {
            found = true;
            return false;
        }
        true
    });
    found
}

/// A resource scope among the direct statements of `block`.
pub fn block_directly_contains_resource_scope(arena: &NodeArena, block: NodeIndex) -> bool {
    let Some(NodeKind::Block { statements }) = arena.kind(block) else {
        return false;
    };
    statements
        .iter()
        .any(|&statement| arena.kind(statement).is_some_and(is_resource_scope))
}
