//! The bound view of one source file.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use unawait_parser::NodeIndex;
use unawait_solver::TypeId;

/// The resolved target of an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallTarget {
    /// Simple name of the invoked operation (`ConfigureAwait`, `Delay`).
    pub name: Arc<str>,
    /// Declared result type, instantiated for the receiver.
    pub return_type: TypeId,
}

/// Type and call information the analysis consumes.
///
/// Every answer may be `None`; callers treat that as "unknown".
pub trait SemanticQueries {
    /// Static type of an expression.
    fn type_of(&self, node: NodeIndex) -> Option<TypeId>;

    /// Resolved target of a `CallExpression`.
    fn call_target(&self, call: NodeIndex) -> Option<&CallTarget>;

    /// Declared result type of a function-like node.
    fn declared_return_type(&self, function: NodeIndex) -> Option<TypeId>;
}

#[derive(Clone, Debug, Default)]
pub struct SemanticModel {
    pub(crate) types: FxHashMap<NodeIndex, TypeId>,
    pub(crate) call_targets: FxHashMap<NodeIndex, CallTarget>,
    pub(crate) return_types: FxHashMap<NodeIndex, TypeId>,
}

impl SemanticModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of expressions with a known type.
    pub fn typed_expression_count(&self) -> usize {
        self.types.len()
    }

    pub fn resolved_call_count(&self) -> usize {
        self.call_targets.len()
    }
}

impl SemanticQueries for SemanticModel {
    fn type_of(&self, node: NodeIndex) -> Option<TypeId> {
        self.types.get(&node).copied()
    }

    fn call_target(&self, call: NodeIndex) -> Option<&CallTarget> {
        self.call_targets.get(&call)
    }

    fn declared_return_type(&self, function: NodeIndex) -> Option<TypeId> {
        self.return_types.get(&function).copied()
    }
}
