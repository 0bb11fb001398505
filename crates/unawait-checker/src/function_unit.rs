//! The unit of analysis: one function-like body and its declared result.

use std::sync::Arc;

use tracing::trace;
use unawait_common::TextRange;
use unawait_parser::{NodeArena, NodeIndex, NodeKind};
use unawait_solver::{TaskResult, TypeId};

use crate::context::CheckerContext;

/// What the declared asynchronous handle produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultShape {
    /// `Task` / `ValueTask`.
    NoValue,
    /// `Task<T>` / `ValueTask<T>`.
    ValueOf(TypeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionBody {
    /// `=> expr`
    Expression(NodeIndex),
    /// `{ ... }`
    Block(NodeIndex),
}

impl FunctionBody {
    pub fn node(self) -> NodeIndex {
        match self {
            FunctionBody::Expression(node) | FunctionBody::Block(node) => node,
        }
    }
}

/// A function, method, local function or lambda with a single-result
/// asynchronous handle as its declared type. Built fresh per analysis and
/// never mutated.
#[derive(Clone, Debug)]
pub struct FunctionUnit {
    pub node: NodeIndex,
    /// `None` for lambdas.
    pub name: Option<Arc<str>>,
    pub declared_type: TypeId,
    pub result_shape: ResultShape,
    pub body: FunctionBody,
    pub is_async: bool,
    /// Range of the `async` keyword.
    pub async_keyword: Option<TextRange>,
}

impl FunctionUnit {
    /// Build the unit for `node`. Returns `None` for anything that is not a
    /// candidate: no body, no declared type, `void`, asynchronous enumerables
    /// and non-handle result types.
    pub fn from_node(ctx: &CheckerContext<'_>, node: NodeIndex) -> Option<FunctionUnit> {
        let data = ctx.arena.function_data(node)?;
        if data.body.is_none() {
            return None;
        }
        let declared_type = ctx.semantics.declared_return_type(node)?;
        if ctx.well_known.is_void(declared_type)
            || ctx.well_known.is_async_enumerable(ctx.types, declared_type)
        {
            trace!(function = ?data.name, "skipping void or enumerable result");
            return None;
        }
        let result_shape = match ctx.well_known.task_result(ctx.types, declared_type)? {
            TaskResult::NoValue => ResultShape::NoValue,
            TaskResult::Value(value) => ResultShape::ValueOf(value),
        };
        let body = if data.is_expression_body {
            FunctionBody::Expression(data.body)
        } else {
            FunctionBody::Block(data.body)
        };
        Some(FunctionUnit {
            node,
            name: data.name.clone(),
            declared_type,
            result_shape,
            body,
            is_async: data.is_async(),
            async_keyword: data.async_keyword,
        })
    }

    /// Name used in logs.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<lambda>")
    }
}

/// Every function-like node of a file, in source order. Local functions
/// and lambdas are included when `include_nested` is set.
pub fn collect_function_nodes(arena: &NodeArena, root: NodeIndex, include_nested: bool) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    arena.walk_descendants(root, |node| match arena.kind(node) {
        Some(NodeKind::FunctionDeclaration(_)) => {
            out.push(node);
            include_nested
        }
        Some(NodeKind::LocalFunctionDeclaration(_) | NodeKind::Lambda(_)) => {
            if include_nested {
                out.push(node);
            }
            include_nested
        }
        _ => true,
    });
    out
}
