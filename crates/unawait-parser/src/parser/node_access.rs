//! NodeArena access and traversal methods.

use smallvec::SmallVec;
use unawait_common::TextRange;

use super::base::NodeIndex;
use super::node::{FunctionData, Node, NodeArena, NodeKind};

/// Child list; most nodes have at most four children.
pub type ChildList = SmallVec<[NodeIndex; 4]>;

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<&NodeKind> {
        self.get(index).map(|node| &node.kind)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    /// Source range of a node; empty at 0 for `NONE`.
    #[inline]
    pub fn range(&self, index: NodeIndex) -> TextRange {
        self.get(index).map_or(TextRange::default(), |node| node.range)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn file_name(&self) -> &str {
        &self.source.file_name
    }

    pub fn source_text(&self) -> &str {
        &self.source.text
    }

    /// Source text covered by a node.
    pub fn text_of(&self, index: NodeIndex) -> &str {
        self.range(index).slice(&self.source.text)
    }

    /// Function payload for any function-like node.
    pub fn function_data(&self, index: NodeIndex) -> Option<&FunctionData> {
        match self.kind(index)? {
            NodeKind::FunctionDeclaration(data)
            | NodeKind::LocalFunctionDeclaration(data)
            | NodeKind::Lambda(data) => Some(data),
            _ => None,
        }
    }

    /// True for nodes that open their own function body.
    pub fn is_function_like(&self, index: NodeIndex) -> bool {
        self.function_data(index).is_some()
    }

    /// Skip any number of enclosing parentheses.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(NodeKind::ParenthesizedExpression { expression }) = self.kind(index) {
            index = *expression;
        }
        index
    }

    /// Parent, skipping parenthesized-expression wrappers.
    pub fn parent_skipping_parentheses(&self, index: NodeIndex) -> NodeIndex {
        let mut parent = self.parent(index);
        while let Some(NodeKind::ParenthesizedExpression { .. }) = self.kind(parent) {
            parent = self.parent(parent);
        }
        parent
    }

    /// Iterate ancestors from the parent outwards.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.parent(index).into_option(), move |&current| {
            self.parent(current).into_option()
        })
    }

    /// Children of a node in source order. Absent optional children are
    /// omitted.
    pub fn children(&self, index: NodeIndex) -> ChildList {
        let mut out = ChildList::new();
        let Some(kind) = self.kind(index) else {
            return out;
        };
        let mut push = |child: NodeIndex| {
            if child.is_some() {
                out.push(child);
            }
        };
        match kind {
            NodeKind::SourceFile { items } => items.iter().copied().for_each(push),
            NodeKind::ClassDeclaration { members, .. } => members.iter().copied().for_each(push),
            NodeKind::FunctionDeclaration(data)
            | NodeKind::LocalFunctionDeclaration(data)
            | NodeKind::Lambda(data) => {
                push(data.return_type);
                data.parameters.iter().copied().for_each(&mut push);
                push(data.body);
            }
            NodeKind::Parameter {
                type_annotation, ..
            } => push(*type_annotation),
            NodeKind::TypeReference { type_arguments, .. } => {
                type_arguments.iter().copied().for_each(push)
            }
            NodeKind::Block { statements } => statements.iter().copied().for_each(push),
            NodeKind::ExpressionStatement { expression }
            | NodeKind::ReturnStatement { expression }
            | NodeKind::ThrowStatement { expression }
            | NodeKind::AwaitExpression { expression }
            | NodeKind::ParenthesizedExpression { expression } => push(*expression),
            NodeKind::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => {
                push(*condition);
                push(*then_statement);
                push(*else_statement);
            }
            NodeKind::WhileStatement { condition, body } => {
                push(*condition);
                push(*body);
            }
            NodeKind::TryStatement {
                try_block,
                catch_clauses,
                finally_block,
            } => {
                push(*try_block);
                catch_clauses.iter().copied().for_each(&mut push);
                push(*finally_block);
            }
            NodeKind::CatchClause {
                type_annotation,
                block,
                ..
            } => {
                push(*type_annotation);
                push(*block);
            }
            NodeKind::UsingStatement {
                declaration,
                expression,
                body,
            } => {
                push(*declaration);
                push(*expression);
                push(*body);
            }
            NodeKind::VariableStatement { declarations, .. } => {
                declarations.iter().copied().for_each(push)
            }
            NodeKind::VariableDeclaration {
                type_annotation,
                initializer,
                ..
            } => {
                push(*type_annotation);
                push(*initializer);
            }
            NodeKind::CallExpression { callee, arguments } => {
                push(*callee);
                arguments.iter().copied().for_each(&mut push);
            }
            NodeKind::PropertyAccessExpression { expression, .. } => push(*expression),
            NodeKind::NewExpression {
                type_reference,
                arguments,
            } => {
                push(*type_reference);
                arguments.iter().copied().for_each(&mut push);
            }
            NodeKind::BinaryExpression { left, right, .. } => {
                push(*left);
                push(*right);
            }
            NodeKind::PrefixUnaryExpression { operand, .. } => push(*operand),
            NodeKind::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                push(*condition);
                push(*when_true);
                push(*when_false);
            }
            NodeKind::Identifier { .. }
            | NodeKind::Literal { .. }
            | NodeKind::EmptyStatement
            | NodeKind::Missing => {}
        }
        out
    }

    /// Pre-order walk below `root` (excluding `root`), in source order.
    /// `visit` returns `false` to skip a node's subtree.
    pub fn walk_descendants(&self, root: NodeIndex, mut visit: impl FnMut(NodeIndex) -> bool) {
        let mut stack: Vec<NodeIndex> = self.children(root).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if visit(current) {
                stack.extend(self.children(current).into_iter().rev());
            }
        }
    }
}
