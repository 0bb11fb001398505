//! Node kinds and per-kind payloads.

use std::sync::Arc;

use bitflags::bitflags;
use unawait_common::TextRange;
use unawait_scanner::SyntaxKind;

use super::base::NodeIndex;

bitflags! {
    /// Declaration modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u8 {
        const ASYNC = 1 << 0;
        const STATIC = 1 << 1;
        const EXTERN = 1 << 2;
    }
}

/// Payload shared by every function-like node: methods, top-level
/// functions, local functions, extern signatures and lambdas.
#[derive(Clone, Debug)]
pub struct FunctionData {
    /// `None` for lambdas.
    pub name: Option<Arc<str>>,
    pub modifiers: ModifierFlags,
    /// Range of the `async` keyword, when present.
    pub async_keyword: Option<TextRange>,
    /// Declared result type (`TypeReference`), `NONE` when not written
    /// (untyped lambdas).
    pub return_type: NodeIndex,
    pub parameters: Vec<NodeIndex>,
    /// `Block` or an expression; `NONE` for signatures without a body.
    pub body: NodeIndex,
    pub is_expression_body: bool,
}

impl FunctionData {
    #[inline]
    pub fn is_async(&self) -> bool {
        self.modifiers.contains(ModifierFlags::ASYNC)
    }
}

/// Literal flavours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    True,
    False,
    Null,
}

/// The closed set of syntax node kinds.
#[derive(Clone, Debug)]
pub enum NodeKind {
    SourceFile {
        items: Vec<NodeIndex>,
    },
    ClassDeclaration {
        name: Arc<str>,
        type_parameters: Vec<Arc<str>>,
        members: Vec<NodeIndex>,
        is_extern: bool,
    },
    /// Methods, top-level functions and extern signatures.
    FunctionDeclaration(FunctionData),
    /// A function declared inside a block.
    LocalFunctionDeclaration(FunctionData),
    Lambda(FunctionData),
    Parameter {
        name: Arc<str>,
        /// `NONE` for untyped lambda parameters.
        type_annotation: NodeIndex,
    },
    TypeReference {
        name: Arc<str>,
        type_arguments: Vec<NodeIndex>,
    },

    // Statements
    Block {
        statements: Vec<NodeIndex>,
    },
    EmptyStatement,
    ExpressionStatement {
        expression: NodeIndex,
    },
    ReturnStatement {
        /// `NONE` for a bare `return;`.
        expression: NodeIndex,
    },
    IfStatement {
        condition: NodeIndex,
        then_statement: NodeIndex,
        /// `NONE` when there is no `else`.
        else_statement: NodeIndex,
    },
    WhileStatement {
        condition: NodeIndex,
        body: NodeIndex,
    },
    ThrowStatement {
        /// `NONE` for a rethrow.
        expression: NodeIndex,
    },
    /// Exception-handling scope.
    TryStatement {
        try_block: NodeIndex,
        catch_clauses: Vec<NodeIndex>,
        /// `NONE` when there is no `finally`.
        finally_block: NodeIndex,
    },
    CatchClause {
        type_annotation: NodeIndex,
        name: Option<Arc<str>>,
        block: NodeIndex,
    },
    /// Resource scope: `using (resource) statement`.
    UsingStatement {
        /// `VariableDeclaration` or `NONE`.
        declaration: NodeIndex,
        /// Resource expression when no declaration is written, else `NONE`.
        expression: NodeIndex,
        body: NodeIndex,
    },
    /// `var x = ...;`, `T x = ...;` or, with `is_using`, the resource
    /// scope `using var x = ...;` that lasts to the end of the block.
    VariableStatement {
        declarations: Vec<NodeIndex>,
        is_using: bool,
    },
    VariableDeclaration {
        name: Arc<str>,
        /// `NONE` for `var`.
        type_annotation: NodeIndex,
        /// `NONE` when absent.
        initializer: NodeIndex,
    },

    // Expressions
    Identifier {
        name: Arc<str>,
    },
    Literal {
        kind: LiteralKind,
        text: Arc<str>,
    },
    AwaitExpression {
        expression: NodeIndex,
    },
    CallExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    PropertyAccessExpression {
        expression: NodeIndex,
        name: Arc<str>,
        name_range: TextRange,
    },
    /// Object construction: `new T(args)`.
    NewExpression {
        type_reference: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    ParenthesizedExpression {
        expression: NodeIndex,
    },
    BinaryExpression {
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    },
    PrefixUnaryExpression {
        operator: SyntaxKind,
        operand: NodeIndex,
    },
    ConditionalExpression {
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    },
    /// Placeholder produced by error recovery.
    Missing,
}

/// A syntax node.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Source range without leading trivia.
    pub range: TextRange,
    pub parent: NodeIndex,
}

/// Source file metadata owned by the arena.
#[derive(Clone, Debug, Default)]
pub struct SourceFileData {
    pub file_name: String,
    pub text: Arc<str>,
}

/// Storage for all nodes of one parsed file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
    pub(crate) source: SourceFileData,
}
