//! Statement walking, scope management and expression typing.

use std::sync::Arc;

use tracing::trace;
use unawait_parser::{LiteralKind, NodeArena, NodeIndex, NodeKind};
use unawait_scanner::SyntaxKind;
use unawait_solver::{TypeId, TypeSubstitution, instantiate};

use crate::declarations::{
    FunctionSignature, function_signature, resolve_type_reference, select_overload,
};
use crate::semantic::CallTarget;
use crate::state::BinderState;

/// Handle and awaitable types whose `await` yields their first type argument.
const AWAITABLE_TYPES: &[&str] = &[
    "Task",
    "ValueTask",
    "ConfiguredTaskAwaitable",
    "ConfiguredValueTaskAwaitable",
    "YieldAwaitable",
];

impl BinderState<'_> {
    // =========================================================================
    // Functions and statements
    // =========================================================================

    pub(crate) fn bind_function(&mut self, arena: &NodeArena, node: NodeIndex) {
        let Some(data) = arena.function_data(node) else {
            return;
        };
        if data.return_type.is_some() {
            let declared = resolve_type_reference(
                self.interner,
                arena,
                data.return_type,
                self.class_type_parameters(),
            );
            self.model.return_types.insert(node, declared);
        }

        self.push_scope();
        for &parameter in &data.parameters {
            if let Some(NodeKind::Parameter {
                name,
                type_annotation,
            }) = arena.kind(parameter)
            {
                let ty = if type_annotation.is_some() {
                    self.resolve_type(arena, *type_annotation)
                } else {
                    TypeId::UNKNOWN
                };
                self.declare_value(name, ty);
            }
        }
        if data.is_expression_body {
            self.bind_expression(arena, data.body);
        } else if data.body.is_some() {
            self.bind_statement(arena, data.body);
        }
        self.pop_scope();
    }

    fn bind_block(&mut self, arena: &NodeArena, statements: &[NodeIndex]) {
        self.push_scope();
        // Local functions are visible throughout their block.
        for &statement in statements {
            if let Some(NodeKind::LocalFunctionDeclaration(_)) = arena.kind(statement) {
                let type_parameters = self.class_type_parameters().to_vec();
                if let Some(signature) =
                    function_signature(self.interner, arena, statement, &type_parameters)
                {
                    self.declare_function(signature);
                }
            }
        }
        for &statement in statements {
            self.bind_statement(arena, statement);
        }
        self.pop_scope();
    }

    fn declare_function(&mut self, signature: FunctionSignature) {
        if let Some(scope) = self.scopes.last_mut() {
            scope
                .functions
                .entry(Arc::clone(&signature.name))
                .or_default()
                .push(signature);
        }
    }

    fn bind_statement(&mut self, arena: &NodeArena, statement: NodeIndex) {
        let Some(kind) = arena.kind(statement) else {
            return;
        };
        match kind {
            NodeKind::Block { statements } => self.bind_block(arena, statements),
            NodeKind::ExpressionStatement { expression }
            | NodeKind::ReturnStatement { expression }
            | NodeKind::ThrowStatement { expression } => {
                self.bind_expression(arena, *expression);
            }
            NodeKind::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => {
                self.bind_expression(arena, *condition);
                self.bind_statement(arena, *then_statement);
                self.bind_statement(arena, *else_statement);
            }
            NodeKind::WhileStatement { condition, body } => {
                self.bind_expression(arena, *condition);
                self.bind_statement(arena, *body);
            }
            NodeKind::TryStatement {
                try_block,
                catch_clauses,
                finally_block,
            } => {
                self.bind_statement(arena, *try_block);
                for &clause in catch_clauses {
                    self.bind_catch_clause(arena, clause);
                }
                self.bind_statement(arena, *finally_block);
            }
            NodeKind::UsingStatement {
                declaration,
                expression,
                body,
            } => {
                self.push_scope();
                self.bind_variable_declaration(arena, *declaration);
                self.bind_expression(arena, *expression);
                self.bind_statement(arena, *body);
                self.pop_scope();
            }
            NodeKind::VariableStatement { declarations, .. } => {
                for &declaration in declarations {
                    self.bind_variable_declaration(arena, declaration);
                }
            }
            NodeKind::LocalFunctionDeclaration(_) => self.bind_function(arena, statement),
            _ => {}
        }
    }

    fn bind_catch_clause(&mut self, arena: &NodeArena, clause: NodeIndex) {
        let Some(NodeKind::CatchClause {
            type_annotation,
            name,
            block,
        }) = arena.kind(clause)
        else {
            return;
        };
        self.push_scope();
        if let Some(name) = name {
            let ty = self.resolve_type(arena, *type_annotation);
            self.declare_value(name, ty);
        }
        self.bind_statement(arena, *block);
        self.pop_scope();
    }

    fn bind_variable_declaration(&mut self, arena: &NodeArena, declaration: NodeIndex) {
        let Some(NodeKind::VariableDeclaration {
            name,
            type_annotation,
            initializer,
        }) = arena.kind(declaration)
        else {
            return;
        };
        let initializer_type = self.bind_expression(arena, *initializer);
        let ty = if type_annotation.is_some() {
            self.resolve_type(arena, *type_annotation)
        } else {
            initializer_type.unwrap_or(TypeId::UNKNOWN)
        };
        self.declare_value(name, ty);
    }

    fn resolve_type(&self, arena: &NodeArena, node: NodeIndex) -> TypeId {
        resolve_type_reference(self.interner, arena, node, self.class_type_parameters())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Type an expression, record the result and return it.
    pub(crate) fn bind_expression(&mut self, arena: &NodeArena, expression: NodeIndex) -> Option<TypeId> {
        let ty = self.compute_expression_type(arena, expression)?;
        if ty.is_resolved() {
            self.model.types.insert(expression, ty);
            Some(ty)
        } else {
            None
        }
    }

    fn compute_expression_type(&mut self, arena: &NodeArena, expression: NodeIndex) -> Option<TypeId> {
        match arena.kind(expression)? {
            NodeKind::Identifier { name } => self.lookup_value(name),
            NodeKind::Literal { kind, .. } => self.literal_type(*kind),
            NodeKind::ParenthesizedExpression { expression } => {
                self.bind_expression(arena, *expression)
            }
            NodeKind::AwaitExpression { expression } => {
                let operand = self.bind_expression(arena, *expression)?;
                self.awaited_type(operand)
            }
            NodeKind::CallExpression { callee, arguments } => {
                self.bind_call(arena, expression, *callee, arguments)
            }
            NodeKind::NewExpression {
                type_reference,
                arguments,
            } => {
                for &argument in arguments {
                    self.bind_expression(arena, argument);
                }
                Some(self.resolve_type(arena, *type_reference))
            }
            NodeKind::PropertyAccessExpression { expression, .. } => {
                // Fields and properties are not modelled.
                self.bind_expression(arena, *expression);
                None
            }
            NodeKind::BinaryExpression {
                left,
                operator,
                right,
            } => {
                let left_type = self.bind_expression(arena, *left);
                let right_type = self.bind_expression(arena, *right);
                match operator {
                    SyntaxKind::EqualsToken => right_type,
                    SyntaxKind::QuestionQuestionToken => left_type.or(right_type),
                    SyntaxKind::EqualsEqualsToken
                    | SyntaxKind::ExclamationEqualsToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::GreaterThanToken
                    | SyntaxKind::LessThanEqualsToken
                    | SyntaxKind::GreaterThanEqualsToken
                    | SyntaxKind::AmpersandAmpersandToken
                    | SyntaxKind::BarBarToken => Some(self.interner.named("bool", Vec::new())),
                    _ => left_type,
                }
            }
            NodeKind::PrefixUnaryExpression { operator, operand } => {
                let operand_type = self.bind_expression(arena, *operand);
                match operator {
                    SyntaxKind::ExclamationToken => Some(self.interner.named("bool", Vec::new())),
                    _ => operand_type,
                }
            }
            NodeKind::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                self.bind_expression(arena, *condition);
                let when_true = self.bind_expression(arena, *when_true);
                let when_false = self.bind_expression(arena, *when_false);
                when_true.or(when_false)
            }
            NodeKind::Lambda(_) => {
                // Lambdas keep the enclosing scopes but have no modelled type.
                self.bind_function(arena, expression);
                None
            }
            _ => None,
        }
    }

    fn literal_type(&self, kind: LiteralKind) -> Option<TypeId> {
        let name = match kind {
            LiteralKind::Number => "int",
            LiteralKind::String => "string",
            LiteralKind::True | LiteralKind::False => "bool",
            LiteralKind::Null => return None,
        };
        Some(self.interner.named(name, Vec::new()))
    }

    /// Result type of awaiting a value of type `ty`.
    fn awaited_type(&self, ty: TypeId) -> Option<TypeId> {
        let data = self.interner.lookup(ty)?;
        let name = data.simple_name()?;
        if !AWAITABLE_TYPES.contains(&name) {
            return None;
        }
        match data.type_arguments() {
            [] => Some(TypeId::VOID),
            [value] => Some(*value),
            _ => None,
        }
    }

    fn bind_call(
        &mut self,
        arena: &NodeArena,
        call: NodeIndex,
        callee: NodeIndex,
        arguments: &[NodeIndex],
    ) -> Option<TypeId> {
        for &argument in arguments {
            self.bind_expression(arena, argument);
        }
        let target = match arena.kind(callee)? {
            NodeKind::Identifier { name } => self.resolve_free_call(name, arguments.len()),
            NodeKind::PropertyAccessExpression {
                expression: receiver,
                name,
                ..
            } => self.resolve_member_call(arena, *receiver, name, arguments.len()),
            _ => {
                self.bind_expression(arena, callee);
                None
            }
        };
        let Some(target) = target else {
            trace!(call = %arena.text_of(call), "unresolved call");
            return None;
        };
        let return_type = target.return_type;
        self.model.call_targets.insert(call, target);
        Some(return_type)
    }

    /// `F(..)`: local functions, then members of the enclosing class, then
    /// top-level functions.
    fn resolve_free_call(&self, name: &Arc<str>, argument_count: usize) -> Option<CallTarget> {
        let local = self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.functions.get(&**name))
            .and_then(|overloads| select_overload(overloads, argument_count));
        let signature = local
            .or_else(|| {
                let class = self.class_context.as_ref()?;
                self.declarations
                    .class(&class.name, class.type_parameters.len())?
                    .method(name, argument_count)
            })
            .or_else(|| self.declarations.function(name, argument_count))?;
        Some(CallTarget {
            name: Arc::clone(name),
            return_type: signature.return_type,
        })
    }

    /// `receiver.M(..)`: a static call when `receiver` names a class that is
    /// not shadowed by a local, otherwise an instance call on the receiver's
    /// type with the class's type parameters substituted.
    fn resolve_member_call(
        &mut self,
        arena: &NodeArena,
        receiver: NodeIndex,
        name: &Arc<str>,
        argument_count: usize,
    ) -> Option<CallTarget> {
        if let Some(NodeKind::Identifier { name: class_name }) = arena.kind(receiver)
            && self.lookup_value(class_name).is_none()
            && self.declarations.has_class_named(class_name)
        {
            let signature = self
                .declarations
                .class(class_name, 0)?
                .method(name, argument_count)?;
            return Some(CallTarget {
                name: Arc::clone(name),
                return_type: signature.return_type,
            });
        }

        let receiver_type = self.bind_expression(arena, receiver)?;
        let data = self.interner.lookup(receiver_type)?;
        let args = data.type_arguments();
        let class = self.declarations.class(data.simple_name()?, args.len())?;
        let signature = class.method(name, argument_count)?;
        let substitution = TypeSubstitution::from_args(&class.type_parameters, args);
        Some(CallTarget {
            name: Arc::clone(name),
            return_type: instantiate(self.interner, signature.return_type, &substitution),
        })
    }
}
