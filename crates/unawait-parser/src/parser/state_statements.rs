//! Parser state - declaration and statement parsing methods.

use std::sync::Arc;

use unawait_common::TextRange;
use unawait_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use unawait_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::{FunctionData, ModifierFlags, NodeKind};
use super::state::ParserState;

/// What a statement that starts like a type turns out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeclarationShape {
    LocalFunction,
    Variable,
    NotDeclaration,
}

/// Where a function declaration appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FunctionContext {
    Member,
    Local,
}

impl ParserState {
    // =========================================================================
    // Source file and declarations
    // =========================================================================

    /// Parse a source file
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let mut items = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let pos_before = self.token_pos();
            match self.parse_declaration() {
                Some(item) => items.push(item),
                None => {
                    self.parse_error_at_current_token(
                        diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                    );
                }
            }
            // Always make progress.
            if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }

        for diag in self.scanner.get_scanner_diagnostics().to_vec() {
            self.parse_diagnostics.push(super::state::ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);

        let end = self.scanner.source_text().len() as u32;
        let root = self
            .arena
            .add(NodeKind::SourceFile { items }, TextRange::new(0, end));
        tracing::trace!(
            file = %self.file_name,
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    /// Parse one top-level declaration or class member.
    fn parse_declaration(&mut self) -> Option<NodeIndex> {
        let start = self.token_pos();
        let (modifiers, async_keyword) = self.parse_modifiers();

        if self.is_token(SyntaxKind::ClassKeyword) {
            return Some(self.parse_class_declaration(start, modifiers));
        }
        if matches!(self.token(), SyntaxKind::Identifier | SyntaxKind::VoidKeyword) {
            return Some(self.parse_function_declaration(
                start,
                modifiers,
                async_keyword,
                FunctionContext::Member,
            ));
        }
        None
    }

    /// Parse `async`, `static` and `extern` in any order.
    fn parse_modifiers(&mut self) -> (ModifierFlags, Option<TextRange>) {
        let mut modifiers = ModifierFlags::empty();
        let mut async_keyword = None;
        loop {
            let flag = match self.token() {
                SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
                SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
                SyntaxKind::ExternKeyword => ModifierFlags::EXTERN,
                _ => break,
            };
            if flag == ModifierFlags::ASYNC {
                let pos = self.token_pos();
                async_keyword = Some(TextRange::new(pos, self.scanner.token_end() as u32));
            }
            modifiers |= flag;
            self.next_token();
        }
        (modifiers, async_keyword)
    }

    fn parse_class_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = self.parse_identifier_name();

        let mut type_parameters = Vec::new();
        if self.parse_optional(SyntaxKind::LessThanToken) {
            loop {
                type_parameters.push(self.parse_identifier_name());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::GreaterThanToken);
        }

        let mut members = Vec::new();
        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let pos_before = self.token_pos();
                match self.parse_declaration() {
                    Some(member) => members.push(member),
                    None => self.parse_error_at_current_token(
                        diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                    ),
                }
                if self.token_pos() == pos_before {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        let range = self.range_from(start);
        self.arena.add(
            NodeKind::ClassDeclaration {
                name,
                type_parameters,
                members,
                is_extern: modifiers.contains(ModifierFlags::EXTERN),
            },
            range,
        )
    }

    /// Parse the rest of a function after its modifiers:
    /// `Type Name(params) { ... }`, `Type Name(params) => expr;` or
    /// `Type Name(params);`.
    fn parse_function_declaration(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        async_keyword: Option<TextRange>,
        context: FunctionContext,
    ) -> NodeIndex {
        let return_type = self.parse_type();
        let name = self.parse_identifier_name();
        let parameters = self.parse_parameter_list();

        let (body, is_expression_body) = if self.is_token(SyntaxKind::OpenBraceToken) {
            (self.parse_block(), false)
        } else if self.parse_optional(SyntaxKind::EqualsGreaterThanToken) {
            let expression = self.parse_expression();
            self.parse_expected(SyntaxKind::SemicolonToken);
            (expression, true)
        } else {
            self.parse_expected(SyntaxKind::SemicolonToken);
            (NodeIndex::NONE, false)
        };

        let data = FunctionData {
            name: Some(name),
            modifiers,
            async_keyword,
            return_type,
            parameters,
            body,
            is_expression_body,
        };
        let range = self.range_from(start);
        let kind = match context {
            FunctionContext::Member => NodeKind::FunctionDeclaration(data),
            FunctionContext::Local => NodeKind::LocalFunctionDeclaration(data),
        };
        self.arena.add(kind, range)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut statements = Vec::new();
        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let pos_before = self.token_pos();
                statements.push(self.parse_statement());
                if self.token_pos() == pos_before {
                    self.parse_error_at_current_token(
                        diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                    );
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }
        let range = self.range_from(start);
        self.arena.add(NodeKind::Block { statements }, range)
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.missing_node();
        }
        let statement = self.parse_statement_worker();
        self.exit_recursion();
        statement
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                let range = self.range_from(start);
                self.arena.add(NodeKind::EmptyStatement, range)
            }
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::UsingKeyword => self.parse_using(),
            SyntaxKind::VarKeyword => self.parse_variable_statement(start, false),
            SyntaxKind::AsyncKeyword | SyntaxKind::StaticKeyword
                if self.look_ahead_is_local_function_after_modifiers() =>
            {
                let (modifiers, async_keyword) = self.parse_modifiers();
                self.parse_function_declaration(
                    start,
                    modifiers,
                    async_keyword,
                    FunctionContext::Local,
                )
            }
            SyntaxKind::Identifier | SyntaxKind::VoidKeyword => {
                match self.look_ahead_declaration_shape() {
                    DeclarationShape::LocalFunction => self.parse_function_declaration(
                        start,
                        ModifierFlags::empty(),
                        None,
                        FunctionContext::Local,
                    ),
                    DeclarationShape::Variable => self.parse_variable_statement(start, false),
                    DeclarationShape::NotDeclaration => self.parse_expression_statement(),
                }
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn look_ahead_declaration_shape(&mut self) -> DeclarationShape {
        self.look_ahead(|p| {
            if !p.skip_type() || !p.is_token(SyntaxKind::Identifier) {
                return DeclarationShape::NotDeclaration;
            }
            match p.next_token() {
                SyntaxKind::OpenParenToken => DeclarationShape::LocalFunction,
                SyntaxKind::EqualsToken | SyntaxKind::SemicolonToken | SyntaxKind::CommaToken => {
                    DeclarationShape::Variable
                }
                _ => DeclarationShape::NotDeclaration,
            }
        })
    }

    /// `async Task F(` / `static void G(` start a local function; `async (`
    /// starts a lambda expression statement.
    fn look_ahead_is_local_function_after_modifiers(&mut self) -> bool {
        self.look_ahead(|p| {
            p.parse_modifiers();
            p.look_ahead_declaration_shape() == DeclarationShape::LocalFunction
        })
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::SemicolonToken);
        let range = self.range_from(start);
        self.arena
            .add(NodeKind::ExpressionStatement { expression }, range)
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let range = self.range_from(start);
        self.arena.add(NodeKind::ReturnStatement { expression }, range)
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ThrowKeyword);
        let expression = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let range = self.range_from(start);
        self.arena.add(NodeKind::ThrowStatement { expression }, range)
    }

    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        condition
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::IfKeyword);
        let condition = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        let range = self.range_from(start);
        self.arena.add(
            NodeKind::IfStatement {
                condition,
                then_statement,
                else_statement,
            },
            range,
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        let body = self.parse_statement();
        let range = self.range_from(start);
        self.arena
            .add(NodeKind::WhileStatement { condition, body }, range)
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::TryKeyword);
        let try_block = self.parse_block();

        let mut catch_clauses = Vec::new();
        while self.is_token(SyntaxKind::CatchKeyword) {
            catch_clauses.push(self.parse_catch_clause());
        }
        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };
        if catch_clauses.is_empty() && finally_block.is_none() {
            self.parse_error_at_current_token(
                &unawait_common::diagnostics::format_message(
                    diagnostic_messages::EXPECTED,
                    &["catch"],
                ),
                diagnostic_codes::EXPECTED,
            );
        }

        let range = self.range_from(start);
        self.arena.add(
            NodeKind::TryStatement {
                try_block,
                catch_clauses,
                finally_block,
            },
            range,
        )
    }

    fn parse_catch_clause(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::CatchKeyword);
        let mut type_annotation = NodeIndex::NONE;
        let mut name: Option<Arc<str>> = None;
        if self.parse_optional(SyntaxKind::OpenParenToken) {
            type_annotation = self.parse_type();
            if self.is_token(SyntaxKind::Identifier) {
                name = Some(self.parse_identifier_name());
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        }
        let block = self.parse_block();
        let range = self.range_from(start);
        self.arena.add(
            NodeKind::CatchClause {
                type_annotation,
                name,
                block,
            },
            range,
        )
    }

    /// `using (...) statement` or `using var x = ...;` / `using T x = ...;`.
    fn parse_using(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::UsingKeyword);
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return self.parse_variable_statement(start, true);
        }

        self.parse_expected(SyntaxKind::OpenParenToken);
        let resource_start = self.token_pos();
        let is_declaration = self.is_token(SyntaxKind::VarKeyword)
            || self.look_ahead_declaration_shape() == DeclarationShape::Variable;
        let (declaration, expression) = if is_declaration {
            (self.parse_variable_declaration(resource_start), NodeIndex::NONE)
        } else {
            (NodeIndex::NONE, self.parse_expression())
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_statement();

        let range = self.range_from(start);
        self.arena.add(
            NodeKind::UsingStatement {
                declaration,
                expression,
                body,
            },
            range,
        )
    }

    fn parse_variable_statement(&mut self, start: u32, is_using: bool) -> NodeIndex {
        let mut declarations = Vec::new();
        let declaration_start = self.token_pos();
        declarations.push(self.parse_variable_declaration(declaration_start));
        // `T a = 1, b = 2;` shares the leading type.
        while self.parse_optional(SyntaxKind::CommaToken) {
            let next_start = self.token_pos();
            let name = self.parse_identifier_name();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_expression()
            } else {
                NodeIndex::NONE
            };
            let range = self.range_from(next_start);
            declarations.push(self.arena.add(
                NodeKind::VariableDeclaration {
                    name,
                    type_annotation: NodeIndex::NONE,
                    initializer,
                },
                range,
            ));
        }
        self.parse_expected(SyntaxKind::SemicolonToken);

        let range = self.range_from(start);
        self.arena.add(
            NodeKind::VariableStatement {
                declarations,
                is_using,
            },
            range,
        )
    }

    /// `var name [= init]` or `Type name [= init]`.
    fn parse_variable_declaration(&mut self, start: u32) -> NodeIndex {
        let type_annotation = if self.parse_optional(SyntaxKind::VarKeyword) {
            NodeIndex::NONE
        } else {
            self.parse_type()
        };
        let name = self.parse_identifier_name();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_expression()
        } else {
            NodeIndex::NONE
        };
        let range = self.range_from(start);
        self.arena.add(
            NodeKind::VariableDeclaration {
                name,
                type_annotation,
                initializer,
            },
            range,
        )
    }
}
