//! Parser state - expression parsing methods.

use unawait_common::TextRange;
use unawait_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use unawait_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::{FunctionData, LiteralKind, ModifierFlags, NodeKind};
use super::state::ParserState;

/// Binary operator precedence, loosest first. `=` and `??` are handled
/// separately because they associate to the right.
fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        SyntaxKind::BarBarToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => 3,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken => 4,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 5,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 6,
        _ => return None,
    })
}

impl ParserState {
    /// Parse an expression (assignment level).
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.missing_node();
        }
        let expression = self.parse_assignment_expression();
        self.exit_recursion();
        expression
    }

    fn parse_assignment_expression(&mut self) -> NodeIndex {
        if self.could_start_lambda() {
            if let Some(lambda) = self.try_parse(Self::try_parse_lambda) {
                return lambda;
            }
        }

        let left = self.parse_conditional_expression();
        if self.parse_optional(SyntaxKind::EqualsToken) {
            let right = self.parse_expression();
            return self.finish_binary(left, SyntaxKind::EqualsToken, right);
        }
        left
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let condition = self.parse_coalesce_expression();
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.parse_expression();
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_expression();
        let range = self.range_from(self.arena.range(condition).pos);
        self.arena.add(
            NodeKind::ConditionalExpression {
                condition,
                when_true,
                when_false,
            },
            range,
        )
    }

    fn parse_coalesce_expression(&mut self) -> NodeIndex {
        let left = self.parse_binary_expression(0);
        if self.parse_optional(SyntaxKind::QuestionQuestionToken) {
            if !self.enter_recursion() {
                return left;
            }
            let right = self.parse_coalesce_expression();
            self.exit_recursion();
            return self.finish_binary(left, SyntaxKind::QuestionQuestionToken, right);
        }
        left
    }

    /// Precedence climbing over the left-associative binary operators.
    ///
    /// Every operator deepens the left spine, so each one counts against the
    /// recursion limit. Past the limit the remaining operands are still
    /// consumed but left out of the tree.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let mut left = self.parse_unary_expression();
        let mut depth = 0;
        let mut too_deep = false;
        while let Some(precedence) = binary_precedence(self.token()) {
            if precedence <= min_precedence {
                break;
            }
            let operator = self.token();
            self.next_token();
            if !too_deep && !self.enter_recursion() {
                too_deep = true;
            }
            let right = self.parse_binary_expression(precedence);
            if too_deep {
                continue;
            }
            depth += 1;
            left = self.finish_binary(left, operator, right);
        }
        for _ in 0..depth {
            self.exit_recursion();
        }
        left
    }

    fn finish_binary(&mut self, left: NodeIndex, operator: SyntaxKind, right: NodeIndex) -> NodeIndex {
        let range = self.range_from(self.arena.range(left).pos);
        self.arena.add(
            NodeKind::BinaryExpression {
                left,
                operator,
                right,
            },
            range,
        )
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                let expression = self.parse_nested_unary();
                let range = self.range_from(start);
                self.arena
                    .add(NodeKind::AwaitExpression { expression }, range)
            }
            operator @ (SyntaxKind::ExclamationToken | SyntaxKind::MinusToken) => {
                self.next_token();
                let operand = self.parse_nested_unary();
                let range = self.range_from(start);
                self.arena
                    .add(NodeKind::PrefixUnaryExpression { operator, operand }, range)
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_nested_unary(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.missing_node();
        }
        let operand = self.parse_unary_expression();
        self.exit_recursion();
        operand
    }

    /// Member access and call chains: `a.b(c).d`. Links past the recursion
    /// limit are consumed without being added to the tree.
    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = self.parse_primary_expression();
        let mut depth = 0;
        let mut too_deep = false;
        loop {
            if !matches!(self.token(), SyntaxKind::DotToken | SyntaxKind::OpenParenToken) {
                break;
            }
            if !too_deep && !self.enter_recursion() {
                too_deep = true;
            }
            if too_deep {
                if self.parse_optional(SyntaxKind::DotToken) {
                    self.parse_identifier_name();
                } else {
                    self.parse_argument_list();
                }
                continue;
            }
            depth += 1;
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name_start = self.token_pos();
                    let name = self.parse_identifier_name();
                    let name_range = self.range_from(name_start);
                    let range = self.range_from(start);
                    expression = self.arena.add(
                        NodeKind::PropertyAccessExpression {
                            expression,
                            name,
                            name_range,
                        },
                        range,
                    );
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_argument_list();
                    let range = self.range_from(start);
                    expression = self.arena.add(
                        NodeKind::CallExpression {
                            callee: expression,
                            arguments,
                        },
                        range,
                    );
                }
                _ => break,
            }
        }
        for _ in 0..depth {
            self.exit_recursion();
        }
        expression
    }

    fn parse_argument_list(&mut self) -> Vec<NodeIndex> {
        let mut arguments = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            arguments.push(self.parse_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => {
                let name = self.token_value();
                self.next_token();
                let range = self.range_from(start);
                self.arena.add(NodeKind::Identifier { name }, range)
            }
            SyntaxKind::NumericLiteral => self.parse_literal(LiteralKind::Number),
            SyntaxKind::StringLiteral => self.parse_literal(LiteralKind::String),
            SyntaxKind::TrueKeyword => self.parse_literal(LiteralKind::True),
            SyntaxKind::FalseKeyword => self.parse_literal(LiteralKind::False),
            SyntaxKind::NullKeyword => self.parse_literal(LiteralKind::Null),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression();
                self.parse_expected(SyntaxKind::CloseParenToken);
                let range = self.range_from(start);
                self.arena
                    .add(NodeKind::ParenthesizedExpression { expression }, range)
            }
            SyntaxKind::NewKeyword => {
                self.next_token();
                let type_reference = self.parse_type();
                let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
                    self.parse_argument_list()
                } else {
                    self.parse_expected(SyntaxKind::OpenParenToken);
                    Vec::new()
                };
                let range = self.range_from(start);
                self.arena.add(
                    NodeKind::NewExpression {
                        type_reference,
                        arguments,
                    },
                    range,
                )
            }
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::EXPRESSION_EXPECTED,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                self.missing_node()
            }
        }
    }

    fn parse_literal(&mut self, kind: LiteralKind) -> NodeIndex {
        let start = self.token_pos();
        let text = self.token_value();
        self.next_token();
        let range = self.range_from(start);
        self.arena.add(NodeKind::Literal { kind, text }, range)
    }

    // =========================================================================
    // Lambdas
    // =========================================================================

    fn could_start_lambda(&mut self) -> bool {
        match self.token() {
            SyntaxKind::AsyncKeyword | SyntaxKind::OpenParenToken | SyntaxKind::VoidKeyword => {
                true
            }
            SyntaxKind::Identifier => matches!(
                self.look_ahead_token(),
                SyntaxKind::EqualsGreaterThanToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::DotToken
            ),
            _ => false,
        }
    }

    /// `[async] x => body`, `[async] (params) => body` or
    /// `[async] Type (params) => body`. Returns `None` when the tokens are not
    /// a lambda; the caller rewinds.
    fn try_parse_lambda(&mut self) -> Option<NodeIndex> {
        let start = self.token_pos();
        let mut modifiers = ModifierFlags::empty();
        let mut async_keyword = None;
        if self.is_token(SyntaxKind::AsyncKeyword) {
            async_keyword = Some(TextRange::new(start, self.scanner.token_end() as u32));
            modifiers |= ModifierFlags::ASYNC;
            self.next_token();
        }

        let mut return_type = NodeIndex::NONE;
        let parameters = if self.is_token(SyntaxKind::Identifier)
            && self.look_ahead_token() == SyntaxKind::EqualsGreaterThanToken
        {
            let param_start = self.token_pos();
            let name = self.parse_identifier_name();
            let range = self.range_from(param_start);
            vec![self.arena.add(
                NodeKind::Parameter {
                    name,
                    type_annotation: NodeIndex::NONE,
                },
                range,
            )]
        } else {
            if !self.is_token(SyntaxKind::OpenParenToken) {
                let typed = self.look_ahead(|p| p.skip_type() && p.is_token(SyntaxKind::OpenParenToken));
                if !typed {
                    return None;
                }
                return_type = self.parse_type();
            }
            let diagnostics_before = self.parse_diagnostics.len();
            let parameters = self.parse_parameter_list();
            if self.parse_diagnostics.len() != diagnostics_before {
                return None;
            }
            parameters
        };

        if !self.parse_optional(SyntaxKind::EqualsGreaterThanToken) {
            return None;
        }

        let (body, is_expression_body) = if self.is_token(SyntaxKind::OpenBraceToken) {
            (self.parse_block(), false)
        } else {
            (self.parse_expression(), true)
        };

        let range = self.range_from(start);
        Some(self.arena.add(
            NodeKind::Lambda(FunctionData {
                name: None,
                modifiers,
                async_keyword,
                return_type,
                parameters,
                body,
                is_expression_body,
            }),
            range,
        ))
    }
}
