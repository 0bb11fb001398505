//! Parser state - type references and parameter lists.

use unawait_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use unawait_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::NodeKind;
use super::state::ParserState;

impl ParserState {
    /// Parse `void`, `Name` or `Name<T1, T2, ...>`.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !matches!(self.token(), SyntaxKind::Identifier | SyntaxKind::VoidKeyword) {
            self.parse_error_at_current_token(
                diagnostic_messages::TYPE_EXPECTED,
                diagnostic_codes::TYPE_EXPECTED,
            );
            return self.missing_node();
        }
        if !self.enter_recursion() {
            return self.missing_node();
        }

        let name = self.token_value();
        self.next_token();
        // Qualified names are kept as one dotted name.
        let mut qualified = name.to_string();
        while self.is_token(SyntaxKind::DotToken)
            && self.look_ahead_token() == SyntaxKind::Identifier
        {
            self.next_token();
            qualified.push('.');
            qualified.push_str(self.scanner.token_value());
            self.next_token();
        }

        let mut type_arguments = Vec::new();
        if self.parse_optional(SyntaxKind::LessThanToken) {
            loop {
                type_arguments.push(self.parse_type());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::GreaterThanToken);
        }
        self.exit_recursion();

        let range = self.range_from(start);
        self.arena.add(
            NodeKind::TypeReference {
                name: qualified.into(),
                type_arguments,
            },
            range,
        )
    }

    /// Advance over a syntactically valid type without building nodes.
    /// Returns `false` if the tokens do not form a type. Callers run this
    /// inside `look_ahead`.
    pub(crate) fn skip_type(&mut self) -> bool {
        self.skip_type_at_depth(0)
    }

    fn skip_type_at_depth(&mut self, depth: u32) -> bool {
        if depth > 32 || !matches!(self.token(), SyntaxKind::Identifier | SyntaxKind::VoidKeyword) {
            return false;
        }
        self.next_token();
        while self.is_token(SyntaxKind::DotToken) {
            if self.next_token() != SyntaxKind::Identifier {
                return false;
            }
            self.next_token();
        }
        if self.parse_optional(SyntaxKind::LessThanToken) {
            loop {
                if !self.skip_type_at_depth(depth + 1) {
                    return false;
                }
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            return self.parse_optional(SyntaxKind::GreaterThanToken);
        }
        true
    }

    /// Parse `( [Type] name, ... )`. Types may be omitted (lambda parameters).
    pub(crate) fn parse_parameter_list(&mut self) -> Vec<NodeIndex> {
        let mut parameters = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return parameters;
        }
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let pos_before = self.token_pos();
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == pos_before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        parameters
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let untyped = self.is_token(SyntaxKind::Identifier)
            && matches!(
                self.look_ahead_token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken
            );
        let type_annotation = if untyped {
            NodeIndex::NONE
        } else {
            self.parse_type()
        };
        let name = self.parse_identifier_name();
        let range = self.range_from(start);
        self.arena.add(
            NodeKind::Parameter {
                name,
                type_annotation,
            },
            range,
        )
    }

    /// Consume an identifier and return its text; reports and returns an
    /// empty name when the current token is not an identifier.
    pub(crate) fn parse_identifier_name(&mut self) -> std::sync::Arc<str> {
        if self.is_token(SyntaxKind::Identifier) {
            let name = self.token_value();
            self.next_token();
            name
        } else {
            self.parse_error_at_current_token(
                diagnostic_messages::IDENTIFIER_EXPECTED,
                diagnostic_codes::IDENTIFIER_EXPECTED,
            );
            std::sync::Arc::from("")
        }
    }
}
