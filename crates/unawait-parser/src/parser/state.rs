//! Parser state: token cursor, diagnostics and speculative parsing.

use std::sync::Arc;

use unawait_common::TextRange;
use unawait_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use unawait_common::limits::MAX_PARSER_RECURSION_DEPTH;
use unawait_scanner::{ScannerSnapshot, ScannerState, SyntaxKind};

use super::base::NodeIndex;
use super::node::{NodeArena, NodeKind};

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) recursion_depth: u32,
    /// End offset of the most recently consumed token.
    pub(crate) prev_token_end: u32,
}

/// Everything needed to roll back a failed speculative parse.
pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    arena_len: usize,
    diagnostics_len: usize,
    prev_token_end: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let text: Arc<str> = source_text.into();
        let mut arena = NodeArena::with_capacity(text.len() / 4);
        arena.set_source(file_name.clone(), Arc::clone(&text));
        ParserState {
            scanner: ScannerState::new(text),
            arena,
            file_name,
            parse_diagnostics: Vec::new(),
            recursion_depth: 0,
            prev_token_end: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos() as u32
    }

    pub(crate) fn token_value(&self) -> Arc<str> {
        Arc::from(self.scanner.token_value())
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end() as u32;
        self.scanner.scan()
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." at the current token.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let message = format_message(diagnostic_messages::EXPECTED, &[kind.text()]);
        self.parse_error_at_current_token(&message, diagnostic_codes::EXPECTED);
        false
    }

    /// Peek at the kind of the token after the current one.
    pub(crate) fn look_ahead_token(&mut self) -> SyntaxKind {
        let snapshot = self.scanner.save();
        let kind = self.scanner.scan();
        self.scanner.restore(snapshot);
        kind
    }

    /// Range from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn range_from(&self, start: u32) -> TextRange {
        TextRange::new(start, self.prev_token_end.max(start))
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        // One diagnostic per position keeps cascades down.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = (self.scanner.token_end() as u32).saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    pub(crate) fn missing_node(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add(NodeKind::Missing, TextRange::empty(pos))
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Enter a nested construct. Returns `false` (after reporting) when the
    /// nesting limit is exceeded; the caller must then produce a missing node
    /// without recursing.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            self.parse_error_at_current_token(
                diagnostic_messages::NESTING_TOO_DEEP,
                diagnostic_codes::NESTING_TOO_DEEP,
            );
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Speculative parsing
    // =========================================================================

    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save(),
            arena_len: self.arena.len(),
            diagnostics_len: self.parse_diagnostics.len(),
            prev_token_end: self.prev_token_end,
        }
    }

    pub(crate) fn rewind(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore(snapshot.scanner);
        self.arena.truncate(snapshot.arena_len);
        self.parse_diagnostics.truncate(snapshot.diagnostics_len);
        self.prev_token_end = snapshot.prev_token_end;
    }

    /// Run `parse`; if it returns `None`, undo everything it consumed.
    pub(crate) fn try_parse<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let result = parse(self);
        if result.is_none() {
            self.rewind(snapshot);
        }
        result
    }

    /// Run `check` and always undo what it consumed.
    pub(crate) fn look_ahead<T>(&mut self, check: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = check(self);
        self.rewind(snapshot);
        result
    }
}
