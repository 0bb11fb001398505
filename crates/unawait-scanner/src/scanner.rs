//! Scanner state machine.
//!
//! The scanner hands out one token at a time. Trivia (whitespace and
//! comments) is skipped and never part of a token's range, so
//! `token_pos()..token_end()` always covers exactly the token text.

use std::sync::Arc;

use unawait_common::diagnostics::{diagnostic_codes, diagnostic_messages};

use crate::syntax_kind::{SyntaxKind, keyword_kind};

/// A lexical problem found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        ScannerState {
            text: text.into(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    #[inline]
    pub const fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub const fn token_pos(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub const fn token_end(&self) -> usize {
        self.pos
    }

    /// Identifier name, unquoted string contents, or numeric text of the
    /// current token.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn save(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.token_start = self.pos;
        self.token_value.clear();

        let bytes = self.text.as_bytes();
        let Some(&ch) = bytes.get(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        let next = bytes.get(self.pos + 1).copied();

        self.token = match ch {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b'.' => self.single(SyntaxKind::DotToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'+' => self.single(SyntaxKind::PlusToken),
            b'-' => self.single(SyntaxKind::MinusToken),
            b'*' => self.single(SyntaxKind::AsteriskToken),
            b'/' => self.single(SyntaxKind::SlashToken),
            b'%' => self.single(SyntaxKind::PercentToken),
            b'<' if next == Some(b'=') => self.double(SyntaxKind::LessThanEqualsToken),
            b'<' => self.single(SyntaxKind::LessThanToken),
            // `>` is never combined with a following `>` so nested generic
            // arguments (`Task<List<int>>`) close one level per token.
            b'>' if next == Some(b'=') => self.double(SyntaxKind::GreaterThanEqualsToken),
            b'>' => self.single(SyntaxKind::GreaterThanToken),
            b'=' if next == Some(b'>') => self.double(SyntaxKind::EqualsGreaterThanToken),
            b'=' if next == Some(b'=') => self.double(SyntaxKind::EqualsEqualsToken),
            b'=' => self.single(SyntaxKind::EqualsToken),
            b'!' if next == Some(b'=') => self.double(SyntaxKind::ExclamationEqualsToken),
            b'!' => self.single(SyntaxKind::ExclamationToken),
            b'&' if next == Some(b'&') => self.double(SyntaxKind::AmpersandAmpersandToken),
            b'|' if next == Some(b'|') => self.double(SyntaxKind::BarBarToken),
            b'?' if next == Some(b'?') => self.double(SyntaxKind::QuestionQuestionToken),
            b'?' => self.single(SyntaxKind::QuestionToken),
            b'"' => self.scan_string(),
            b'0'..=b'9' => self.scan_number(),
            c if c == b'_' || c.is_ascii_alphabetic() => self.scan_identifier(),
            _ => self.scan_unknown(),
        };
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn double(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 2;
        kind
    }

    fn skip_trivia(&mut self) {
        let bytes = self.text.as_bytes();
        while let Some(&ch) = bytes.get(self.pos) {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if bytes.get(self.pos + 1) == Some(&b'/') => {
                    while let Some(&c) = bytes.get(self.pos) {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                b'/' if bytes.get(self.pos + 1) == Some(&b'*') => {
                    self.pos += 2;
                    while self.pos < bytes.len() {
                        if bytes[self.pos] == b'*' && bytes.get(self.pos + 1) == Some(&b'/') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                    // Unterminated block comments run to end of file.
                    self.pos = self.pos.min(bytes.len());
                }
                _ => break,
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        while let Some(&c) = bytes.get(self.pos) {
            if c == b'_' || c.is_ascii_alphanumeric() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.text[self.token_start..self.pos];
        self.token_value.push_str(text);
        keyword_kind(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        while let Some(&c) = bytes.get(self.pos) {
            let is_fraction =
                c == b'.' && bytes.get(self.pos + 1).is_some_and(u8::is_ascii_digit);
            if c.is_ascii_digit() || c == b'_' || is_fraction {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.token_value
            .push_str(&self.text[self.token_start..self.pos]);
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        self.pos += 1;
        let content_start = self.pos;
        loop {
            match bytes.get(self.pos) {
                Some(b'"') => {
                    self.token_value
                        .push_str(&self.text[content_start..self.pos]);
                    self.pos += 1;
                    return SyntaxKind::StringLiteral;
                }
                Some(b'\\') => self.pos = (self.pos + 2).min(bytes.len()),
                Some(b'\n') | None => {
                    self.token_value
                        .push_str(&self.text[content_start..self.pos]);
                    self.diagnostics.push(ScannerDiagnostic {
                        pos: self.token_start,
                        length: self.pos - self.token_start,
                        message: diagnostic_messages::UNTERMINATED_STRING_LITERAL,
                        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    });
                    return SyntaxKind::StringLiteral;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_unknown(&mut self) -> SyntaxKind {
        // Consume a whole UTF-8 character so ranges stay on char boundaries.
        let width = self.text[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
        self.diagnostics.push(ScannerDiagnostic {
            pos: self.token_start,
            length: width,
            message: diagnostic_messages::INVALID_CHARACTER,
            code: diagnostic_codes::INVALID_CHARACTER,
        });
        SyntaxKind::Unknown
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
