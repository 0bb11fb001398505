//! Scanner/tokenizer for the C#-flavoured language unawait analyzes.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine

mod syntax_kind;
pub use syntax_kind::{SyntaxKind, keyword_kind};

mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState};
