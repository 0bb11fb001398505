//! Parser and syntax tree for the C#-flavoured language unawait analyzes.
//!
//! The tree is a `NodeArena` of `Node`s addressed by `NodeIndex`. Node kinds
//! form a closed enum (`NodeKind`); every node records its parent and its
//! source range (leading trivia excluded).

pub mod parser;

pub use parser::{
    FunctionData, LiteralKind, ModifierFlags, Node, NodeArena, NodeIndex, NodeKind,
    ParseDiagnostic, ParserState,
};
