//! Parser: `ParserState` turns source text into a `NodeArena`.

mod base;
mod node;
mod node_access;
mod node_arena;
mod state;
mod state_expressions;
mod state_statements;
mod state_types;

pub use base::NodeIndex;
pub use node::{FunctionData, LiteralKind, ModifierFlags, Node, NodeArena, NodeKind, SourceFileData};
pub use node_access::ChildList;
pub use state::{ParseDiagnostic, ParserState};

#[cfg(test)]
#[path = "../../tests/parser_tests.rs"]
mod parser_tests;
