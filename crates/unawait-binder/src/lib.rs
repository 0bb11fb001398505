//! Binder: turns parsed source files into a `SemanticModel`.
//!
//! Binding runs in two steps. `DeclarationTable::declare_source_file`
//! collects classes and functions from every file (the embedded prelude is
//! always declared first). `BinderState::bind_source_file` then walks one
//! file with lexical scopes and records the type of each expression and the
//! target of each call. The resulting model answers `SemanticQueries`.

mod declarations;
mod prelude;
mod semantic;
mod state;
mod state_node_binding;

pub use declarations::{ClassInfo, DeclarationTable, FunctionSignature};
pub use prelude::PRELUDE_SOURCE;
pub use semantic::{CallTarget, SemanticModel, SemanticQueries};
pub use state::BinderState;
