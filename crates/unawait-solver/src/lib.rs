//! Type representation for unawait.
//!
//! Types are interned into lightweight `TypeId` handles so that the
//! covariance check is a plain integer comparison:
//!
//! - **`TypeInterner`**: concurrent interning of `TypeData` into `TypeId`
//! - **`TypeFormatter`**: display text for diagnostics and logging
//! - **`instantiate`**: generic class type-parameter substitution
//! - **`WellKnownTypes`**: the asynchronous handle types and discard-context
//!   method names, built once per session and shared by reference

mod format;
mod instantiate;
mod intern;
mod types;
mod well_known;

pub use format::TypeFormatter;
pub use instantiate::{TypeSubstitution, instantiate};
pub use intern::TypeInterner;
pub use types::{IntrinsicKind, TypeData, TypeId};
pub use well_known::{DEFAULT_DISCARD_CONTEXT_METHODS, TaskResult, WellKnownTypes};
