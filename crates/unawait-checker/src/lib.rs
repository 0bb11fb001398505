//! Eligibility classifier for redundant `await`s.
//!
//! An `async` function whose awaits all sit in tail position can hand the
//! awaited handle straight back to its caller and drop the `async` state
//! machine. This crate decides, per function, whether that rewrite preserves
//! behavior:
//!
//! - `function_unit` - the function being analyzed and its result shape
//! - `suspension` - discovery and placement of each `await`
//! - `protected_scope` - `try`/`using` boundaries that block the rewrite
//! - `covariance` - unwrapping of discard-context wrappers and type matching
//! - `classifier` - the all-or-nothing verdict
//! - `finding` - the reported diagnostic
//! - `state` - `CheckerState`, which checks every function of a file

pub mod classifier;
pub mod context;
pub mod covariance;
pub mod finding;
pub mod function_unit;
pub mod protected_scope;
pub mod state;
pub mod suspension;

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

pub use classifier::{EligibilityVerdict, RejectionReason, classify};
pub use context::{CheckerContext, CheckerOptions};
pub use finding::Finding;
pub use function_unit::{FunctionBody, FunctionUnit, ResultShape};
pub use state::CheckerState;
pub use suspension::{EnclosingForm, SuspensionPoint};
