//! unawait: finds `async` functions whose every `await` can become a direct
//! return of the awaited task, and rewrites them.
//!
//! The analysis lives in the workspace crates; this crate re-exports them
//! under short names and hosts the command-line front end.

pub use unawait_binder as binder;
pub use unawait_checker as checker;
pub use unawait_common as common;
pub use unawait_lsp as lsp;
pub use unawait_parser as parser;
pub use unawait_scanner as scanner;
pub use unawait_solver as solver;

pub mod cli;
pub mod tracing_config;
