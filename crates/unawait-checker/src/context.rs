//! Checker options and the shared, read-only inputs of one file's check.

use unawait_binder::SemanticQueries;
use unawait_common::diagnostics::DiagnosticCategory;
use unawait_parser::NodeArena;
use unawait_solver::{DEFAULT_DISCARD_CONTEXT_METHODS, TypeInterner, WellKnownTypes};

/// Options for the redundant-await check.
#[derive(Clone, Debug)]
pub struct CheckerOptions {
    /// Methods that only change the continuation context of a handle.
    pub discard_context_methods: Vec<String>,
    /// Category of reported findings.
    pub severity: DiagnosticCategory,
    /// Also analyze lambdas and local functions.
    pub analyze_lambdas: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            discard_context_methods: DEFAULT_DISCARD_CONTEXT_METHODS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            severity: DiagnosticCategory::Warning,
            analyze_lambdas: true,
        }
    }
}

impl CheckerOptions {
    /// The well-known type table these options describe.
    pub fn well_known_types(&self, interner: &TypeInterner) -> WellKnownTypes {
        WellKnownTypes::new(interner, self.discard_context_methods.as_slice())
    }
}

/// Everything a classification reads. Shared across worker threads.
#[derive(Clone, Copy)]
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub semantics: &'a (dyn SemanticQueries + Sync),
    pub types: &'a TypeInterner,
    pub well_known: &'a WellKnownTypes,
    pub options: &'a CheckerOptions,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        semantics: &'a (dyn SemanticQueries + Sync),
        types: &'a TypeInterner,
        well_known: &'a WellKnownTypes,
        options: &'a CheckerOptions,
    ) -> Self {
        CheckerContext {
            arena,
            semantics,
            types,
            well_known,
            options,
        }
    }

    pub fn file_name(&self) -> &str {
        self.arena.file_name()
    }
}
