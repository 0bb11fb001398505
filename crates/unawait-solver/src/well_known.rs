//! The table of well-known types the analysis reasons about.

use std::sync::Arc;

use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};

/// Wrapper methods that only change the continuation context of a handle.
pub const DEFAULT_DISCARD_CONTEXT_METHODS: &[&str] = &["ConfigureAwait"];

const TASK: &str = "Task";
const VALUE_TASK: &str = "ValueTask";
const ASYNC_ENUMERABLES: &[&str] = &["IAsyncEnumerable", "IAsyncEnumerator"];

/// What a single-result asynchronous handle produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskResult {
    /// `Task` / `ValueTask`.
    NoValue,
    /// `Task<T>` / `ValueTask<T>`.
    Value(TypeId),
}

/// Immutable per-session table. Built once and passed by reference.
#[derive(Clone, Debug)]
pub struct WellKnownTypes {
    pub void: TypeId,
    pub task: TypeId,
    pub value_task: TypeId,
    discard_context_methods: Vec<Arc<str>>,
}

impl WellKnownTypes {
    pub fn new<S: AsRef<str>>(interner: &TypeInterner, discard_context_methods: &[S]) -> Self {
        WellKnownTypes {
            void: TypeId::VOID,
            task: interner.named(TASK, Vec::new()),
            value_task: interner.named(VALUE_TASK, Vec::new()),
            discard_context_methods: discard_context_methods
                .iter()
                .map(|name| Arc::from(name.as_ref()))
                .collect(),
        }
    }

    pub fn with_default_wrappers(interner: &TypeInterner) -> Self {
        Self::new(interner, DEFAULT_DISCARD_CONTEXT_METHODS)
    }

    /// Classify `ty` as a single-result asynchronous handle.
    pub fn task_result(&self, interner: &TypeInterner, ty: TypeId) -> Option<TaskResult> {
        let data = interner.lookup(ty)?;
        let name = data.simple_name()?;
        if name != TASK && name != VALUE_TASK {
            return None;
        }
        match data.type_arguments() {
            [] => Some(TaskResult::NoValue),
            [value] => Some(TaskResult::Value(*value)),
            _ => None,
        }
    }

    pub fn is_async_enumerable(&self, interner: &TypeInterner, ty: TypeId) -> bool {
        interner
            .lookup(ty)
            .as_ref()
            .and_then(TypeData::simple_name)
            .is_some_and(|name| ASYNC_ENUMERABLES.contains(&name))
    }

    pub fn is_void(&self, ty: TypeId) -> bool {
        ty == self.void
    }

    pub fn is_discard_context_method(&self, name: &str) -> bool {
        self.discard_context_methods
            .iter()
            .any(|method| &**method == name)
    }

    pub fn discard_context_methods(&self) -> &[Arc<str>] {
        &self.discard_context_methods
    }
}

#[cfg(test)]
#[path = "../tests/well_known_tests.rs"]
mod tests;
