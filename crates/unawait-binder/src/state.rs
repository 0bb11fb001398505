//! Binder state: scopes and the model under construction.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;
use unawait_parser::{NodeArena, NodeIndex, NodeKind};
use unawait_solver::{TypeId, TypeInterner};

use crate::declarations::{DeclarationTable, Overloads};
use crate::semantic::SemanticModel;

/// One lexical scope.
#[derive(Debug, Default)]
pub(crate) struct Scope {
    pub(crate) values: FxHashMap<Arc<str>, TypeId>,
    pub(crate) functions: FxHashMap<Arc<str>, Overloads>,
}

/// The class whose members are being bound.
#[derive(Debug)]
pub(crate) struct ClassContext {
    pub(crate) name: Arc<str>,
    pub(crate) type_parameters: Vec<Arc<str>>,
}

pub struct BinderState<'a> {
    pub(crate) interner: &'a TypeInterner,
    pub(crate) declarations: &'a DeclarationTable,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) class_context: Option<ClassContext>,
    pub(crate) model: SemanticModel,
}

impl<'a> BinderState<'a> {
    pub fn new(interner: &'a TypeInterner, declarations: &'a DeclarationTable) -> Self {
        BinderState {
            interner,
            declarations,
            scopes: Vec::new(),
            class_context: None,
            model: SemanticModel::new(),
        }
    }

    /// Bind one source file and return its model.
    #[tracing::instrument(level = "debug", skip_all, fields(file = arena.file_name()))]
    pub fn bind_source_file(mut self, arena: &NodeArena, root: NodeIndex) -> SemanticModel {
        let Some(NodeKind::SourceFile { items }) = arena.kind(root) else {
            return self.model;
        };
        self.push_scope();
        for &item in items {
            match arena.kind(item) {
                Some(NodeKind::ClassDeclaration {
                    name,
                    type_parameters,
                    members,
                    ..
                }) => {
                    self.class_context = Some(ClassContext {
                        name: Arc::clone(name),
                        type_parameters: type_parameters.clone(),
                    });
                    for &member in members {
                        self.bind_function(arena, member);
                    }
                    self.class_context = None;
                }
                Some(NodeKind::FunctionDeclaration(_)) => self.bind_function(arena, item),
                _ => {}
            }
        }
        self.pop_scope();
        debug!(
            types = self.model.types.len(),
            calls = self.model.call_targets.len(),
            "bound source file"
        );
        self.model
    }

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn declare_value(&mut self, name: &Arc<str>, ty: TypeId) {
        if name.is_empty() {
            return;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.values.insert(Arc::clone(name), ty);
        }
    }

    pub(crate) fn lookup_value(&self, name: &str) -> Option<TypeId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.values.get(name).copied())
    }

    pub(crate) fn class_type_parameters(&self) -> &[Arc<str>] {
        self.class_context
            .as_ref()
            .map_or(&[], |class| class.type_parameters.as_slice())
    }
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod tests;
