//! Program-wide declarations: classes, their methods and free functions.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;
use unawait_parser::{NodeArena, NodeIndex, NodeKind, ParserState};
use unawait_solver::{TypeData, TypeId, TypeInterner};

use crate::prelude::{PRELUDE_FILE_NAME, PRELUDE_SOURCE};

/// A callable signature as far as the analysis needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: Arc<str>,
    /// May mention the owning class's type parameters.
    pub return_type: TypeId,
    pub parameter_count: usize,
    pub is_static: bool,
}

/// Overload set.
pub(crate) type Overloads = SmallVec<[FunctionSignature; 1]>;

#[derive(Clone, Debug)]
pub struct ClassInfo {
    pub name: Arc<str>,
    pub type_parameters: Vec<Arc<str>>,
    pub methods: FxHashMap<Arc<str>, Overloads>,
    pub is_extern: bool,
}

impl ClassInfo {
    pub fn method(&self, name: &str, argument_count: usize) -> Option<&FunctionSignature> {
        select_overload(self.methods.get(name)?, argument_count)
    }
}

/// Classes (by simple name, one entry per arity) and free functions.
#[derive(Clone, Debug, Default)]
pub struct DeclarationTable {
    classes: IndexMap<Arc<str>, SmallVec<[ClassInfo; 1]>>,
    functions: FxHashMap<Arc<str>, Overloads>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the prelude declarations.
    pub fn with_prelude(interner: &TypeInterner) -> Self {
        let mut table = Self::new();
        let mut parser = ParserState::new(PRELUDE_FILE_NAME.to_string(), PRELUDE_SOURCE.to_string());
        let root = parser.parse_source_file();
        debug_assert!(parser.get_diagnostics().is_empty());
        let arena = parser.into_arena();
        table.declare_source_file(interner, &arena, root);
        table
    }

    /// Collect the classes and top-level functions of one file.
    pub fn declare_source_file(&mut self, interner: &TypeInterner, arena: &NodeArena, root: NodeIndex) {
        let Some(NodeKind::SourceFile { items }) = arena.kind(root) else {
            return;
        };
        for &item in items {
            match arena.kind(item) {
                Some(NodeKind::ClassDeclaration {
                    name,
                    type_parameters,
                    members,
                    is_extern,
                }) => {
                    let mut methods: FxHashMap<Arc<str>, Overloads> = FxHashMap::default();
                    for &member in members {
                        if let Some(signature) =
                            function_signature(interner, arena, member, type_parameters)
                        {
                            methods
                                .entry(Arc::clone(&signature.name))
                                .or_default()
                                .push(signature);
                        }
                    }
                    self.add_class(ClassInfo {
                        name: Arc::clone(name),
                        type_parameters: type_parameters.clone(),
                        methods,
                        is_extern: *is_extern,
                    });
                }
                Some(NodeKind::FunctionDeclaration(_)) => {
                    if let Some(signature) = function_signature(interner, arena, item, &[]) {
                        self.functions
                            .entry(Arc::clone(&signature.name))
                            .or_default()
                            .push(signature);
                    }
                }
                _ => {}
            }
        }
        debug!(
            file = arena.file_name(),
            classes = self.classes.len(),
            functions = self.functions.len(),
            "declared source file"
        );
    }

    /// Partial declarations of the same class and arity are merged.
    fn add_class(&mut self, class: ClassInfo) {
        let entries = self.classes.entry(Arc::clone(&class.name)).or_default();
        match entries
            .iter_mut()
            .find(|existing| existing.type_parameters.len() == class.type_parameters.len())
        {
            Some(existing) => {
                for (name, overloads) in class.methods {
                    existing.methods.entry(name).or_default().extend(overloads);
                }
            }
            None => entries.push(class),
        }
    }

    pub fn class(&self, name: &str, arity: usize) -> Option<&ClassInfo> {
        self.classes
            .get(name)?
            .iter()
            .find(|class| class.type_parameters.len() == arity)
    }

    pub fn has_class_named(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values().flatten()
    }

    pub fn function(&self, name: &str, argument_count: usize) -> Option<&FunctionSignature> {
        select_overload(self.functions.get(name)?, argument_count)
    }
}

/// Pick the overload taking `argument_count` arguments. Several candidates
/// resolve only when they agree on the result type.
pub(crate) fn select_overload(
    overloads: &[FunctionSignature],
    argument_count: usize,
) -> Option<&FunctionSignature> {
    let mut candidates = overloads
        .iter()
        .filter(|signature| signature.parameter_count == argument_count);
    let first = candidates.next()?;
    candidates
        .all(|other| other.return_type == first.return_type)
        .then_some(first)
}

/// Signature of a function-like node with an explicit result type.
pub(crate) fn function_signature(
    interner: &TypeInterner,
    arena: &NodeArena,
    node: NodeIndex,
    type_parameters: &[Arc<str>],
) -> Option<FunctionSignature> {
    let data = arena.function_data(node)?;
    let name = data.name.clone()?;
    if data.return_type.is_none() {
        return None;
    }
    Some(FunctionSignature {
        name,
        return_type: resolve_type_reference(interner, arena, data.return_type, type_parameters),
        parameter_count: data.parameters.len(),
        is_static: data.modifiers.contains(unawait_parser::ModifierFlags::STATIC),
    })
}

/// Intern the type a `TypeReference` node denotes. Names listed in
/// `type_parameters` become type parameters.
pub(crate) fn resolve_type_reference(
    interner: &TypeInterner,
    arena: &NodeArena,
    node: NodeIndex,
    type_parameters: &[Arc<str>],
) -> TypeId {
    let Some(NodeKind::TypeReference {
        name,
        type_arguments,
    }) = arena.kind(node)
    else {
        return TypeId::ERROR;
    };
    if &**name == "void" {
        return TypeId::VOID;
    }
    if name.is_empty() {
        return TypeId::ERROR;
    }
    if type_arguments.is_empty() && type_parameters.iter().any(|param| param == name) {
        return interner.intern(TypeData::TypeParameter {
            name: Arc::clone(name),
        });
    }
    let args = type_arguments
        .iter()
        .map(|&arg| resolve_type_reference(interner, arena, arg, type_parameters))
        .collect();
    interner.intern(TypeData::Named {
        name: Arc::clone(name),
        args,
    })
}
