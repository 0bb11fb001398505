//! Type interning for structural deduplication.
//!
//! `TypeData` keys are mapped to `TypeId` handles through a `DashMap`, the
//! reverse table is an append-only vector behind an `RwLock`. Both are safe to
//! share across checking threads.

use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::types::{IntrinsicKind, TypeData, TypeId};

pub struct TypeInterner {
    key_to_id: DashMap<TypeData, TypeId, FxBuildHasher>,
    id_to_key: RwLock<Vec<TypeData>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let interner = TypeInterner {
            key_to_id: DashMap::with_hasher(FxBuildHasher),
            id_to_key: RwLock::new(Vec::new()),
        };
        // Intrinsics occupy the reserved ids in declaration order.
        for kind in [IntrinsicKind::Error, IntrinsicKind::Unknown, IntrinsicKind::Void] {
            let id = interner.intern(TypeData::Intrinsic(kind));
            debug_assert_eq!(id, kind.type_id());
        }
        interner
    }

    /// Intern a type key and return its `TypeId`.
    /// If the key already exists, returns the existing id.
    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(id) = self.key_to_id.get(&data) {
            return *id;
        }
        let entry = self.key_to_id.entry(data.clone()).or_insert_with(|| {
            let mut storage = self
                .id_to_key
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let id = TypeId(storage.len() as u32);
            storage.push(data);
            id
        });
        *entry
    }

    /// Look up the `TypeData` for a given id.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        let storage = self
            .id_to_key
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        storage.get(id.0 as usize).cloned()
    }

    /// Intern a named type with the given type arguments.
    pub fn named(&self, name: &str, args: Vec<TypeId>) -> TypeId {
        self.intern(TypeData::Named {
            name: name.into(),
            args,
        })
    }

    pub fn type_parameter(&self, name: &str) -> TypeId {
        self.intern(TypeData::TypeParameter { name: name.into() })
    }

    /// Number of interned types, intrinsics included.
    pub fn len(&self) -> usize {
        self.id_to_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display text for a type.
    pub fn format(&self, id: TypeId) -> String {
        crate::format::TypeFormatter::new(self).format(id)
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "../tests/concurrent_tests.rs"]
mod concurrent_tests;
