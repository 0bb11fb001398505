//! Generic type-parameter substitution.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use unawait_common::limits::MAX_TYPE_SUBSTITUTION_DEPTH;

use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};

/// Mapping from type-parameter name to its argument.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<Arc<str>, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair up parameters with arguments. Missing arguments map to `ERROR`.
    pub fn from_args(params: &[Arc<str>], args: &[TypeId]) -> Self {
        let map = params
            .iter()
            .enumerate()
            .map(|(i, name)| (Arc::clone(name), args.get(i).copied().unwrap_or(TypeId::ERROR)))
            .collect();
        TypeSubstitution { map }
    }

    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.map.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Replace type parameters in `ty` according to `substitution`.
pub fn instantiate(interner: &TypeInterner, ty: TypeId, substitution: &TypeSubstitution) -> TypeId {
    if substitution.is_empty() {
        return ty;
    }
    instantiate_at_depth(interner, ty, substitution, 0)
}

fn instantiate_at_depth(
    interner: &TypeInterner,
    ty: TypeId,
    substitution: &TypeSubstitution,
    depth: u32,
) -> TypeId {
    if depth > MAX_TYPE_SUBSTITUTION_DEPTH {
        return TypeId::ERROR;
    }
    match interner.lookup(ty) {
        Some(TypeData::TypeParameter { name }) => substitution.get(&name).unwrap_or(ty),
        Some(TypeData::Named { name, args }) if !args.is_empty() => {
            let args = args
                .iter()
                .map(|&arg| instantiate_at_depth(interner, arg, substitution, depth + 1))
                .collect();
            interner.intern(TypeData::Named { name, args })
        }
        _ => ty,
    }
}
