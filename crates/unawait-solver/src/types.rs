//! `TypeId` handles and the structural `TypeData` they stand for.

use std::fmt;
use std::sync::Arc;

/// Interned type handle. Equal ids mean identical types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Anything that failed to resolve.
    pub const ERROR: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const VOID: TypeId = TypeId(2);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 3;

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    /// A type is resolved when it carries real information.
    #[inline]
    pub const fn is_resolved(self) -> bool {
        self.0 != Self::ERROR.0 && self.0 != Self::UNKNOWN.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Error,
    Unknown,
    Void,
}

impl IntrinsicKind {
    pub const fn type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Error => TypeId::ERROR,
            IntrinsicKind::Unknown => TypeId::UNKNOWN,
            IntrinsicKind::Void => TypeId::VOID,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Error => "error",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Void => "void",
        }
    }
}

/// Structural type key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// A named type, possibly generic: `int`, `Task`, `Task<int>`.
    Named { name: Arc<str>, args: Vec<TypeId> },
    /// A class type parameter (`T` inside `class Task<T>`).
    TypeParameter { name: Arc<str> },
}

impl TypeData {
    /// The simple name of a named type: the text after the last `.`.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeData::Named { name, .. } => Some(name.rsplit('.').next().unwrap_or(name.as_ref())),
            _ => None,
        }
    }

    pub fn type_arguments(&self) -> &[TypeId] {
        match self {
            TypeData::Named { args, .. } => args,
            _ => &[],
        }
    }
}
