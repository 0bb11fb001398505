//! Type display.

use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};

/// Maximum depth of nested type arguments written out in full.
const MAX_FORMAT_DEPTH: u32 = 16;

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeFormatter { interner }
    }

    pub fn format(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write(id, 0, &mut out);
        out
    }

    fn write(&self, id: TypeId, depth: u32, out: &mut String) {
        if depth > MAX_FORMAT_DEPTH {
            out.push_str("...");
            return;
        }
        match self.interner.lookup(id) {
            Some(TypeData::Intrinsic(kind)) => out.push_str(kind.name()),
            Some(TypeData::Named { name, args }) => {
                out.push_str(&name);
                if !args.is_empty() {
                    out.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write(*arg, depth + 1, out);
                    }
                    out.push('>');
                }
            }
            Some(TypeData::TypeParameter { name }) => out.push_str(&name),
            None => out.push_str("error"),
        }
    }
}
