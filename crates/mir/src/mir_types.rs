//! Type translation: a pure mapping from source-level `Type` to the MIR's
//! own type universe, kept separate so a future backend can retarget it
//! without touching instruction/value shapes.

use scalarc_syntax::Type;

/// The MIR type universe. `Struct`/`Function` are reserved: no source
/// construct in this language version produces them (no struct
/// declarations, no first-class functions), kept as unreachable variants
/// for a future backend that widens the surface syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MirType {
    Int64,
    Int32,
    Char8,
    Float64,
    Float32,
    Bool,
    Void,
    Array { element: Box<MirType>, size: u64 },
    Pointer(Box<MirType>),
    Struct { name: String, fields: Vec<MirType> },
    Function { params: Vec<MirType>, return_type: Box<MirType> },
}

impl MirType {
    pub fn pointer(inner: MirType) -> Self {
        MirType::Pointer(Box::new(inner))
    }

    pub const fn is_integer(&self) -> bool {
        matches!(self, MirType::Int64 | MirType::Int32 | MirType::Char8)
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, MirType::Float64 | MirType::Float32)
    }

    pub const fn is_pointer(&self) -> bool {
        matches!(self, MirType::Pointer(_))
    }

    /// Bit width used to pick `%d` vs `%lld` when synthesizing `print`
    /// format strings.
    pub const fn int_bits(&self) -> Option<u32> {
        match self {
            MirType::Int64 => Some(64),
            MirType::Int32 => Some(32),
            MirType::Char8 => Some(8),
            _ => None,
        }
    }
}

impl std::fmt::Display for MirType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MirType::Int64 => write!(f, "int"),
            MirType::Int32 => write!(f, "i32"),
            MirType::Char8 => write!(f, "char"),
            MirType::Float64 => write!(f, "float"),
            MirType::Float32 => write!(f, "f32"),
            MirType::Bool => write!(f, "bool"),
            MirType::Void => write!(f, "void"),
            MirType::Array { element, size } => write!(f, "{element}[{size}]"),
            MirType::Pointer(inner) => write!(f, "{inner}*"),
            MirType::Struct { name, .. } => write!(f, "struct {name}"),
            MirType::Function { .. } => write!(f, "function"),
        }
    }
}

/// Translates a source `Type` to its MIR counterpart.
pub fn translate_type(ty: &Type) -> MirType {
    match ty {
        Type::Int => MirType::Int64,
        Type::I32 => MirType::Int32,
        Type::Char => MirType::Char8,
        Type::Float => MirType::Float64,
        Type::F32 => MirType::Float32,
        Type::Bool => MirType::Bool,
        Type::Void => MirType::Void,
        Type::Array { element, size } => MirType::Array {
            element: Box::new(translate_type(element)),
            size: *size,
        },
        Type::Pointer(inner) => MirType::Pointer(Box::new(translate_type(inner))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_i32_translate_to_distinct_widths() {
        assert_eq!(translate_type(&Type::Int), MirType::Int64);
        assert_eq!(translate_type(&Type::I32), MirType::Int32);
        assert_eq!(MirType::Int64.int_bits(), Some(64));
        assert_eq!(MirType::Int32.int_bits(), Some(32));
    }

    #[test]
    fn array_translation_preserves_size_and_nests_element() {
        let src = Type::Array { element: Box::new(Type::Float), size: 4 };
        let mir = translate_type(&src);
        assert_eq!(mir, MirType::Array { element: Box::new(MirType::Float64), size: 4 });
    }

    #[test]
    fn pointer_translation_wraps_pointee() {
        let mir = translate_type(&Type::Pointer(Box::new(Type::Int)));
        assert_eq!(mir, MirType::Pointer(Box::new(MirType::Int64)));
    }
}
