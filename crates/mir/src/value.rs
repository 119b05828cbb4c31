//! MIR values (spec.md §3): literals, registers, and arguments. Every value
//! carries its own `MirType` rather than relying on the consumer to look one
//! up, since the textual MIR form (§6.2) prints `<type> <value>` inline.

use smol_str::SmolStr;

use crate::{MirType, PrettyPrint, ValueId};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A compile-time constant; `text` is its canonical printed form.
    Literal { ty: MirType, text: String },
    /// The result of exactly one producing instruction in the same function.
    Register { ty: MirType, id: ValueId },
    /// A function parameter, named and positioned.
    Argument { ty: MirType, name: SmolStr, index: usize },
}

impl Value {
    pub fn int(value: i64) -> Self {
        Value::Literal { ty: MirType::Int64, text: value.to_string() }
    }

    pub fn i32(value: i32) -> Self {
        Value::Literal { ty: MirType::Int32, text: value.to_string() }
    }

    pub fn float(value: f64) -> Self {
        Value::Literal { ty: MirType::Float64, text: value.to_string() }
    }

    pub fn f32(value: f32) -> Self {
        Value::Literal { ty: MirType::Float32, text: value.to_string() }
    }

    pub fn boolean(value: bool) -> Self {
        Value::Literal { ty: MirType::Bool, text: value.to_string() }
    }

    pub fn register(id: ValueId, ty: MirType) -> Self {
        Value::Register { ty, id }
    }

    pub fn argument(name: SmolStr, index: usize, ty: MirType) -> Self {
        Value::Argument { ty, name, index }
    }

    pub const fn ty(&self) -> &MirType {
        match self {
            Value::Literal { ty, .. } | Value::Register { ty, .. } | Value::Argument { ty, .. } => ty,
        }
    }

    pub const fn as_register(&self) -> Option<ValueId> {
        match self {
            Value::Register { id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl PrettyPrint for Value {
    fn pretty_print(&self, _indent: usize) -> String {
        match self {
            Value::Literal { ty, text } => format!("{ty} {text}"),
            Value::Register { ty, id } => format!("{ty} %{}", id.index()),
            Value::Argument { ty, name, .. } => format!("{ty} %{name}"),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pretty_print(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_prints_as_type_then_text() {
        assert_eq!(Value::int(42).pretty_print(0), "int 42");
        assert_eq!(Value::boolean(true).pretty_print(0), "bool true");
    }

    #[test]
    fn register_prints_with_percent_sigil() {
        let id = ValueId::new(7);
        assert_eq!(Value::register(id, MirType::Int64).pretty_print(0), "int %7");
    }
}
