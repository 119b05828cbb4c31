//! MIR instructions (spec.md §3, §4.5): the non-terminator operations that
//! make up the body of a basic block.

use smol_str::SmolStr;

use crate::{MirType, PrettyPrint, Value, ValueId};

/// Opcode for a [`Instruction::Binary`], one of spec.md §3's
/// `{add, sub, mul, (s)div, icmp {eq,ne,lt,gt,le,ge}}` or their floating
/// counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpcode {
    Add,
    Sub,
    Mul,
    SDiv,
    ICmpEq,
    ICmpNe,
    ICmpLt,
    ICmpGt,
    ICmpLe,
    ICmpGe,
    FAdd,
    FSub,
    FMul,
    FDiv,
    FCmpEq,
    FCmpNe,
    FCmpLt,
    FCmpGt,
    FCmpLe,
    FCmpGe,
}

impl BinOpcode {
    /// Picks the integer opcode for `source_op`, one of
    /// `{+ - * / == != < > <= >=}` (spec.md §3).
    pub fn integer(source_op: &str) -> Self {
        match source_op {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::SDiv,
            "==" => Self::ICmpEq,
            "!=" => Self::ICmpNe,
            "<" => Self::ICmpLt,
            ">" => Self::ICmpGt,
            "<=" => Self::ICmpLe,
            ">=" => Self::ICmpGe,
            other => unreachable!("{other:?} is not one of spec.md §3's binary operators"),
        }
    }

    /// The floating counterpart of [`Self::integer`].
    pub fn float(source_op: &str) -> Self {
        match source_op {
            "+" => Self::FAdd,
            "-" => Self::FSub,
            "*" => Self::FMul,
            "/" => Self::FDiv,
            "==" => Self::FCmpEq,
            "!=" => Self::FCmpNe,
            "<" => Self::FCmpLt,
            ">" => Self::FCmpGt,
            "<=" => Self::FCmpLe,
            ">=" => Self::FCmpGe,
            other => unreachable!("{other:?} is not one of spec.md §3's binary operators"),
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::ICmpEq
                | Self::ICmpNe
                | Self::ICmpLt
                | Self::ICmpGt
                | Self::ICmpLe
                | Self::ICmpGe
                | Self::FCmpEq
                | Self::FCmpNe
                | Self::FCmpLt
                | Self::FCmpGt
                | Self::FCmpLe
                | Self::FCmpGe
        )
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::SDiv => "sdiv",
            Self::ICmpEq => "icmp eq",
            Self::ICmpNe => "icmp ne",
            Self::ICmpLt => "icmp lt",
            Self::ICmpGt => "icmp gt",
            Self::ICmpLe => "icmp le",
            Self::ICmpGe => "icmp ge",
            Self::FAdd => "fadd",
            Self::FSub => "fsub",
            Self::FMul => "fmul",
            Self::FDiv => "fdiv",
            Self::FCmpEq => "fcmp eq",
            Self::FCmpNe => "fcmp ne",
            Self::FCmpLt => "fcmp lt",
            Self::FCmpGt => "fcmp gt",
            Self::FCmpLe => "fcmp le",
            Self::FCmpGe => "fcmp ge",
        }
    }
}

/// Opcode for a [`Instruction::Unary`] (spec.md §3: `neg` int or float,
/// `not` int only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOpcode {
    NegInt,
    NegFloat,
    Not,
}

impl UnOpcode {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::NegInt => "neg",
            Self::NegFloat => "fneg",
            Self::Not => "not",
        }
    }
}

/// Sub-kind of a [`Instruction::Cast`] (spec.md §3, §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastKind {
    SIToFP,
    FPToSI,
    IntCast,
    FPCast,
    PtrToInt,
    IntToPtr,
    PtrCast,
}

impl CastKind {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::SIToFP => "sitofp",
            Self::FPToSI => "fptosi",
            Self::IntCast => "intcast",
            Self::FPCast => "fpcast",
            Self::PtrToInt => "ptrtoint",
            Self::IntToPtr => "inttoptr",
            Self::PtrCast => "ptrcast",
        }
    }
}

/// A non-terminator MIR instruction (spec.md §3). Each variant that produces
/// a value carries its own result [`ValueId`] and [`MirType`] so a later pass
/// never has to recompute a result's type from its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Reserves a stack slot. `result_ty` is the *pointer* type the
    /// instruction produces; `allocated_ty` is the pointee. `element_count`
    /// is set for array allocas (spec.md §3: "optional element count").
    Alloca {
        result: ValueId,
        result_ty: MirType,
        allocated_ty: MirType,
        element_count: Option<u64>,
    },
    /// Reads through `pointer`; `result_ty` is the pointee type.
    Load { result: ValueId, result_ty: MirType, pointer: Value },
    /// Writes `value` through `pointer`. Produces no value.
    Store { value: Value, pointer: Value },
    Binary { result: ValueId, op: BinOpcode, result_ty: MirType, lhs: Value, rhs: Value },
    Unary { result: ValueId, op: UnOpcode, result_ty: MirType, operand: Value },
    Cast { result: ValueId, kind: CastKind, result_ty: MirType, operand: Value },
    /// Calls `callee` with positional `args`. `result` is `None` for a
    /// void-returning callee.
    Call { result: Option<ValueId>, result_ty: MirType, callee: SmolStr, args: Vec<Value> },
    /// Pointer arithmetic for array indexing (spec.md §3: "base pointer,
    /// index, element type, declared aggregate type; result is a typed
    /// pointer"). `aggregate_ty` is the array type `base` points into.
    Gep {
        result: ValueId,
        result_ty: MirType,
        base: Value,
        index: Value,
        element_ty: MirType,
        aggregate_ty: MirType,
    },
}

impl Instruction {
    /// The value id this instruction defines, if any (spec.md §8 property 4:
    /// every register is defined by exactly one instruction).
    pub const fn result(&self) -> Option<ValueId> {
        match self {
            Instruction::Alloca { result, .. }
            | Instruction::Load { result, .. }
            | Instruction::Binary { result, .. }
            | Instruction::Unary { result, .. }
            | Instruction::Cast { result, .. }
            | Instruction::Gep { result, .. } => Some(*result),
            Instruction::Call { result, .. } => *result,
            Instruction::Store { .. } => None,
        }
    }

    pub fn result_type(&self) -> Option<&MirType> {
        match self {
            Instruction::Alloca { result_ty, .. }
            | Instruction::Load { result_ty, .. }
            | Instruction::Binary { result_ty, .. }
            | Instruction::Unary { result_ty, .. }
            | Instruction::Cast { result_ty, .. }
            | Instruction::Gep { result_ty, .. } => Some(result_ty),
            Instruction::Call { result, result_ty, .. } => result.is_some().then_some(result_ty),
            Instruction::Store { .. } => None,
        }
    }
}

impl PrettyPrint for Instruction {
    fn pretty_print(&self, _indent: usize) -> String {
        match self {
            Instruction::Alloca { result, allocated_ty, element_count, .. } => match element_count {
                Some(n) => format!("%{} = alloca {allocated_ty}, {n}", result.index()),
                None => format!("%{} = alloca {allocated_ty}", result.index()),
            },
            Instruction::Load { result, pointer, .. } => {
                format!("%{} = load {}", result.index(), pointer.pretty_print(0))
            }
            Instruction::Store { value, pointer } => {
                format!("store {}, {}", value.pretty_print(0), pointer.pretty_print(0))
            }
            Instruction::Binary { result, op, lhs, rhs, .. } => format!(
                "%{} = {} {}, {}",
                result.index(),
                op.mnemonic(),
                lhs.pretty_print(0),
                rhs.pretty_print(0)
            ),
            Instruction::Unary { result, op, operand, .. } => {
                format!("%{} = {} {}", result.index(), op.mnemonic(), operand.pretty_print(0))
            }
            Instruction::Cast { result, kind, result_ty, operand } => format!(
                "%{} = {} {} to {result_ty}",
                result.index(),
                kind.mnemonic(),
                operand.pretty_print(0)
            ),
            Instruction::Call { result, callee, args, .. } => {
                let args = args.iter().map(|a| a.pretty_print(0)).collect::<Vec<_>>().join(", ");
                match result {
                    Some(r) => format!("%{} = call @{callee}({args})", r.index()),
                    None => format!("call @{callee}({args})"),
                }
            }
            Instruction::Gep { result, base, index, element_ty, .. } => format!(
                "%{} = gep {element_ty}, {}, {}",
                result.index(),
                base.pretty_print(0),
                index.pretty_print(0)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_float_opcodes_pick_distinct_mnemonics_for_the_same_source_op() {
        assert_eq!(BinOpcode::integer("+").mnemonic(), "add");
        assert_eq!(BinOpcode::float("+").mnemonic(), "fadd");
        assert_eq!(BinOpcode::integer("<").mnemonic(), "icmp lt");
        assert_eq!(BinOpcode::float("<").mnemonic(), "fcmp lt");
    }

    #[test]
    fn comparison_opcodes_are_flagged_as_such() {
        assert!(BinOpcode::integer("==").is_comparison());
        assert!(!BinOpcode::integer("+").is_comparison());
    }

    #[test]
    fn alloca_with_element_count_prints_the_count() {
        let instr = Instruction::Alloca {
            result: ValueId::new(0),
            result_ty: MirType::pointer(MirType::Int64),
            allocated_ty: MirType::Int64,
            element_count: Some(4),
        };
        assert_eq!(instr.pretty_print(0), "%0 = alloca int, 4");
    }

    #[test]
    fn store_has_no_result() {
        let instr = Instruction::Store { value: Value::int(1), pointer: Value::register(ValueId::new(0), MirType::pointer(MirType::Int64)) };
        assert_eq!(instr.result(), None);
    }
}
