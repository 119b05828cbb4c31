//! MIR basic blocks: a name, an ordered instruction list, and exactly one
//! terminator once the block is complete.

use index_vec::IndexVec;

use crate::{indent_str, BasicBlockId, Instruction, PrettyPrint, Terminator};

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub name: String,
    pub instructions: Vec<Instruction>,
    pub terminator: Terminator,
}

impl BasicBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: Vec::new(),
            terminator: Terminator::Unset,
        }
    }

    /// Appends `instr` unless the block is already sealed: once a block has
    /// a terminator, no further instructions may be appended; callers that
    /// keep generating after an unconditional `return` rely on this being a
    /// silent no-op rather than a panic.
    pub fn push(&mut self, instr: Instruction) {
        if self.is_sealed() {
            return;
        }
        self.instructions.push(instr);
    }

    /// Sets the terminator, sealing the block. A second call on an already
    /// sealed block is a no-op — the first terminator reached during
    /// generation wins, so a path stops appending once it's complete.
    pub fn seal(&mut self, terminator: Terminator) {
        if self.is_sealed() {
            return;
        }
        self.terminator = terminator;
    }

    pub const fn is_sealed(&self) -> bool {
        self.terminator.has_terminator()
    }
}

impl BasicBlock {
    /// `blocks` is the owning function's full block list, needed only to
    /// resolve the terminator's branch target names (see
    /// `Terminator::pretty_print`).
    pub fn pretty_print(&self, indent: usize, blocks: &IndexVec<BasicBlockId, BasicBlock>) -> String {
        let body_indent = indent_str(indent + 1);
        let mut out = format!("{}:\n", self.name);
        for instr in &self.instructions {
            out.push_str(&body_indent);
            out.push_str(&instr.pretty_print(0));
            out.push('\n');
        }
        out.push_str(&body_indent);
        out.push_str(&self.terminator.pretty_print(blocks));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MirType, Value, ValueId};

    #[test]
    fn pushing_after_seal_is_a_no_op() {
        let mut block = BasicBlock::new("entry");
        block.push(Instruction::Alloca {
            result: ValueId::new(0),
            result_ty: MirType::pointer(MirType::Int64),
            allocated_ty: MirType::Int64,
            element_count: None,
        });
        block.seal(Terminator::Return { value: None });
        block.push(Instruction::Alloca {
            result: ValueId::new(1),
            result_ty: MirType::pointer(MirType::Int64),
            allocated_ty: MirType::Int64,
            element_count: None,
        });
        assert_eq!(block.instructions.len(), 1);
    }

    #[test]
    fn sealing_twice_keeps_the_first_terminator() {
        let mut block = BasicBlock::new("entry");
        block.seal(Terminator::Return { value: Some(Value::int(1)) });
        block.seal(Terminator::Return { value: Some(Value::int(2)) });
        assert_eq!(block.terminator, Terminator::Return { value: Some(Value::int(1)) });
    }

    #[test]
    fn pretty_print_lists_instructions_then_terminator() {
        let mut block = BasicBlock::new("entry");
        block.push(Instruction::Store { value: Value::int(1), pointer: Value::register(ValueId::new(0), MirType::pointer(MirType::Int64)) });
        block.seal(Terminator::Return { value: None });
        let text = block.pretty_print(0, &IndexVec::new());
        assert!(text.starts_with("entry:\n"));
        assert!(text.ends_with("ret void"));
    }
}
