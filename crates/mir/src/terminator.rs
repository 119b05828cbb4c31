//! MIR terminators (spec.md §3, §4.5): the one control-transferring
//! instruction every completed basic block ends with.

use index_vec::IndexVec;

use crate::{BasicBlock, BasicBlockId, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    /// Ends function execution, optionally with a value.
    Return { value: Option<Value> },
    /// Unconditional transfer to `target`.
    Branch { target: BasicBlockId },
    /// Transfers to `then_block` if `condition` is true, else `else_block`.
    CondBranch { condition: Value, then_block: BasicBlockId, else_block: BasicBlockId },
    /// Placeholder used before a block's real terminator is set; never
    /// survives past generation (spec.md §8 property 3: every completed
    /// block has exactly one terminator).
    Unset,
}

impl Terminator {
    pub const fn has_terminator(&self) -> bool {
        !matches!(self, Terminator::Unset)
    }

    pub fn target_blocks(&self) -> Vec<BasicBlockId> {
        match self {
            Terminator::Branch { target } => vec![*target],
            Terminator::CondBranch { then_block, else_block, .. } => vec![*then_block, *else_block],
            Terminator::Return { .. } | Terminator::Unset => vec![],
        }
    }
}

impl Terminator {
    /// Renders this terminator using `blocks` to resolve each target's
    /// `name` rather than its raw index — the block header a branch points
    /// at is printed as `<name>:` (see `basic_block.rs`), so the branch
    /// itself must cite that same name for the dump to be round-trippable
    /// (spec.md §6.2, §8 property 9).
    pub fn pretty_print(&self, blocks: &IndexVec<BasicBlockId, BasicBlock>) -> String {
        match self {
            Terminator::Return { value: Some(v) } => format!("ret {}", v.pretty_print(0)),
            Terminator::Return { value: None } => "ret void".to_string(),
            Terminator::Branch { target } => format!("br label %{}", blocks[*target].name),
            Terminator::CondBranch { condition, then_block, else_block } => format!(
                "br {}, label %{}, label %{}",
                condition.pretty_print(0),
                blocks[*then_block].name,
                blocks[*else_block].name
            ),
            Terminator::Unset => "<unterminated>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MirType, PrettyPrint, ValueId};

    #[test]
    fn return_with_value_prints_type_and_value() {
        let t = Terminator::Return { value: Some(Value::int(0)) };
        assert_eq!(t.pretty_print(&IndexVec::new()), "ret int 0");
    }

    #[test]
    fn branch_prints_the_target_blocks_name_not_its_index() {
        let mut blocks = IndexVec::new();
        blocks.push(BasicBlock::new("entry"));
        let merge = blocks.push(BasicBlock::new("if.merge"));
        let t = Terminator::Branch { target: merge };
        assert_eq!(t.pretty_print(&blocks), "br label %if.merge");
    }

    #[test]
    fn cond_branch_reports_both_targets() {
        let t = Terminator::CondBranch {
            condition: Value::register(ValueId::new(0), MirType::Bool),
            then_block: BasicBlockId::new(1),
            else_block: BasicBlockId::new(2),
        };
        assert_eq!(t.target_blocks(), vec![BasicBlockId::new(1), BasicBlockId::new(2)]);
    }
}
