//! MIR functions: a name, return type, ordered parameters, and an ordered
//! list of basic blocks whose first entry is the entry block.

use index_vec::IndexVec;
use smol_str::SmolStr;

use crate::{indent_str, BasicBlock, BasicBlockId, MirType, PrettyPrint};

#[derive(Debug, Clone)]
pub struct Param {
    pub name: SmolStr,
    pub ty: MirType,
}

#[derive(Debug, Clone)]
pub struct MirFunction {
    pub name: SmolStr,
    pub return_type: MirType,
    pub params: Vec<Param>,
    pub blocks: IndexVec<BasicBlockId, BasicBlock>,
}

impl MirFunction {
    pub fn new(name: impl Into<SmolStr>, return_type: MirType, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
            blocks: IndexVec::new(),
        }
    }

    /// The entry block: the first block is always the entry block.
    pub fn entry(&self) -> BasicBlockId {
        BasicBlockId::new(0)
    }

    pub fn push_block(&mut self, name: impl Into<String>) -> BasicBlockId {
        self.blocks.push(BasicBlock::new(name))
    }

    pub fn block(&self, id: BasicBlockId) -> &BasicBlock {
        &self.blocks[id]
    }

    pub fn block_mut(&mut self, id: BasicBlockId) -> &mut BasicBlock {
        &mut self.blocks[id]
    }

    /// Checks the structural properties that can be verified on a finished
    /// function: a non-empty block list, and every block sealed with
    /// exactly one terminator.
    pub fn is_well_formed(&self) -> bool {
        !self.blocks.is_empty() && self.blocks.iter().all(|b| b.is_sealed())
    }
}

impl PrettyPrint for MirFunction {
    fn pretty_print(&self, indent: usize) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} %{}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("define {} @{}({}) {{\n", self.return_type, self.name, params);
        let body_indent = indent_str(indent + 1);
        for (i, block) in self.blocks.iter_enumerated() {
            if i.index() > 0 {
                out.push('\n');
            }
            for line in block.pretty_print(indent, &self.blocks).lines() {
                out.push_str(&body_indent);
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('}');
        out
    }
}
