//! The side table the analyzer populates instead of writing into the AST
//! directly: the AST stays an immutable-shape value, and resolved types and
//! symbols live here instead, keyed by the node's stable id.

use rustc_hash::FxHashMap;

use scalarc_syntax::{ExprId, StmtId, Type};

use crate::scope::SymbolId;

#[derive(Debug, Default)]
pub struct Annotations {
    expr_types: FxHashMap<ExprId, Type>,
    /// Resolved symbol for every `NameRef`, `ArrayRef`, and `Call` node.
    expr_symbols: FxHashMap<ExprId, SymbolId>,
    /// Resolved symbol for every `VarDecl`, `ArrayDecl`, `FunctionDef`, and
    /// `Assignment` node.
    stmt_symbols: FxHashMap<StmtId, SymbolId>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_expr_type(&mut self, id: ExprId, ty: Type) {
        self.expr_types.insert(id, ty);
    }

    pub fn expr_type(&self, id: ExprId) -> Option<&Type> {
        self.expr_types.get(&id)
    }

    pub fn set_expr_symbol(&mut self, id: ExprId, symbol: SymbolId) {
        self.expr_symbols.insert(id, symbol);
    }

    pub fn expr_symbol(&self, id: ExprId) -> Option<SymbolId> {
        self.expr_symbols.get(&id).copied()
    }

    pub fn set_stmt_symbol(&mut self, id: StmtId, symbol: SymbolId) {
        self.stmt_symbols.insert(id, symbol);
    }

    pub fn stmt_symbol(&self, id: StmtId) -> Option<SymbolId> {
        self.stmt_symbols.get(&id).copied()
    }
}
