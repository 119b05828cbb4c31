//! The abstract syntax tree, folded from the parse tree by the AST builder.
//!
//! Nodes live in two flat arenas (`exprs`, `stmts`) indexed by
//! `ExprId`/`StmtId` rather than as a tree of `Box`-linked variants. The
//! resolved-type and resolved-symbol slots are *not* fields on these nodes
//! at all (which would force interior mutability) — they live in
//! `scalarc_semantic::Annotations`, a side table keyed by these same stable
//! ids. The AST itself stays a plain, immutable-shape value.

use smol_str::SmolStr;

use scalarc_diagnostics::Span;

/// The syntactic form of a type annotation (grammar `typeName`), *before*
/// the semantic analyzer resolves it to a `scalarc_syntax::types::Type`.
///
/// Kept distinct from `Type` because an unresolved name ("unknown type")
/// is representable here and is exactly the condition the analyzer's
/// `VarDeclTypeNotDefined` diagnostic detects — `Type` itself has no
/// "unknown" variant, by design: every resolved type is one of the closed
/// set of basic/array/pointer shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub name: SmolStr,
    pub array_size: Option<u64>,
    pub span: Span,
}

index_vec::define_index_type! {
    /// Identifies one expression node within an `Ast`'s expression arena.
    pub struct ExprId = u32;
}

index_vec::define_index_type! {
    /// Identifies one statement node within an `Ast`'s statement arena.
    pub struct StmtId = u32;
}

/// The binary operator tag, one of the nine tokens the grammar allows.
pub type BinOp = SmolStr;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLiteral(i64),
    DecLiteral(f64),
    ArrayLiteral(Vec<ExprId>),
    /// A bare name reference; resolved to a `Variable` or `Array` symbol.
    NameRef(SmolStr),
    ArrayRef { name: SmolStr, index: ExprId },
    Binary { op: BinOp, lhs: ExprId, rhs: ExprId },
    Call { callee: SmolStr, args: Vec<ExprId> },
    Cast { inner: ExprId, target: TypeName },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `var IDENT typeAnnot? ('=' expr)? ;` — also covers `var IDENT :
    /// T[N] = [..];`, the one array-typed case that carries an initializer
    /// (an array declaration with no initializer is `ArrayDecl` instead).
    VarDecl {
        name: SmolStr,
        declared_type: Option<TypeName>,
        init: Option<ExprId>,
    },
    /// `var IDENT : T[N] ;` with no initializer.
    ArrayDecl {
        name: SmolStr,
        element_type: TypeName,
        size: u64,
    },
    Assignment {
        target: SmolStr,
        value: ExprId,
    },
    If {
        cond: ExprId,
        then_block: StmtId,
        else_block: Option<StmtId>,
    },
    /// A while-style loop: condition, body-block.
    For {
        cond: ExprId,
        body: StmtId,
    },
    Return {
        value: Option<ExprId>,
    },
    /// `expr ;`. `value` is `None` only when parser recovery swallowed a
    /// malformed expression, which the analyzer reports as a warning
    /// ("there is no expression in the expression statement").
    ExprStatement {
        value: Option<ExprId>,
    },
    Block(Vec<StmtId>),
    FunctionDef {
        name: SmolStr,
        params: Vec<(SmolStr, TypeName)>,
        return_type: TypeName,
        body: StmtId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// The full AST for one translation unit: two node arenas plus the ordered
/// list of top-level statements (the `Program` node).
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub exprs: index_vec::IndexVec<ExprId, Expr>,
    pub stmts: index_vec::IndexVec<StmtId, Stmt>,
    pub program: Vec<StmtId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.exprs.push(Expr { kind, span })
    }

    pub fn push_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.stmts.push(Stmt { kind, span })
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    /// The statements of a `Block` node. Panics if `id` is not a `Block` —
    /// callers always reach this through a grammar position that guarantees
    /// it (`If.then_block`, `For.body`, `FunctionDef.body`).
    pub fn block_stmts(&self, id: StmtId) -> &[StmtId] {
        match &self.stmt(id).kind {
            StmtKind::Block(stmts) => stmts,
            other => unreachable!("expected a Block node, found {other:?}"),
        }
    }
}
