//! The symbol table: a tree of lexical scopes plus the symbols defined in
//! each, stored as two arenas rather than as pointer-linked nodes —
//! symbol→scope is a non-owning `ScopeId`, and the scope tree owns every
//! symbol reachable from it.

use index_vec::IndexVec;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use scalarc_diagnostics::{DiagnosticCode, DiagnosticSink};
use scalarc_syntax::Type;

index_vec::define_index_type! {
    pub struct ScopeId = u32;
}

index_vec::define_index_type! {
    pub struct SymbolId = u32;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable { ty: Type },
    Array { ty: Type },
    Function {
        return_type: Type,
        params: Vec<SymbolId>,
        /// The scope that holds this function's parameters; the function
        /// body's own `Block` pushes a further child of this scope.
        inner_scope: ScopeId,
    },
}

impl SymbolKind {
    pub const fn describe(&self) -> &'static str {
        match self {
            SymbolKind::Variable { .. } => "variable",
            SymbolKind::Array { .. } => "array",
            SymbolKind::Function { .. } => "function",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// The scope this symbol was *defined in* (not, for a function, the
    /// scope it owns).
    pub scope: ScopeId,
}

impl Symbol {
    /// The type an expression referencing this symbol takes on. Functions
    /// have no expression type of their own (they are only ever referenced
    /// through a call), so this is only meaningful for `Variable`/`Array`.
    pub fn value_type(&self) -> Option<&Type> {
        match &self.kind {
            SymbolKind::Variable { ty } | SymbolKind::Array { ty } => Some(ty),
            SymbolKind::Function { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    names: FxHashMap<SmolStr, SymbolId>,
}

/// Owns the scope tree and the symbol arena, and tracks the analyzer's
/// current-scope cursor as an explicit stack (so "leave past the root" is a
/// detectable bug rather than a panic).
pub struct SymbolTable {
    pub scopes: IndexVec<ScopeId, Scope>,
    pub symbols: IndexVec<SymbolId, Symbol>,
    stack: Vec<ScopeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let root = scopes.push(Scope::default());
        Self {
            scopes,
            symbols: IndexVec::new(),
            stack: vec![root],
        }
    }

    pub fn root(&self) -> ScopeId {
        self.stack[0]
    }

    pub fn current(&self) -> ScopeId {
        *self.stack.last().expect("the global scope is never popped")
    }

    /// Pushes a new child of `current()` and makes it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        let parent = self.current();
        let child = self.scopes.push(Scope {
            parent: Some(parent),
            names: FxHashMap::default(),
        });
        self.stack.push(child);
        child
    }

    /// Enters a specific scope (used to re-enter a function's own scope
    /// when visiting its body from a different place than where it was
    /// created, e.g. after a pre-pass that declares all functions first).
    pub fn enter_existing(&mut self, scope: ScopeId) {
        self.stack.push(scope);
    }

    /// Pops back to the parent. Raises `LeaveScopeEmptyStack` and leaves the
    /// cursor untouched if already at the root.
    pub fn leave_scope(&mut self, diags: &mut DiagnosticSink) {
        if self.stack.len() <= 1 {
            diags.compiler_internal(DiagnosticCode::LeaveScopeEmptyStack, &[]);
            return;
        }
        self.stack.pop();
    }

    /// Defines `name` in the current scope. Fails (and raises
    /// `VarDeclSymbolAlreadyDefined` at the call site, not here — the
    /// caller has the declaration's span) if already present *in this
    /// scope only*.
    pub fn define(&mut self, name: SmolStr, kind: SymbolKind) -> Result<SymbolId, SymbolId> {
        let scope = self.current();
        if let Some(&existing) = self.scopes[scope].names.get(&name) {
            return Err(existing);
        }
        let id = self.symbols.push(Symbol { name: name.clone(), kind, scope });
        self.scopes[scope].names.insert(name, id);
        Ok(id)
    }

    pub fn lookup_current(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes[scope].names.get(name).copied()
    }

    /// Walks from `scope` to the root, returning the first match.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut cursor = Some(scope);
        while let Some(s) = cursor {
            if let Some(id) = self.lookup_current(s, name) {
                return Some(id);
            }
            cursor = self.scopes[s].parent;
        }
        None
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_to_parent_scope() {
        let mut table = SymbolTable::new();
        table
            .define("x".into(), SymbolKind::Variable { ty: Type::Int })
            .unwrap();
        let child = table.enter_scope();
        assert_eq!(table.lookup(child, "x"), table.lookup_current(table.root(), "x"));
    }

    #[test]
    fn lookup_current_does_not_see_parent_bindings() {
        let mut table = SymbolTable::new();
        table
            .define("x".into(), SymbolKind::Variable { ty: Type::Int })
            .unwrap();
        let child = table.enter_scope();
        assert!(table.lookup_current(child, "x").is_none());
        assert!(table.lookup(child, "x").is_some());
    }

    #[test]
    fn redefining_in_the_same_scope_fails() {
        let mut table = SymbolTable::new();
        table
            .define("x".into(), SymbolKind::Variable { ty: Type::Int })
            .unwrap();
        assert!(table
            .define("x".into(), SymbolKind::Variable { ty: Type::Bool })
            .is_err());
    }

    #[test]
    fn redefining_in_a_child_scope_shadows_without_error() {
        let mut table = SymbolTable::new();
        table
            .define("x".into(), SymbolKind::Variable { ty: Type::Int })
            .unwrap();
        table.enter_scope();
        assert!(table
            .define("x".into(), SymbolKind::Variable { ty: Type::Bool })
            .is_ok());
    }

    #[test]
    fn leaving_the_root_scope_raises_a_compiler_internal_diagnostic() {
        let mut table = SymbolTable::new();
        let mut diags = DiagnosticSink::new();
        table.leave_scope(&mut diags);
        assert_eq!(diags.error_count(), 1);
        assert_eq!(table.current(), table.root());
    }
}
