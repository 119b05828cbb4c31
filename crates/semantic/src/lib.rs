//! The semantic analyzer: scoped name resolution, type inference/checking,
//! and the symbol table they share.

pub mod analyzer;
pub mod annotations;
pub mod scope;

pub use analyzer::{analyze, AnalysisResult};
pub use annotations::Annotations;
pub use scope::{ScopeId, Symbol, SymbolId, SymbolKind, SymbolTable};
