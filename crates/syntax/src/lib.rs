//! Lexing, parsing, and the abstract syntax tree.
//!
//! This crate owns the source-level `Type` representation too, since both
//! the AST and the semantic analyzer need it and neither owns the other.

pub mod ast;
pub mod ast_builder;
pub mod lexer;
pub mod parser;
pub mod tokens;
pub mod types;

pub use ast::{Ast, Expr, ExprId, ExprKind, Stmt, StmtId, StmtKind, TypeName};
pub use parser::{parse, ParseError};
pub use types::Type;
