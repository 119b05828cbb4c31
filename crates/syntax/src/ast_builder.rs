//! The AST builder's one genuinely non-obvious algorithm: reducing the
//! parser's flattened `additive`/`multiplicative`/cast-chain productions
//! into a left-associative tree of binary `Binary`/`Cast` nodes.
//!
//! The recursive-descent parser (`parser.rs`) calls these at the point each
//! flattened production is reduced; they are kept separate from the parser
//! itself so the fold algorithm can be read and tested in isolation.

use scalarc_diagnostics::Span;

use crate::ast::{Ast, BinOp, ExprId, ExprKind, TypeName};

fn span_of(ast: &Ast, id: ExprId) -> Span {
    ast.expr(id).span
}

/// Folds `first op1 second op2 third ...` into
/// `Binary(op2, Binary(op1, first, second), third)`, left to right.
///
/// Used for both `additive` (`+`/`-`, zero or more repetitions) and
/// `multiplicative` (`*`/`/`, zero or more repetitions). Comparison is
/// non-associative in this grammar (at most one comparator between two
/// additive terms) so it never goes through this helper — the parser
/// builds its single optional `Binary` node directly.
pub fn fold_binary_chain(ast: &mut Ast, first: ExprId, rest: Vec<(BinOp, ExprId)>) -> ExprId {
    let mut acc = first;
    for (op, operand) in rest {
        let span = Span::new(span_of(ast, acc).start, span_of(ast, operand).end);
        acc = ast.push_expr(
            ExprKind::Binary {
                op,
                lhs: acc,
                rhs: operand,
            },
            span,
        );
    }
    acc
}

/// Folds `expr as T1 as T2 as ...` into `Cast(Cast(expr, T1), T2)`, wrapping
/// repeatedly from left to right.
pub fn fold_casts(ast: &mut Ast, base: ExprId, casts: Vec<TypeName>) -> ExprId {
    let mut acc = base;
    for target in casts {
        let span = span_of(ast, acc);
        acc = ast.push_expr(ExprKind::Cast { inner: acc, target }, span);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(ast: &mut Ast, v: i64) -> ExprId {
        ast.push_expr(ExprKind::IntLiteral(v), Span::new(0, 1))
    }

    #[test]
    fn folds_additive_chain_left_associatively() {
        let mut ast = Ast::new();
        let a = lit(&mut ast, 1);
        let b = lit(&mut ast, 2);
        let c = lit(&mut ast, 3);
        let result = fold_binary_chain(
            &mut ast,
            a,
            vec![("+".into(), b), ("-".into(), c)],
        );
        match &ast.expr(result).kind {
            ExprKind::Binary { op, lhs, rhs } => {
                assert_eq!(op.as_str(), "-");
                assert_eq!(*rhs, c);
                match &ast.expr(*lhs).kind {
                    ExprKind::Binary { op, lhs, rhs } => {
                        assert_eq!(op.as_str(), "+");
                        assert_eq!(*lhs, a);
                        assert_eq!(*rhs, b);
                    }
                    other => panic!("expected nested Binary, found {other:?}"),
                }
            }
            other => panic!("expected Binary, found {other:?}"),
        }
    }

    #[test]
    fn empty_chain_returns_the_operand_unchanged() {
        let mut ast = Ast::new();
        let a = lit(&mut ast, 1);
        assert_eq!(fold_binary_chain(&mut ast, a, vec![]), a);
    }

    fn type_name(name: &str) -> TypeName {
        TypeName {
            name: name.into(),
            array_size: None,
            span: Span::new(0, 1),
        }
    }

    #[test]
    fn folds_cast_chain_left_to_right() {
        let mut ast = Ast::new();
        let a = lit(&mut ast, 1);
        let result = fold_casts(&mut ast, a, vec![type_name("float"), type_name("i32")]);
        match &ast.expr(result).kind {
            ExprKind::Cast { inner, target } => {
                assert_eq!(target.name.as_str(), "i32");
                match &ast.expr(*inner).kind {
                    ExprKind::Cast { inner, target } => {
                        assert_eq!(*inner, a);
                        assert_eq!(target.name.as_str(), "float");
                    }
                    other => panic!("expected nested Cast, found {other:?}"),
                }
            }
            other => panic!("expected Cast, found {other:?}"),
        }
    }
}
