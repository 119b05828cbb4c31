//! A minimal recursive-descent parser over the source grammar.
//!
//! This exists only so the AST builder has real input to fold. It is
//! single-error-per-parse: the first malformed token aborts the parse with
//! one `ParseError`, with no recovery or multi-error reporting — unlike the
//! semantic analyzer and MIR generator, which must keep going after a
//! source error, this stage has no reason to survive a broken parse.

use smol_str::SmolStr;

use scalarc_diagnostics::Span;

use crate::ast::{Ast, BinOp, ExprId, ExprKind, StmtId, StmtKind, TypeName};
use crate::ast_builder::{fold_binary_chain, fold_casts};
use crate::lexer::{lex, SpannedToken};
use crate::tokens::TokenKind;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

type PResult<T> = Result<T, ParseError>;

/// Parses `source` end to end, returning the resulting `Ast` or the first
/// lex/parse error encountered.
pub fn parse(source: &str) -> PResult<Ast> {
    let tokens = lex(source).map_err(|e| ParseError {
        message: format!("unrecognized token '{}'", e.lexeme),
        span: e.span,
    })?;
    tracing::debug!(tokens = tokens.len(), "lexed source");
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        ast: Ast::new(),
    };
    parser.parse_program()
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<SpannedToken>,
    pos: usize,
    ast: Ast,
}

impl Parser<'_> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or_else(|| self.eof_span())
    }

    fn eof_span(&self) -> Span {
        let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
        Span::new(end, end)
    }

    fn bump(&mut self) -> SpannedToken {
        let tok = self.tokens[self.pos];
        self.pos += 1;
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn eat(&mut self, kind: TokenKind) -> Option<SpannedToken> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<SpannedToken> {
        if let Some(tok) = self.eat(kind) {
            Ok(tok)
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self
            .peek()
            .map(|k| k.describe())
            .unwrap_or("end of input");
        ParseError {
            message: format!("expected {expected}, found {found}"),
            span: self.peek_span(),
        }
    }

    fn expect_ident(&mut self) -> PResult<(SmolStr, Span)> {
        self.expect(TokenKind::Ident)?;
        let prev = self.tokens[self.pos - 1];
        Ok((self.lexeme(prev.span).into(), prev.span))
    }

    /// Rebuilds an identifier's text from the source span it covers.
    ///
    /// The parser sees only token kinds and spans, never the underlying
    /// `&str` slices, so it stashes them in `source` for this lookup. See
    /// `parse` for where `source` is threaded in.
    fn lexeme(&self, span: Span) -> &str {
        &self.source[span.to_range()]
    }

    fn parse_program(&mut self) -> PResult<Ast> {
        while self.peek().is_some() {
            let stmt = self.parse_statement()?;
            self.ast.program.push(stmt);
        }
        Ok(std::mem::take(&mut self.ast))
    }

    fn parse_statement(&mut self) -> PResult<StmtId> {
        match self.peek() {
            Some(TokenKind::Var) => self.parse_var_or_array_decl(),
            Some(TokenKind::LBrace) => self.parse_block(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::Fn) => self.parse_function_def(),
            Some(TokenKind::Return) => self.parse_return(),
            Some(TokenKind::Ident) if self.peek_is_assignment() => self.parse_assignment(),
            Some(_) => self.parse_expr_statement(),
            None => Err(self.unexpected("a statement")),
        }
    }

    /// `IDENT '='` (not `==`) at the current position signals an
    /// assignment; anything else starting with an identifier is an
    /// expression statement (a bare call, for instance).
    fn peek_is_assignment(&self) -> bool {
        self.tokens.get(self.pos).map(|t| t.kind) == Some(TokenKind::Ident)
            && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::Eq)
    }

    fn parse_block(&mut self) -> PResult<StmtId> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.peek().is_none() {
                return Err(self.unexpected("'}'"));
            }
            stmts.push(self.parse_statement()?);
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(self
            .ast
            .push_stmt(StmtKind::Block(stmts), Span::new(start.start, end.end)))
    }

    fn parse_type_name(&mut self) -> PResult<TypeName> {
        let (name, name_span) = self.expect_ident()?;
        if self.eat(TokenKind::LBrack).is_some() {
            let size_tok = self.expect(TokenKind::Integer)?;
            let size: u64 = self
                .lexeme(size_tok.span)
                .parse()
                .expect("Integer token lexes only digits");
            let end = self.expect(TokenKind::RBrack)?.span;
            Ok(TypeName {
                name,
                array_size: Some(size),
                span: Span::new(name_span.start, end.end),
            })
        } else {
            Ok(TypeName {
                name,
                array_size: None,
                span: name_span,
            })
        }
    }

    fn parse_var_or_array_decl(&mut self) -> PResult<StmtId> {
        let start = self.expect(TokenKind::Var)?.span;
        let (name, _) = self.expect_ident()?;

        let declared_type = if self.eat(TokenKind::Colon).is_some() {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        let init = if self.eat(TokenKind::Eq).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let end = self.expect(TokenKind::Semi)?.span;
        let span = Span::new(start.start, end.end);

        let kind = match (&declared_type, init) {
            (Some(ty), None) if ty.array_size.is_some() => StmtKind::ArrayDecl {
                name,
                size: ty.array_size.unwrap(),
                element_type: TypeName {
                    name: ty.name.clone(),
                    array_size: None,
                    span: ty.span,
                },
            },
            _ => StmtKind::VarDecl {
                name,
                declared_type,
                init,
            },
        };
        Ok(self.ast.push_stmt(kind, span))
    }

    fn parse_assignment(&mut self) -> PResult<StmtId> {
        let (target, target_span) = self.expect_ident()?;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let end = self.expect(TokenKind::Semi)?.span;
        Ok(self.ast.push_stmt(
            StmtKind::Assignment { target, value },
            Span::new(target_span.start, end.end),
        ))
    }

    fn parse_if(&mut self) -> PResult<StmtId> {
        let start = self.expect(TokenKind::If)?.span;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.parse_block()?;
        let (else_block, end) = if self.eat(TokenKind::Else).is_some() {
            let else_block = self.parse_block()?;
            let span = self.ast.stmt(else_block).span;
            (Some(else_block), span)
        } else {
            (None, self.ast.stmt(then_block).span)
        };
        Ok(self.ast.push_stmt(
            StmtKind::If {
                cond,
                then_block,
                else_block,
            },
            Span::new(start.start, end.end),
        ))
    }

    fn parse_for(&mut self) -> PResult<StmtId> {
        let start = self.expect(TokenKind::For)?.span;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let end = self.ast.stmt(body).span;
        Ok(self
            .ast
            .push_stmt(StmtKind::For { cond, body }, Span::new(start.start, end.end)))
    }

    fn parse_function_def(&mut self) -> PResult<StmtId> {
        let start = self.expect(TokenKind::Fn)?.span;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                let (pname, _) = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                let pty = self.parse_type_name()?;
                params.push((pname, pty));
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Colon)?;
        let return_type = self.parse_type_name()?;
        let body = self.parse_block()?;
        let end = self.ast.stmt(body).span;
        Ok(self.ast.push_stmt(
            StmtKind::FunctionDef {
                name,
                params,
                return_type,
                body,
            },
            Span::new(start.start, end.end),
        ))
    }

    fn parse_return(&mut self) -> PResult<StmtId> {
        let start = self.expect(TokenKind::Return)?.span;
        let value = if self.at(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let end = self.expect(TokenKind::Semi)?.span;
        Ok(self
            .ast
            .push_stmt(StmtKind::Return { value }, Span::new(start.start, end.end)))
    }

    fn parse_expr_statement(&mut self) -> PResult<StmtId> {
        let start = self.peek_span();
        let value = self.parse_expr()?;
        let end = self.expect(TokenKind::Semi)?.span;
        Ok(self.ast.push_stmt(
            StmtKind::ExprStatement { value: Some(value) },
            Span::new(start.start, end.end),
        ))
    }

    // --- expression grammar: expr -> comparison -> additive -> multiplicative -> cast -> primary ---

    fn parse_expr(&mut self) -> PResult<ExprId> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> PResult<ExprId> {
        let lhs = self.parse_additive()?;
        if let Some(kind) = self.peek() {
            if kind.is_comparison_op() {
                let op: BinOp = kind.op_str().into();
                self.bump();
                let rhs = self.parse_additive()?;
                let span = Span::new(self.ast.expr(lhs).span.start, self.ast.expr(rhs).span.end);
                return Ok(self.ast.push_expr(ExprKind::Binary { op, lhs, rhs }, span));
            }
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> PResult<ExprId> {
        let first = self.parse_multiplicative()?;
        let mut rest = Vec::new();
        while let Some(kind) = self.peek() {
            if !kind.is_additive_op() {
                break;
            }
            let op: BinOp = kind.op_str().into();
            self.bump();
            rest.push((op, self.parse_multiplicative()?));
        }
        Ok(fold_binary_chain(&mut self.ast, first, rest))
    }

    fn parse_multiplicative(&mut self) -> PResult<ExprId> {
        let first = self.parse_cast()?;
        let mut rest = Vec::new();
        while let Some(kind) = self.peek() {
            if !kind.is_multiplicative_op() {
                break;
            }
            let op: BinOp = kind.op_str().into();
            self.bump();
            rest.push((op, self.parse_cast()?));
        }
        Ok(fold_binary_chain(&mut self.ast, first, rest))
    }

    fn parse_cast(&mut self) -> PResult<ExprId> {
        let base = self.parse_primary()?;
        let mut targets = Vec::new();
        while self.eat(TokenKind::As).is_some() {
            targets.push(self.parse_type_name()?);
        }
        Ok(fold_casts(&mut self.ast, base, targets))
    }

    fn parse_primary(&mut self) -> PResult<ExprId> {
        let start = self.peek_span();
        match self.peek() {
            Some(TokenKind::LBrack) => {
                self.bump();
                let mut elems = Vec::new();
                if !self.at(TokenKind::RBrack) {
                    loop {
                        elems.push(self.parse_expr()?);
                        if self.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                }
                let end = self.expect(TokenKind::RBrack)?.span;
                Ok(self.ast.push_expr(
                    ExprKind::ArrayLiteral(elems),
                    Span::new(start.start, end.end),
                ))
            }
            Some(TokenKind::Integer) => {
                let tok = self.bump();
                let value: i64 = self.lexeme(tok.span).parse().expect("Integer token lexes only digits");
                Ok(self.ast.push_expr(ExprKind::IntLiteral(value), tok.span))
            }
            Some(TokenKind::Decimal) => {
                let tok = self.bump();
                let value: f64 = self.lexeme(tok.span).parse().expect("Decimal token lexes a valid float");
                Ok(self.ast.push_expr(ExprKind::DecLiteral(value), tok.span))
            }
            Some(TokenKind::LParen) => {
                self.bump();
                let inner = self.parse_expr()?;
                let end = self.expect(TokenKind::RParen)?.span;
                // Reuses `inner`'s node but widens the recorded span to
                // include the parens, matching the other primaries below.
                self.ast.exprs[inner].span = Span::new(start.start, end.end);
                Ok(inner)
            }
            Some(TokenKind::Ident) => {
                let (name, name_span) = self.expect_ident()?;
                if self.eat(TokenKind::LBrack).is_some() {
                    let index = self.parse_expr()?;
                    let end = self.expect(TokenKind::RBrack)?.span;
                    Ok(self.ast.push_expr(
                        ExprKind::ArrayRef { name, index },
                        Span::new(name_span.start, end.end),
                    ))
                } else if self.eat(TokenKind::LParen).is_some() {
                    let mut args = Vec::new();
                    if !self.at(TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if self.eat(TokenKind::Comma).is_none() {
                                break;
                            }
                        }
                    }
                    let end = self.expect(TokenKind::RParen)?.span;
                    Ok(self.ast.push_expr(
                        ExprKind::Call { callee: name, args },
                        Span::new(name_span.start, end.end),
                    ))
                } else {
                    Ok(self.ast.push_expr(ExprKind::NameRef(name), name_span))
                }
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_var_decl_with_inferred_type() {
        let ast = parse("var x = 40 + 2;").unwrap();
        assert_eq!(ast.program.len(), 1);
        match &ast.stmt(ast.program[0]).kind {
            StmtKind::VarDecl { name, declared_type, init } => {
                assert_eq!(name.as_str(), "x");
                assert!(declared_type.is_none());
                assert!(init.is_some());
            }
            other => panic!("expected VarDecl, found {other:?}"),
        }
    }

    #[test]
    fn additive_chain_is_left_associative() {
        let ast = parse("var x = 1 + 2 - 3;").unwrap();
        let StmtKind::VarDecl { init: Some(init), .. } = &ast.stmt(ast.program[0]).kind else {
            panic!("expected VarDecl with initializer");
        };
        match &ast.expr(*init).kind {
            ExprKind::Binary { op, .. } => assert_eq!(op.as_str(), "-"),
            other => panic!("expected outer Binary, found {other:?}"),
        }
    }

    #[test]
    fn distinguishes_array_decl_from_var_decl() {
        let ast = parse("var a: int[3];").unwrap();
        assert!(matches!(ast.stmt(ast.program[0]).kind, StmtKind::ArrayDecl { .. }));

        let ast = parse("var b: int = 1;").unwrap();
        assert!(matches!(ast.stmt(ast.program[0]).kind, StmtKind::VarDecl { .. }));
    }

    #[test]
    fn parses_if_else_and_for() {
        let ast = parse("if (a == 1) { a = 2; } else { a = 3; }").unwrap();
        assert!(matches!(ast.stmt(ast.program[0]).kind, StmtKind::If { else_block: Some(_), .. }));

        let ast = parse("for (i < 3) { i = i + 1; }").unwrap();
        assert!(matches!(ast.stmt(ast.program[0]).kind, StmtKind::For { .. }));
    }

    #[test]
    fn parses_function_def_and_call() {
        let ast = parse("fn sq(x: int): int { return x * x; } var v = sq(5);").unwrap();
        assert_eq!(ast.program.len(), 2);
        assert!(matches!(ast.stmt(ast.program[0]).kind, StmtKind::FunctionDef { .. }));
    }

    #[test]
    fn parses_array_literal_initializer() {
        let ast = parse("var a: int[3] = [1, 2, 3];").unwrap();
        let StmtKind::VarDecl { init: Some(init), .. } = &ast.stmt(ast.program[0]).kind else {
            panic!("expected VarDecl with initializer");
        };
        match &ast.expr(*init).kind {
            ExprKind::ArrayLiteral(elems) => assert_eq!(elems.len(), 3),
            other => panic!("expected ArrayLiteral, found {other:?}"),
        }
    }

    #[test]
    fn reports_the_first_parse_error() {
        let err = parse("var x = ;").unwrap_err();
        assert!(err.message.contains("expected an expression"));
    }
}
