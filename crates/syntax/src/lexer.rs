//! Turns source text into a flat vector of spanned tokens the parser can
//! index into by position, rather than driving `logos::Lexer` as a true
//! streaming iterator — the parser needs lookahead and backtracking-free
//! peeking, which is simplest against a materialized slice.

use logos::Logos;
use scalarc_diagnostics::Span;

use crate::tokens::TokenKind;

#[derive(Debug, Clone, Copy)]
pub struct SpannedToken {
    pub kind: TokenKind,
    pub span: Span,
}

/// A lexeme that `logos` could not classify into any `TokenKind`.
#[derive(Debug, Clone)]
pub struct LexError {
    pub span: Span,
    pub lexeme: String,
}

/// Lexes `source` in full, returning every token or the first lex error
/// encountered. This project does not attempt lexer error recovery: the
/// front end that later stages build on doesn't need to survive a malformed
/// token stream, only a malformed *program*.
pub fn lex(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(SpannedToken {
                kind,
                span: Span::new(span.start, span.end),
            }),
            Err(()) => {
                return Err(LexError {
                    span: Span::new(span.start, span.end),
                    lexeme: lexer.slice().to_string(),
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_reports_span_of_each_token() {
        let tokens = lex("ab cd").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 5));
    }

    #[test]
    fn lex_reports_the_offending_lexeme_on_error() {
        let err = lex("1 @ 2").unwrap_err();
        assert_eq!(err.lexeme, "@");
    }
}
