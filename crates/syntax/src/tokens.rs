//! The lexical grammar, as a `logos`-derived token enum.
//!
//! The pipeline needs *some* producer of a parse tree, so this crate owns
//! lexing and parsing too: a thin recursive-descent parser over this token
//! stream is the least surprising way to supply one.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    // --- literals ---
    #[regex(r"[0-9]+\.[0-9]+")]
    Decimal,
    #[regex(r"[0-9]+")]
    Integer,

    // --- keywords (must precede the identifier regex) ---
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("fn")]
    Fn,
    #[token("return")]
    Return,
    #[token("as")]
    As,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // --- two-character operators (must precede their one-character prefixes) ---
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,

    // --- one-character operators and punctuation ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
}

impl TokenKind {
    /// A human name for diagnostics and "expected X, found Y" errors.
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            Decimal => "a decimal literal",
            Integer => "an integer literal",
            Var => "'var'",
            If => "'if'",
            Else => "'else'",
            For => "'for'",
            Fn => "'fn'",
            Return => "'return'",
            As => "'as'",
            Ident => "an identifier",
            EqEq => "'=='",
            Neq => "'!='",
            Le => "'<='",
            Ge => "'>='",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Lt => "'<'",
            Gt => "'>'",
            Eq => "'='",
            LParen => "'('",
            RParen => "')'",
            LBrace => "'{'",
            RBrace => "'}'",
            LBrack => "'['",
            RBrack => "']'",
            Comma => "','",
            Semi => "';'",
            Colon => "':'",
        }
    }

    pub const fn is_comparison_op(self) -> bool {
        matches!(
            self,
            TokenKind::EqEq | TokenKind::Neq | TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge
        )
    }

    pub const fn is_additive_op(self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    pub const fn is_multiplicative_op(self) -> bool {
        matches!(self, TokenKind::Star | TokenKind::Slash)
    }

    /// The operator spelling used as the `BinaryOp` tag.
    pub fn op_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            EqEq => "==",
            Neq => "!=",
            Lt => "<",
            Gt => ">",
            Le => "<=",
            Ge => ">=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            other => unreachable!("{other:?} is not a binary operator token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_a_var_decl_with_initializer() {
        let mut lexer = TokenKind::lexer("var x: int = 40 + 2;");
        let kinds: Vec<_> = lexer.by_ref().filter_map(Result::ok).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Var,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Integer,
                TokenKind::Plus,
                TokenKind::Integer,
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn two_character_operators_take_priority_over_their_prefix() {
        let mut lexer = TokenKind::lexer("a <= b");
        let kinds: Vec<_> = lexer.by_ref().filter_map(Result::ok).collect();
        assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Le, TokenKind::Ident]);
    }

    #[test]
    fn comments_are_skipped() {
        let mut lexer = TokenKind::lexer("1 // trailing comment\n2");
        let kinds: Vec<_> = lexer.by_ref().filter_map(Result::ok).collect();
        assert_eq!(kinds, vec![TokenKind::Integer, TokenKind::Integer]);
    }
}
