//! Token types for the JSON lexer.

use crate::Span;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural tokens
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,

    // Literal tokens
    /// Quoted string, quotes included: `"hello"`
    String,
    /// Number: `-12.5e3`
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    // Special tokens
    /// End of input
    Eof,
    /// String without a closing quote
    UnterminatedString,
    /// Something that starts like a number but is not one
    InvalidNumber,
    /// Unrecognized input
    Error,
}

impl TokenKind {
    /// Whether this token is a literal that can stand as a value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

/// A token with its kind, span, and source text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the source text.
    pub span: Span,
    /// The source text of this token.
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: &'src str) -> Self {
        Self { kind, span, text }
    }
}
