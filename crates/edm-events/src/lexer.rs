//! Lexer for JSON document text.

use tracing::trace;

use crate::{Span, Token, TokenKind};

/// A lexer that produces tokens from JSON source text.
///
/// Whitespace between tokens is skipped; it carries no meaning in JSON.
#[derive(Clone)]
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            remaining: source,
            pos: 0,
        }
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Advance by one character and return it.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        self.remaining = &self.remaining[c.len_utf8()..];
        Some(c)
    }

    /// Consume characters while `pred` holds.
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }

    /// Create a token from the given start position to current position.
    fn token(&self, kind: TokenKind, start: u32) -> Token<'src> {
        let span = Span::new(start, self.pos);
        let text = &self.source[start as usize..self.pos as usize];
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, text)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        self.advance_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'));

        let start = self.pos;
        let Some(c) = self.peek() else {
            return self.token(TokenKind::Eof, start);
        };

        match c {
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),
            '"' => self.lex_string(),
            '-' | '0'..='9' => self.lex_number(),
            c if c.is_ascii_alphabetic() => self.lex_keyword(),
            _ => self.single(TokenKind::Error),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token<'src> {
        let start = self.pos;
        self.advance();
        self.token(kind, start)
    }

    /// Lex a quoted string. Escapes are validated later, when the reader
    /// unescapes the text.
    fn lex_string(&mut self) -> Token<'src> {
        let start = self.pos;
        self.advance();

        loop {
            match self.peek() {
                None => return self.token(TokenKind::UnterminatedString, start),
                // JSON strings never hold raw control characters.
                Some(c) if c < ' ' => return self.token(TokenKind::UnterminatedString, start),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    if self.peek().is_some() {
                        self.advance();
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        self.token(TokenKind::String, start)
    }

    /// Lex `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
    fn lex_number(&mut self) -> Token<'src> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }

        match self.peek() {
            Some('0') => {
                self.advance();
            }
            Some('1'..='9') => self.advance_while(|c| c.is_ascii_digit()),
            _ => return self.token(TokenKind::InvalidNumber, start),
        }

        if self.peek() == Some('.') {
            self.advance();
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return self.token(TokenKind::InvalidNumber, start);
            }
            self.advance_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return self.token(TokenKind::InvalidNumber, start);
            }
            self.advance_while(|c| c.is_ascii_digit());
        }

        self.token(TokenKind::Number, start)
    }

    fn lex_keyword(&mut self) -> Token<'src> {
        let start = self.pos;
        self.advance_while(|c| c.is_ascii_alphanumeric());
        let kind = match &self.source[start as usize..self.pos as usize] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Error,
        };
        self.token(kind, start)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
