//! Structural errors raised while reading a document.

use crate::Span;

/// Why the document could not be turned into events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// A token that is not legal at this position.
    UnexpectedToken,
    /// Input ended in the middle of a value.
    UnexpectedEof,
    /// Object opened here was never closed.
    UnclosedObject,
    /// Array opened here was never closed.
    UnclosedArray,
    /// String literal without a closing quote.
    UnterminatedString,
    /// Invalid escape sequence in a string.
    InvalidEscape(String),
    /// Malformed number literal.
    InvalidNumber,
    /// Expected a quoted property name.
    ExpectedKey,
    /// Expected `:` after a property name.
    ExpectedColon,
    /// Expected a value.
    ExpectedValue,
    /// Comma directly before `}` or `]`.
    TrailingComma,
    /// Something after the root value.
    TrailingContent,
    /// `next_event` called on an exhausted stream.
    Exhausted,
}

impl std::fmt::Display for ReadErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadErrorKind::UnexpectedToken => write!(f, "unexpected token"),
            ReadErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
            ReadErrorKind::UnclosedObject => write!(f, "unclosed object"),
            ReadErrorKind::UnclosedArray => write!(f, "unclosed array"),
            ReadErrorKind::UnterminatedString => write!(f, "unterminated string"),
            ReadErrorKind::InvalidEscape(seq) => write!(f, "invalid escape sequence '{seq}'"),
            ReadErrorKind::InvalidNumber => write!(f, "invalid number"),
            ReadErrorKind::ExpectedKey => write!(f, "expected property name"),
            ReadErrorKind::ExpectedColon => write!(f, "expected ':'"),
            ReadErrorKind::ExpectedValue => write!(f, "expected value"),
            ReadErrorKind::TrailingComma => write!(f, "trailing comma"),
            ReadErrorKind::TrailingContent => write!(f, "trailing content after document"),
            ReadErrorKind::Exhausted => write!(f, "no more events"),
        }
    }
}

/// A structural error with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    /// The kind of error.
    pub kind: ReadErrorKind,
    /// Source location.
    pub span: Span,
}

impl ReadError {
    /// Create a new read error.
    pub fn new(kind: ReadErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.span.start)
    }
}

impl std::error::Error for ReadError {}
