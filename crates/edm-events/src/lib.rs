#![doc = include_str!("../README.md")]
//! Forward-only parse events over JSON documents.
//!
//! [`JsonReader`] turns JSON text into a stream of [`Event`]s; [`EventReplay`]
//! replays events that were produced some other way. Both implement
//! [`EventStream`], the cursor consumed by schema-driven parsers.

mod error;
mod event;
mod lexer;
mod reader;
mod replay;
mod scalar;
mod span;
mod token;

pub use error::{ReadError, ReadErrorKind};
pub use event::{Event, EventStream};
pub use lexer::Lexer;
pub use reader::JsonReader;
pub use replay::EventReplay;
pub use scalar::unescape;
pub use span::Span;
pub use token::{Token, TokenKind};

/// Read every event of a JSON document.
pub fn read(source: &str) -> Result<Vec<Event<'_>>, ReadError> {
    JsonReader::new(source).collect_events()
}
