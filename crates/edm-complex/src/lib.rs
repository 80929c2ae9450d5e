#![doc = include_str!("../README.md")]
//! Schema-driven parsing of complex-typed JSON objects.
//!
//! [`ComplexParser`] walks an [`EventStream`] once, front to back, and
//! builds a [`Complex`] value whose shape is dictated by a schema: every
//! property must be declared, every scalar literal must validate for its
//! declared kind, and nested objects and collections are assembled
//! recursively. The first problem aborts the parse with an
//! [`AssembleError`]; no partial tree is returned.

mod assembler;
mod clock;
mod error;
mod format;
mod options;
pub mod sentinel;
pub mod validate;

pub use assembler::ComplexParser;
pub use clock::{Clock, FixedClock, SystemClock};
pub use edm_events::{Event, EventStream, JsonReader, Span};
pub use edm_tree::{Collection, Complex, Property, Scalar, Value};
pub use error::{AssembleError, AssembleErrorKind};
pub use format::{FormatCheck, StandardFormats};
pub use options::{DEFAULT_MAX_DEPTH, DEFAULT_STRING_MAX_LENGTH, ParseOptions};

use edm_schema::SchemaLookup;

/// Parse JSON text as one object of type `target`, with default options.
pub fn parse_json<S: SchemaLookup>(
    source: &str,
    schema: S,
    target: &str,
) -> Result<Complex, AssembleError> {
    ComplexParser::new(schema).parse(JsonReader::new(source), Some(target))
}
