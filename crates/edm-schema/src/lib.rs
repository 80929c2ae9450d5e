#![doc = include_str!("../README.md")]
//! Schema model for complex-typed JSON documents.
//!
//! A schema is a registry of named complex types. Each type declares
//! properties that hold a scalar, a nested complex object, or an ordered
//! collection of either. Parsers only need [`SchemaLookup`]; [`Metadata`] is
//! an in-memory implementation that can be built in code or loaded from a
//! JSON schema document.

mod error;
mod format;
mod kind;
mod metadata;
mod types;

pub use error::SchemaError;
pub use format::FormatRule;
pub use kind::{ScalarKind, ValueKind};
pub use metadata::{Metadata, SchemaLookup};
pub use types::{ComplexTypeDefinition, PropertyDeclaration};
