//! Schema-driven assembly of complex objects from parse events.

use std::borrow::Cow;

use edm_events::{Event, EventStream, Span};
use edm_schema::{ComplexTypeDefinition, PropertyDeclaration, ScalarKind, SchemaLookup, ValueKind};
use edm_tree::{Collection, Complex, Property, Value};
use tracing::{debug, trace};

use crate::sentinel::{expand, is_sentinel};
use crate::validate::{to_scalar, validate};
use crate::{
    AssembleError, AssembleErrorKind, Clock, FormatCheck, ParseOptions, StandardFormats,
    SystemClock,
};

/// Parses complex objects against a schema.
///
/// A parser holds no per-document state: one instance can parse any number
/// of streams, including concurrently when the schema is shareable.
pub struct ComplexParser<S> {
    schema: S,
    options: ParseOptions,
    clock: Box<dyn Clock>,
    formats: Box<dyn FormatCheck>,
}

impl<S: SchemaLookup> ComplexParser<S> {
    /// Create a parser with default options, the system clock, and
    /// [`StandardFormats`].
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            options: ParseOptions::default(),
            clock: Box::new(SystemClock),
            formats: Box::new(StandardFormats::new()),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the clock used to expand the current-instant sentinel.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the format rule checker.
    pub fn with_formats(mut self, formats: impl FormatCheck + 'static) -> Self {
        self.formats = Box::new(formats);
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// The schema types are resolved against.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Parse one object of type `target` from the start of `stream`.
    ///
    /// The stream must hold exactly one object. With no target, only an
    /// empty object is accepted. The stream is closed afterwards, whether or
    /// not parsing succeeded.
    pub fn parse<'src, E: EventStream<'src>>(
        &self,
        mut stream: E,
        target: Option<&str>,
    ) -> Result<Complex, AssembleError> {
        let result = self.parse_root(&mut stream, target);
        stream.close();
        result
    }

    /// Continue an object whose `StartObject` and first `StartProperty`
    /// were already consumed by the caller; `first` is that property event.
    ///
    /// The stream is left open for the caller.
    pub fn parse_resumed<'src, E: EventStream<'src>>(
        &self,
        mut stream: E,
        target: Option<&str>,
        first: Event<'src>,
    ) -> Result<Complex, AssembleError> {
        let definition = self.resolve_root(target)?;
        match first {
            Event::StartProperty { span, name } => {
                self.object(&mut stream, definition, 1, span, Some((name, span)))
            }
            other => Err(unexpected(&other)),
        }
    }

    /// Parse an array of `element` values from the start of `stream`, as
    /// the value of a collection property called `name`.
    ///
    /// The stream is left open for the caller.
    pub fn parse_collection<'src, E: EventStream<'src>>(
        &self,
        mut stream: E,
        name: &str,
        element: &ValueKind,
    ) -> Result<Collection, AssembleError> {
        let declaration = PropertyDeclaration::collection(name, element.clone());
        match next(&mut stream)? {
            Event::StartArray { span } => {
                self.collection(&mut stream, &declaration, element, 1, span)
            }
            other => Err(unexpected(&other)),
        }
    }

    fn parse_root<'src, E: EventStream<'src>>(
        &self,
        stream: &mut E,
        target: Option<&str>,
    ) -> Result<Complex, AssembleError> {
        let definition = self.resolve_root(target)?;
        let complex = match next(stream)? {
            Event::StartObject { span } => self.object(stream, definition, 1, span, None)?,
            other => return Err(unexpected(&other)),
        };
        if stream.has_next() {
            return Err(unexpected(&next(stream)?));
        }
        Ok(complex)
    }

    fn resolve_root(
        &self,
        target: Option<&str>,
    ) -> Result<Option<&ComplexTypeDefinition>, AssembleError> {
        target
            .map(|type_name| self.resolve(type_name, None, None))
            .transpose()
    }

    fn resolve(
        &self,
        type_name: &str,
        property: Option<&str>,
        span: Option<Span>,
    ) -> Result<&ComplexTypeDefinition, AssembleError> {
        self.schema.find_complex_type(type_name).ok_or_else(|| {
            reject(
                AssembleErrorKind::UnresolvedType {
                    type_name: type_name.to_string(),
                    property: property.map(str::to_string),
                },
                span,
            )
        })
    }

    fn check_depth(&self, depth: usize, span: Span) -> Result<(), AssembleError> {
        if depth > self.options.max_depth {
            return Err(reject(
                AssembleErrorKind::NestingTooDeep {
                    max: self.options.max_depth,
                },
                Some(span),
            ));
        }
        Ok(())
    }

    /// Properties of an object whose `StartObject` (at `open`) is consumed,
    /// up to and including its `EndObject`.
    fn object<'src, E: EventStream<'src>>(
        &self,
        stream: &mut E,
        definition: Option<&ComplexTypeDefinition>,
        depth: usize,
        open: Span,
        mut resumed: Option<(Cow<'src, str>, Span)>,
    ) -> Result<Complex, AssembleError> {
        self.check_depth(depth, open)?;
        let type_name = definition.map_or("", |d| d.name.as_str());
        debug!(type_name, depth, "enter object");

        let mut properties: Vec<Property> = Vec::new();
        loop {
            let (name, span) = match resumed.take() {
                Some(start) => start,
                None => match next(stream)? {
                    Event::StartProperty { span, name } => (name, span),
                    Event::EndObject { .. } => break,
                    other => return Err(unexpected(&other)),
                },
            };

            let declaration = definition
                .and_then(|d| d.find_property(&name))
                .ok_or_else(|| {
                    reject(
                        AssembleErrorKind::UnknownProperty {
                            name: name.to_string(),
                        },
                        Some(span),
                    )
                })?;
            if self.options.reject_duplicate_properties
                && properties.iter().any(|p| p.name() == name)
            {
                return Err(reject(
                    AssembleErrorKind::DuplicateProperty {
                        name: name.into_owned(),
                    },
                    Some(span),
                ));
            }

            let value = self.property_value(stream, declaration, depth)?;
            properties.push(Property::new(name.into_owned(), value));
        }

        debug!(type_name, depth, properties = properties.len(), "exit object");
        Ok(Complex::new(type_name, properties))
    }

    /// The value following a matched `StartProperty`, including the
    /// terminating `EndProperty` of a compound value.
    fn property_value<'src, E: EventStream<'src>>(
        &self,
        stream: &mut E,
        declaration: &PropertyDeclaration,
        depth: usize,
    ) -> Result<Value, AssembleError> {
        let event = next(stream)?;
        match (&declaration.kind, &event) {
            (
                ValueKind::Scalar(kind),
                Event::EndProperty {
                    span,
                    value: Some(literal),
                },
            ) => self.scalar(declaration, kind, literal, *span),

            (_, Event::EndProperty { value: None, .. }) => self.null(declaration, &event),

            (ValueKind::Complex(type_name), Event::StartObject { span }) => {
                let definition = self.resolve(type_name, Some(&declaration.name), Some(*span))?;
                let complex = self.object(stream, Some(definition), depth + 1, *span, None)?;
                expect_terminator(stream)?;
                Ok(Value::Complex(complex))
            }

            (ValueKind::Collection(element), Event::StartArray { span }) => {
                let collection = self.collection(stream, declaration, element, depth + 1, *span)?;
                expect_terminator(stream)?;
                Ok(Value::Collection(collection))
            }

            (
                _,
                Event::EndProperty { .. } | Event::StartObject { .. } | Event::StartArray { .. },
            ) => Err(mismatch(&declaration.name, &declaration.kind, &event)),

            _ => Err(unexpected(&event)),
        }
    }

    /// Explicit `null`. Complex kinds always accept it, but the type must
    /// resolve so the null keeps its type.
    fn null(
        &self,
        declaration: &PropertyDeclaration,
        event: &Event<'_>,
    ) -> Result<Value, AssembleError> {
        match &declaration.kind {
            ValueKind::Complex(type_name) => {
                self.resolve(type_name, Some(&declaration.name), Some(event.span()))?;
                Ok(Value::Null(declaration.kind.clone()))
            }
            kind if declaration.nullable => Ok(Value::Null(kind.clone())),
            kind => Err(mismatch(&declaration.name, kind, event)),
        }
    }

    /// Validate, expand the sentinel, check the format rule, convert.
    fn scalar(
        &self,
        declaration: &PropertyDeclaration,
        kind: &ScalarKind,
        literal: &str,
        span: Span,
    ) -> Result<Value, AssembleError> {
        let invalid = || {
            reject(
                AssembleErrorKind::FormatError {
                    name: declaration.name.clone(),
                    kind: kind.clone(),
                },
                Some(span),
            )
        };

        let max_length = declaration
            .max_length
            .unwrap_or(self.options.default_string_max_length);
        if !validate(kind, literal, max_length) {
            return Err(invalid());
        }

        let literal = if *kind == ScalarKind::DateTime && is_sentinel(literal) {
            expand(literal, &*self.clock)
        } else {
            if let Some(rule) = &declaration.format
                && !self.formats.check(rule, kind, literal)
            {
                return Err(invalid());
            }
            Cow::Borrowed(literal)
        };

        let scalar = to_scalar(kind, &literal).ok_or_else(invalid)?;
        Ok(Value::Scalar(scalar))
    }

    /// Elements of an array whose `StartArray` (at `open`) is consumed, up
    /// to and including its `EndArray`.
    fn collection<'src, E: EventStream<'src>>(
        &self,
        stream: &mut E,
        declaration: &PropertyDeclaration,
        element: &ValueKind,
        depth: usize,
        open: Span,
    ) -> Result<Collection, AssembleError> {
        self.check_depth(depth, open)?;
        let name = declaration.name.as_str();
        let definition = match element {
            ValueKind::Collection(_) => {
                return Err(reject(
                    AssembleErrorKind::UnsupportedNesting {
                        name: name.to_string(),
                    },
                    Some(open),
                ));
            }
            ValueKind::Complex(type_name) => Some(self.resolve(type_name, Some(name), Some(open))?),
            ValueKind::Scalar(_) => None,
        };
        debug!(property = name, %element, depth, "enter collection");

        let mut items = Vec::new();
        loop {
            let event = next(stream)?;
            let item = match (element, &event) {
                (_, Event::EndArray { .. }) => break,
                (
                    ValueKind::Scalar(kind),
                    Event::EndProperty {
                        span,
                        value: Some(literal),
                    },
                ) => self.scalar(declaration, kind, literal, *span)?,
                (ValueKind::Complex(_), Event::StartObject { span }) => {
                    Value::Complex(self.object(stream, definition, depth + 1, *span, None)?)
                }
                (_, Event::StartProperty { .. } | Event::EndObject { .. }) => {
                    return Err(unexpected(&event));
                }
                _ => return Err(mismatch(name, element, &event)),
            };
            items.push(item);
        }

        debug!(property = name, items = items.len(), "exit collection");
        Ok(Collection::new(element.clone(), items))
    }
}

fn next<'src, E: EventStream<'src>>(stream: &mut E) -> Result<Event<'src>, AssembleError> {
    let event = stream.next_event().map_err(|error| {
        debug!(%error, "stream error");
        AssembleError::from(error)
    })?;
    trace!(%event, span = %event.span(), "assemble");
    Ok(event)
}

/// The `EndProperty` closing a compound property value.
fn expect_terminator<'src, E: EventStream<'src>>(stream: &mut E) -> Result<(), AssembleError> {
    match next(stream)? {
        Event::EndProperty { value: None, .. } => Ok(()),
        other => Err(unexpected(&other)),
    }
}

fn reject(kind: AssembleErrorKind, span: Option<Span>) -> AssembleError {
    debug!(error = %kind, "rejected");
    AssembleError::new(kind, span)
}

fn unexpected(event: &Event<'_>) -> AssembleError {
    reject(
        AssembleErrorKind::UnexpectedEvent {
            found: event.describe().to_string(),
        },
        Some(event.span()),
    )
}

fn mismatch(name: &str, expected: &ValueKind, event: &Event<'_>) -> AssembleError {
    let found = match event {
        Event::EndProperty { value: Some(_), .. } => "literal",
        Event::EndProperty { value: None, .. } => "null",
        Event::StartObject { .. } => "object",
        Event::StartArray { .. } => "array",
        other => other.describe(),
    };
    reject(
        AssembleErrorKind::TypeMismatch {
            name: name.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        },
        Some(event.span()),
    )
}
