//! Parse events and the stream that yields them.

use std::borrow::Cow;

use crate::{ReadError, Span};

/// One structural step through a JSON document.
///
/// A property surfaces as `StartProperty` followed by either a single
/// `EndProperty` carrying the literal (or `None` for `null`), or by a
/// compound value (`StartObject .. EndObject`, `StartArray .. EndArray`)
/// and then an `EndProperty` with no literal. Scalar array elements are
/// bare `EndProperty` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'src> {
    /// Start of an object `{`.
    StartObject {
        /// Span of the opening brace.
        span: Span,
    },
    /// End of an object `}`.
    EndObject {
        /// Span of the closing brace.
        span: Span,
    },
    /// A property name inside an object.
    StartProperty {
        /// Span of the name, including its quotes.
        span: Span,
        /// Property name after escape processing.
        name: Cow<'src, str>,
    },
    /// End of a property, or a bare scalar element of an array.
    EndProperty {
        /// Span of the literal, or of the token closing the compound value.
        span: Span,
        /// Literal text after escape processing. `None` is `null`, or the
        /// terminator of a compound value.
        value: Option<Cow<'src, str>>,
    },
    /// Start of an array `[`.
    StartArray {
        /// Span of the opening bracket.
        span: Span,
    },
    /// End of an array `]`.
    EndArray {
        /// Span of the closing bracket.
        span: Span,
    },
}

impl<'src> Event<'src> {
    /// Source location of this event.
    pub fn span(&self) -> Span {
        match self {
            Event::StartObject { span }
            | Event::EndObject { span }
            | Event::StartProperty { span, .. }
            | Event::EndProperty { span, .. }
            | Event::StartArray { span }
            | Event::EndArray { span } => *span,
        }
    }

    /// Short name of the event kind, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Event::StartObject { .. } => "start of object",
            Event::EndObject { .. } => "end of object",
            Event::StartProperty { .. } => "property name",
            Event::EndProperty { value: Some(_), .. } => "literal value",
            Event::EndProperty { value: None, .. } => "null or end of property",
            Event::StartArray { .. } => "start of array",
            Event::EndArray { .. } => "end of array",
        }
    }

    /// Detach this event from the source text.
    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::StartObject { span } => Event::StartObject { span },
            Event::EndObject { span } => Event::EndObject { span },
            Event::StartProperty { span, name } => Event::StartProperty {
                span,
                name: Cow::Owned(name.into_owned()),
            },
            Event::EndProperty { span, value } => Event::EndProperty {
                span,
                value: value.map(|v| Cow::Owned(v.into_owned())),
            },
            Event::StartArray { span } => Event::StartArray { span },
            Event::EndArray { span } => Event::EndArray { span },
        }
    }
}

impl std::fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::StartProperty { name, .. } => write!(f, "StartProperty({name})"),
            Event::EndProperty {
                value: Some(value), ..
            } => write!(f, "EndProperty({value:?})"),
            Event::EndProperty { value: None, .. } => write!(f, "EndProperty(null)"),
            Event::StartObject { .. } => write!(f, "StartObject"),
            Event::EndObject { .. } => write!(f, "EndObject"),
            Event::StartArray { .. } => write!(f, "StartArray"),
            Event::EndArray { .. } => write!(f, "EndArray"),
        }
    }
}

/// A forward-only cursor over [`Event`]s.
///
/// A stream is consumed by exactly one parse and cannot be rewound.
pub trait EventStream<'src> {
    /// Whether another event (or a pending error) is available.
    fn has_next(&mut self) -> bool;

    /// Advance and return the next event.
    ///
    /// Returns an error when the underlying document is malformed, or when
    /// called after the stream is exhausted.
    fn next_event(&mut self) -> Result<Event<'src>, ReadError>;

    /// Release the stream. Further calls to `has_next` return `false`.
    fn close(&mut self) {}
}

impl<'src, S: EventStream<'src> + ?Sized> EventStream<'src> for &mut S {
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next_event(&mut self) -> Result<Event<'src>, ReadError> {
        (**self).next_event()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
