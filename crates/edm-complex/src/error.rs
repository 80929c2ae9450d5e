//! Parse failures and their diagnostics.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use edm_events::{ReadError, ReadErrorKind, Span};
use edm_schema::ScalarKind;

/// Get ariadne config, respecting NO_COLOR env var.
fn ariadne_config() -> Config {
    let no_color = std::env::var("NO_COLOR").is_ok();
    if no_color {
        Config::default().with_color(false)
    } else {
        Config::default()
    }
}

/// Why a document was rejected. Every kind is fatal to the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleErrorKind {
    /// The input names a property the target type does not declare.
    UnknownProperty {
        /// The undeclared property.
        name: String,
    },
    /// A complex type name has no definition in the schema.
    UnresolvedType {
        /// The missing type.
        type_name: String,
        /// Property whose declaration refers to it, or `None` for the root.
        property: Option<String>,
    },
    /// The value's shape does not match the declared kind.
    TypeMismatch {
        /// The offending property.
        name: String,
        /// Declared kind, e.g. `Edm.Int32` or `Collection(Address)`.
        expected: String,
        /// What the input held: `literal`, `null`, `object` or `array`.
        found: String,
    },
    /// A scalar literal failed its kind's validation or format rule.
    FormatError {
        /// The offending property.
        name: String,
        /// Declared scalar kind.
        kind: ScalarKind,
    },
    /// An event that is not legal at this point of the document.
    UnexpectedEvent {
        /// Description of the event.
        found: String,
    },
    /// The schema declares a collection of collections.
    UnsupportedNesting {
        /// The property declaring it.
        name: String,
    },
    /// Objects and arrays are nested deeper than allowed.
    NestingTooDeep {
        /// The configured limit.
        max: usize,
    },
    /// The same property appears twice in one object.
    DuplicateProperty {
        /// The repeated property.
        name: String,
    },
    /// The event stream could not decode the document.
    Structural(ReadErrorKind),
}

/// A rejected document, with the location of the offending event when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleError {
    /// The kind of error.
    pub kind: AssembleErrorKind,
    /// Source location.
    pub span: Option<Span>,
}

impl AssembleError {
    /// Create a new error.
    pub fn new(kind: AssembleErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    /// The property this error is about, if any.
    pub fn property(&self) -> Option<&str> {
        match &self.kind {
            AssembleErrorKind::UnknownProperty { name }
            | AssembleErrorKind::TypeMismatch { name, .. }
            | AssembleErrorKind::FormatError { name, .. }
            | AssembleErrorKind::UnsupportedNesting { name }
            | AssembleErrorKind::DuplicateProperty { name } => Some(name),
            AssembleErrorKind::UnresolvedType { property, .. } => property.as_deref(),
            AssembleErrorKind::UnexpectedEvent { .. }
            | AssembleErrorKind::NestingTooDeep { .. }
            | AssembleErrorKind::Structural(_) => None,
        }
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .with_config(ariadne_config())
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.map(Into::into).unwrap_or(0..0);
        let label = |message: String| {
            Label::new((filename, range.clone()))
                .with_message(message)
                .with_color(Color::Red)
        };
        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(self.kind.to_string());

        match &self.kind {
            AssembleErrorKind::UnknownProperty { .. } => report
                .with_label(label("not declared on this type".into()))
                .with_help("remove the property or declare it in the schema"),
            AssembleErrorKind::UnresolvedType { type_name, .. } => report
                .with_label(label(format!("'{type_name}' is not defined")))
                .with_help("define the complex type in the schema"),
            AssembleErrorKind::TypeMismatch {
                expected, found, ..
            } => report.with_label(label(format!("expected {expected}, got {found}"))),
            AssembleErrorKind::FormatError { kind, .. } => {
                report.with_label(label(format!("not a valid {kind}")))
            }
            AssembleErrorKind::UnexpectedEvent { found } => {
                report.with_label(label(format!("unexpected {found}")))
            }
            AssembleErrorKind::UnsupportedNesting { .. } => report
                .with_label(label("collections cannot contain collections".into()))
                .with_help("wrap the inner collection in a complex type"),
            AssembleErrorKind::NestingTooDeep { max } => report
                .with_label(label("nested too deeply".into()))
                .with_note(format!("at most {max} levels of objects and arrays are allowed")),
            AssembleErrorKind::DuplicateProperty { .. } => report
                .with_label(label("duplicate property".into()))
                .with_help("each property must appear only once in an object"),
            AssembleErrorKind::Structural(kind) => report.with_label(label(kind.to_string())),
        }
    }
}

impl std::fmt::Display for AssembleErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssembleErrorKind::UnknownProperty { name } => write!(f, "unknown property '{name}'"),
            AssembleErrorKind::UnresolvedType {
                type_name,
                property: Some(property),
            } => write!(f, "unresolved complex type '{type_name}' for '{property}'"),
            AssembleErrorKind::UnresolvedType {
                type_name,
                property: None,
            } => write!(f, "unresolved complex type '{type_name}'"),
            AssembleErrorKind::TypeMismatch {
                name,
                expected,
                found,
            } => write!(f, "type mismatch for '{name}': expected {expected}, got {found}"),
            AssembleErrorKind::FormatError { name, kind } => {
                write!(f, "invalid {kind} value for '{name}'")
            }
            AssembleErrorKind::UnexpectedEvent { found } => write!(f, "unexpected {found}"),
            AssembleErrorKind::UnsupportedNesting { name } => {
                write!(f, "collection of collections declared for '{name}'")
            }
            AssembleErrorKind::NestingTooDeep { max } => {
                write!(f, "nesting deeper than {max} levels")
            }
            AssembleErrorKind::DuplicateProperty { name } => {
                write!(f, "duplicate property '{name}'")
            }
            AssembleErrorKind::Structural(kind) => write!(f, "{kind}"),
        }
    }
}

impl std::fmt::Display for AssembleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(span) = self.span {
            write!(f, " at offset {}", span.start)?;
        }
        Ok(())
    }
}

impl std::error::Error for AssembleError {}

impl From<ReadError> for AssembleError {
    fn from(error: ReadError) -> Self {
        AssembleError::new(AssembleErrorKind::Structural(error.kind), Some(error.span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn strip(rendered: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    #[test]
    fn test_display() {
        let error = AssembleError::new(
            AssembleErrorKind::FormatError {
                name: "age".into(),
                kind: ScalarKind::Int32,
            },
            Some(Span::new(20, 28)),
        );
        insta::assert_snapshot!(error, @"invalid Edm.Int32 value for 'age' at offset 20");

        let error = AssembleError::new(AssembleErrorKind::NestingTooDeep { max: 3 }, None);
        insta::assert_snapshot!(error, @"nesting deeper than 3 levels");
    }

    #[test]
    fn test_property_is_named() {
        let error = AssembleError::new(
            AssembleErrorKind::TypeMismatch {
                name: "tags".into(),
                expected: "Collection(Edm.String)".into(),
                found: "literal".into(),
            },
            None,
        );
        assert_eq!(error.property(), Some("tags"));
        let error = AssembleError::new(
            AssembleErrorKind::UnresolvedType {
                type_name: "Person".into(),
                property: None,
            },
            None,
        );
        assert_eq!(error.property(), None);
    }

    #[test]
    fn test_from_read_error() {
        let error: AssembleError =
            ReadError::new(ReadErrorKind::UnclosedObject, Span::new(0, 1)).into();
        assert_eq!(
            error.kind,
            AssembleErrorKind::Structural(ReadErrorKind::UnclosedObject)
        );
        assert_eq!(error.span, Some(Span::new(0, 1)));
    }

    #[test]
    fn test_render_headline() {
        let source = r#"{"nickname": "A"}"#;
        let error = AssembleError::new(
            AssembleErrorKind::UnknownProperty {
                name: "nickname".into(),
            },
            Some(Span::new(1, 11)),
        );
        let stripped = strip(&error.render("person.json", source));
        assert!(stripped.contains("unknown property 'nickname'"));
        assert!(stripped.contains("not declared on this type"));
        assert!(stripped.contains("person.json"));
    }
}
