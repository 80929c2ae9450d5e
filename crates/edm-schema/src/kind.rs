//! Declared value kinds.

use std::fmt;
use std::str::FromStr;

/// Primitive type of a scalar property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `Edm.Boolean`
    Boolean,
    /// `Edm.Int32`
    Int32,
    /// `Edm.Single`
    Single,
    /// `Edm.Double`
    Double,
    /// `Edm.String`, bounded by a maximum length.
    String,
    /// `Edm.DateTime`
    DateTime,
    /// Any other primitive type name (`Edm.Guid`, `Edm.Binary`, ...).
    ///
    /// Values of these kinds never validate.
    Other(String),
}

impl ScalarKind {
    /// The type name as written in schema documents.
    pub fn type_name(&self) -> &str {
        match self {
            ScalarKind::Boolean => "Edm.Boolean",
            ScalarKind::Int32 => "Edm.Int32",
            ScalarKind::Single => "Edm.Single",
            ScalarKind::Double => "Edm.Double",
            ScalarKind::String => "Edm.String",
            ScalarKind::DateTime => "Edm.DateTime",
            ScalarKind::Other(name) => name,
        }
    }

    /// Resolve a primitive type name. Returns `None` for names outside the
    /// `Edm.` namespace, which refer to complex types.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Edm.Boolean" => ScalarKind::Boolean,
            "Edm.Int32" => ScalarKind::Int32,
            "Edm.Single" => ScalarKind::Single,
            "Edm.Double" => ScalarKind::Double,
            "Edm.String" => ScalarKind::String,
            "Edm.DateTime" => ScalarKind::DateTime,
            other if other.starts_with("Edm.") => ScalarKind::Other(other.to_string()),
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// What a property holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A primitive value.
    Scalar(ScalarKind),
    /// A nested object of the named complex type.
    Complex(String),
    /// An ordered sequence of elements of the inner kind.
    Collection(Box<ValueKind>),
}

impl ValueKind {
    /// Shorthand for `ValueKind::Complex`.
    pub fn complex(type_name: impl Into<String>) -> Self {
        ValueKind::Complex(type_name.into())
    }

    /// Shorthand for `ValueKind::Collection`.
    pub fn collection(element: ValueKind) -> Self {
        ValueKind::Collection(Box::new(element))
    }

    /// The complex type this kind refers to, looking through collections.
    pub fn complex_type_name(&self) -> Option<&str> {
        match self {
            ValueKind::Complex(name) => Some(name),
            ValueKind::Collection(element) => element.complex_type_name(),
            ValueKind::Scalar(_) => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar(kind) => write!(f, "{kind}"),
            ValueKind::Complex(name) => f.write_str(name),
            ValueKind::Collection(element) => write!(f, "Collection({element})"),
        }
    }
}

impl FromStr for ValueKind {
    type Err = String;

    /// Parse `Edm.String`, `Collection(Edm.Int32)`, `Address`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty type name".to_string());
        }
        if let Some(inner) = s
            .strip_prefix("Collection(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Ok(ValueKind::collection(inner.parse()?));
        }
        if s.contains(['(', ')']) {
            return Err(format!("malformed type name '{s}'"));
        }
        Ok(match ScalarKind::from_type_name(s) {
            Some(kind) => ValueKind::Scalar(kind),
            None => ValueKind::Complex(s.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(
            "Edm.Int32".parse::<ValueKind>(),
            Ok(ValueKind::Scalar(ScalarKind::Int32))
        );
        assert_eq!(
            "Edm.Guid".parse::<ValueKind>(),
            Ok(ValueKind::Scalar(ScalarKind::Other("Edm.Guid".into())))
        );
    }

    #[test]
    fn test_parse_complex_and_collections() {
        assert_eq!("Address".parse::<ValueKind>(), Ok(ValueKind::complex("Address")));
        assert_eq!(
            "Collection(Edm.String)".parse::<ValueKind>(),
            Ok(ValueKind::collection(ValueKind::Scalar(ScalarKind::String)))
        );
        assert_eq!(
            "Collection(Collection(Address))".parse::<ValueKind>(),
            Ok(ValueKind::collection(ValueKind::collection(
                ValueKind::complex("Address")
            )))
        );
        assert!("Collection(Address".parse::<ValueKind>().is_err());
        assert!("".parse::<ValueKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_names() {
        for name in ["Edm.DateTime", "Person", "Collection(Edm.Double)"] {
            assert_eq!(name.parse::<ValueKind>().unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_complex_type_name() {
        assert_eq!(ValueKind::complex("A").complex_type_name(), Some("A"));
        assert_eq!(
            ValueKind::collection(ValueKind::complex("B")).complex_type_name(),
            Some("B")
        );
        assert_eq!(ValueKind::Scalar(ScalarKind::Boolean).complex_type_name(), None);
        assert_eq!(
            ValueKind::collection(ValueKind::collection(ValueKind::complex("C"))).complex_type_name(),
            Some("C")
        );
    }
}
