//! Errors raised while building or loading a schema.

/// A problem with schema definitions themselves.
#[derive(Debug)]
pub enum SchemaError {
    /// Two complex types share a name.
    DuplicateType {
        /// The repeated type name.
        name: String,
    },
    /// A complex type declares the same property twice.
    DuplicateProperty {
        /// Type declaring the property.
        type_name: String,
        /// The repeated property name.
        property: String,
    },
    /// A property's type could not be parsed.
    InvalidType {
        /// Type declaring the property.
        type_name: String,
        /// The property.
        property: String,
        /// Why the type is invalid.
        reason: String,
    },
    /// A property's format rule could not be parsed.
    InvalidFormat {
        /// Type declaring the property.
        type_name: String,
        /// The property.
        property: String,
        /// Why the rule is invalid.
        reason: String,
    },
    /// A property refers to a complex type that is not defined.
    UnresolvedReference {
        /// Type declaring the property.
        type_name: String,
        /// The property.
        property: String,
        /// The missing complex type.
        target: String,
    },
    /// The schema document is not valid JSON or has the wrong shape.
    Json(serde_json::Error),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::DuplicateType { name } => {
                write!(f, "complex type '{name}' is defined more than once")
            }
            SchemaError::DuplicateProperty {
                type_name,
                property,
            } => write!(f, "property '{property}' is declared twice on '{type_name}'"),
            SchemaError::InvalidType {
                type_name,
                property,
                reason,
            } => write!(f, "invalid type for '{type_name}.{property}': {reason}"),
            SchemaError::InvalidFormat {
                type_name,
                property,
                reason,
            } => write!(f, "invalid format for '{type_name}.{property}': {reason}"),
            SchemaError::UnresolvedReference {
                type_name,
                property,
                target,
            } => write!(
                f,
                "'{type_name}.{property}' refers to undefined complex type '{target}'"
            ),
            SchemaError::Json(error) => write!(f, "invalid schema document: {error}"),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(error: serde_json::Error) -> Self {
        SchemaError::Json(error)
    }
}
