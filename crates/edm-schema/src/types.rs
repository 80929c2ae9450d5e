//! Property declarations and complex type definitions.

use crate::{FormatRule, ScalarKind, ValueKind};

/// One declared property of a complex type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    /// Property name, unique within its type.
    pub name: String,
    /// What the property holds.
    pub kind: ValueKind,
    /// Whether an explicit `null` is accepted (default: true).
    pub nullable: bool,
    /// Maximum length in characters for `Edm.String` values. `None` falls
    /// back to the parser's default.
    pub max_length: Option<usize>,
    /// Extra constraint checked after the kind's own validation.
    pub format: Option<FormatRule>,
}

impl PropertyDeclaration {
    /// Declare a nullable property with no length bound or format rule.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: true,
            max_length: None,
            format: None,
        }
    }

    /// Declare a scalar property.
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, ValueKind::Scalar(kind))
    }

    /// Declare a property holding a nested complex object.
    pub fn complex(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::complex(type_name))
    }

    /// Declare a collection property.
    pub fn collection(name: impl Into<String>, element: ValueKind) -> Self {
        Self::new(name, ValueKind::collection(element))
    }

    /// Set whether `null` is accepted.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Bound the length of string values.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Attach a format rule.
    pub fn format(mut self, rule: FormatRule) -> Self {
        self.format = Some(rule);
        self
    }
}

/// A named complex type and its property declarations, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexTypeDefinition {
    /// Type name.
    pub name: String,
    /// Declared properties.
    pub properties: Vec<PropertyDeclaration>,
}

impl ComplexTypeDefinition {
    /// Create a type with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Add a property declaration.
    pub fn property(mut self, declaration: PropertyDeclaration) -> Self {
        self.properties.push(declaration);
        self
    }

    /// Look up a declared property by name.
    pub fn find_property(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Names of all declared properties, in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }
}
