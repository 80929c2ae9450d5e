//! Complex type lookup and the in-memory registry.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use crate::{ComplexTypeDefinition, FormatRule, PropertyDeclaration, SchemaError, ValueKind};

/// Resolves complex type names to their definitions.
///
/// Lookups are read-only, so one schema can serve any number of parses at
/// once.
pub trait SchemaLookup {
    /// Find the definition of a complex type.
    fn find_complex_type(&self, name: &str) -> Option<&ComplexTypeDefinition>;
}

impl<T: SchemaLookup + ?Sized> SchemaLookup for &T {
    fn find_complex_type(&self, name: &str) -> Option<&ComplexTypeDefinition> {
        (**self).find_complex_type(name)
    }
}

impl<T: SchemaLookup + ?Sized> SchemaLookup for std::sync::Arc<T> {
    fn find_complex_type(&self, name: &str) -> Option<&ComplexTypeDefinition> {
        (**self).find_complex_type(name)
    }
}

/// A set of complex type definitions held in memory.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    types: BTreeMap<String, ComplexTypeDefinition>,
}

impl Metadata {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions.
    pub fn from_types(
        types: impl IntoIterator<Item = ComplexTypeDefinition>,
    ) -> Result<Self, SchemaError> {
        let mut metadata = Self::new();
        for definition in types {
            metadata.insert(definition)?;
        }
        Ok(metadata)
    }

    /// Load a registry from a JSON schema document:
    ///
    /// ```json
    /// {"complexTypes": [
    ///   {"name": "Person", "properties": [
    ///     {"name": "name", "type": "Edm.String", "nullable": false, "maxLength": 128},
    ///     {"name": "tags", "type": "Collection(Edm.String)"},
    ///     {"name": "address", "type": "Address"}
    ///   ]}
    /// ]}
    /// ```
    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(source)?;
        let mut metadata = Self::new();
        for complex_type in document.complex_types {
            metadata.insert(complex_type.into_definition()?)?;
        }
        debug!(types = metadata.len(), "loaded schema document");
        Ok(metadata)
    }

    /// Register a definition. Type names and property names within a type
    /// must be unique.
    pub fn insert(&mut self, definition: ComplexTypeDefinition) -> Result<(), SchemaError> {
        if self.types.contains_key(&definition.name) {
            return Err(SchemaError::DuplicateType {
                name: definition.name,
            });
        }
        let mut seen = HashSet::new();
        for property in &definition.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    type_name: definition.name.clone(),
                    property: property.name.clone(),
                });
            }
        }
        self.types.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered definitions, ordered by name.
    pub fn types(&self) -> impl Iterator<Item = &ComplexTypeDefinition> {
        self.types.values()
    }

    /// Report every property whose complex type (directly or as a collection
    /// element) is not registered. Parsing reports these lazily; this check
    /// finds them up front.
    pub fn check_references(&self) -> Vec<SchemaError> {
        let mut problems = Vec::new();
        for definition in self.types.values() {
            for property in &definition.properties {
                let Some(target) = property.kind.complex_type_name() else {
                    continue;
                };
                if !self.types.contains_key(target) {
                    problems.push(SchemaError::UnresolvedReference {
                        type_name: definition.name.clone(),
                        property: property.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        problems
    }
}

impl SchemaLookup for Metadata {
    fn find_complex_type(&self, name: &str) -> Option<&ComplexTypeDefinition> {
        self.types.get(name)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaDocument {
    #[serde(default)]
    complex_types: Vec<ComplexTypeDocument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComplexTypeDocument {
    name: String,
    #[serde(default)]
    properties: Vec<PropertyDocument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDocument {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default = "nullable_default")]
    nullable: bool,
    max_length: Option<usize>,
    format: Option<String>,
}

fn nullable_default() -> bool {
    true
}

impl ComplexTypeDocument {
    fn into_definition(self) -> Result<ComplexTypeDefinition, SchemaError> {
        let mut definition = ComplexTypeDefinition::new(self.name);
        for property in self.properties {
            let kind: ValueKind =
                property
                    .type_name
                    .parse()
                    .map_err(|reason| SchemaError::InvalidType {
                        type_name: definition.name.clone(),
                        property: property.name.clone(),
                        reason,
                    })?;
            let format = property
                .format
                .map(|rule| rule.parse::<FormatRule>())
                .transpose()
                .map_err(|reason| SchemaError::InvalidFormat {
                    type_name: definition.name.clone(),
                    property: property.name.clone(),
                    reason,
                })?;
            definition.properties.push(PropertyDeclaration {
                name: property.name,
                kind,
                nullable: property.nullable,
                max_length: property.max_length,
                format,
            });
        }
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScalarKind;
    use facet_testhelpers::test;

    #[test]
    fn test_duplicate_type_rejected() {
        let result = Metadata::from_types([
            ComplexTypeDefinition::new("A"),
            ComplexTypeDefinition::new("A"),
        ]);
        assert!(matches!(result, Err(SchemaError::DuplicateType { name }) if name == "A"));
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let result = Metadata::from_types([ComplexTypeDefinition::new("A")
            .property(PropertyDeclaration::scalar("x", ScalarKind::Int32))
            .property(PropertyDeclaration::scalar("x", ScalarKind::String))]);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateProperty { property, .. }) if property == "x"
        ));
    }

    #[test]
    fn test_check_references() {
        let metadata = Metadata::from_types([ComplexTypeDefinition::new("Person")
            .property(PropertyDeclaration::complex("address", "Address"))
            .property(PropertyDeclaration::collection(
                "friends",
                ValueKind::complex("Person"),
            ))])
        .unwrap();
        let problems = metadata.check_references();
        assert_eq!(problems.len(), 1);
        assert!(matches!(
            &problems[0],
            SchemaError::UnresolvedReference { target, .. } if target == "Address"
        ));
    }

    #[test]
    fn test_lookup_through_reference() {
        let metadata = Metadata::from_types([ComplexTypeDefinition::new("A")]).unwrap();
        let by_ref: &dyn SchemaLookup = &metadata;
        assert!(by_ref.find_complex_type("A").is_some());
        assert!(metadata.find_complex_type("B").is_none());
    }
}
