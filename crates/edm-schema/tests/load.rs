//! Loading schema documents.

use edm_schema::{FormatRule, Metadata, ScalarKind, SchemaError, SchemaLookup, ValueKind};
use facet_testhelpers::test;

const PERSON_SCHEMA: &str = r#"{
  "complexTypes": [
    {
      "name": "Person",
      "properties": [
        {"name": "name", "type": "Edm.String", "nullable": false, "maxLength": 128},
        {"name": "age", "type": "Edm.Int32"},
        {"name": "address", "type": "Address"},
        {"name": "tags", "type": "Collection(Edm.String)",
         "format": "regEx('^[a-z]+$')"}
      ]
    },
    {
      "name": "Address",
      "properties": [
        {"name": "city", "type": "Edm.String"},
        {"name": "updated", "type": "Edm.DateTime"}
      ]
    }
  ]
}"#;

#[test]
fn test_load_person_schema() {
    let metadata = Metadata::from_json(PERSON_SCHEMA).unwrap();
    assert_eq!(metadata.len(), 2);
    assert!(metadata.check_references().is_empty());

    let person = metadata.find_complex_type("Person").unwrap();
    assert_eq!(
        person.property_names().collect::<Vec<_>>(),
        ["name", "age", "address", "tags"]
    );

    let name = person.find_property("name").unwrap();
    assert_eq!(name.kind, ValueKind::Scalar(ScalarKind::String));
    assert!(!name.nullable);
    assert_eq!(name.max_length, Some(128));

    let age = person.find_property("age").unwrap();
    assert!(age.nullable);
    assert_eq!(age.max_length, None);

    let tags = person.find_property("tags").unwrap();
    assert_eq!(
        tags.kind,
        ValueKind::collection(ValueKind::Scalar(ScalarKind::String))
    );
    assert_eq!(tags.format, Some(FormatRule::regex("^[a-z]+$")));

    assert!(person.find_property("nickname").is_none());
}

#[test]
fn test_empty_document() {
    let metadata = Metadata::from_json("{}").unwrap();
    assert!(metadata.is_empty());
}

#[test]
fn test_invalid_type_names_the_property() {
    let error = Metadata::from_json(
        r#"{"complexTypes": [{"name": "T", "properties": [
            {"name": "bad", "type": "Collection(Edm.String"}
        ]}]}"#,
    )
    .unwrap_err();
    assert!(matches!(
        &error,
        SchemaError::InvalidType { type_name, property, .. } if type_name == "T" && property == "bad"
    ));
}

#[test]
fn test_invalid_format_rule() {
    let error = Metadata::from_json(
        r#"{"complexTypes": [{"name": "T", "properties": [
            {"name": "p", "type": "Edm.String", "format": "regEx(unquoted)"}
        ]}]}"#,
    )
    .unwrap_err();
    assert!(matches!(error, SchemaError::InvalidFormat { .. }));
}

#[test]
fn test_malformed_json() {
    let error = Metadata::from_json("{\"complexTypes\": [").unwrap_err();
    assert!(matches!(error, SchemaError::Json(_)));
    assert!(error.to_string().starts_with("invalid schema document: "));
}
