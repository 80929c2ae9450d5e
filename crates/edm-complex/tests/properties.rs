use edm_complex::{AssembleErrorKind, Value, parse_json};
use edm_schema::{ComplexTypeDefinition, Metadata, PropertyDeclaration, ScalarKind, ValueKind};
use proptest::prelude::*;

const DECLARED: [&str; 6] = ["name", "age", "score", "active", "tags", "friends"];

fn schema() -> Metadata {
    Metadata::from_types([ComplexTypeDefinition::new("Person")
        .property(PropertyDeclaration::scalar("name", ScalarKind::String).max_length(128))
        .property(PropertyDeclaration::scalar("age", ScalarKind::Int32))
        .property(PropertyDeclaration::scalar("score", ScalarKind::Double))
        .property(PropertyDeclaration::scalar("active", ScalarKind::Boolean))
        .property(PropertyDeclaration::collection(
            "tags",
            ValueKind::Scalar(ScalarKind::String),
        ))
        .property(PropertyDeclaration::collection(
            "friends",
            ValueKind::complex("Person"),
        ))])
    .unwrap()
}

fn quoted(s: &str) -> String {
    format!("\"{s}\"")
}

/// A declared property with a valid JSON value.
fn field() -> impl Strategy<Value = (&'static str, String)> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}".prop_map(|s| ("name", quoted(&s))),
        any::<i32>().prop_map(|n| ("age", n.to_string())),
        (-1.0e6f64..1.0e6).prop_map(|x| ("score", format!("{x}"))),
        any::<bool>().prop_map(|b| ("active", b.to_string())),
        prop::collection::vec("[a-z]{0,5}", 0..5).prop_map(|tags| {
            let items: Vec<_> = tags.iter().map(|t| quoted(t)).collect();
            ("tags", format!("[{}]", items.join(",")))
        }),
        prop::collection::vec("[a-z]{1,5}", 0..4).prop_map(|names| {
            let items: Vec<_> = names
                .iter()
                .map(|n| format!("{{\"name\":{}}}", quoted(n)))
                .collect();
            ("friends", format!("[{}]", items.join(",")))
        }),
    ]
}

/// Declared properties, each at most once, in random order.
fn fields() -> impl Strategy<Value = Vec<(&'static str, String)>> {
    prop::collection::vec(field(), 0..8).prop_map(|fields| {
        let mut seen = Vec::new();
        fields
            .into_iter()
            .filter(|(name, _)| {
                let fresh = !seen.contains(name);
                seen.push(*name);
                fresh
            })
            .collect()
    })
}

fn document(fields: &[(&str, String)]) -> String {
    let members: Vec<_> = fields
        .iter()
        .map(|(name, value)| format!("{}:{value}", quoted(name)))
        .collect();
    format!("{{{}}}", members.join(","))
}

fn undeclared_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("must be undeclared", |s| !DECLARED.contains(&s.as_str()))
}

proptest! {
    /// Exactly the input's properties come back, in input order.
    #[test]
    fn valid_documents_keep_their_properties(fields in fields()) {
        let source = document(&fields);
        let person = parse_json(&source, schema(), "Person");
        prop_assert!(person.is_ok(), "{source}: {person:?}");
        let person = person.unwrap();
        let names: Vec<_> = person.names().collect();
        let expected: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        prop_assert_eq!(names, expected);
    }

    /// Any undeclared property is rejected by name.
    #[test]
    fn undeclared_properties_rejected(
        fields in fields(),
        extra in undeclared_name(),
        position in any::<prop::sample::Index>(),
    ) {
        let mut fields: Vec<(&str, String)> = fields;
        let at = position.index(fields.len() + 1);
        fields.insert(at, (extra.as_str(), "1".to_string()));
        let error = parse_json(&document(&fields), schema(), "Person").unwrap_err();
        prop_assert_eq!(error.kind, AssembleErrorKind::UnknownProperty { name: extra.clone() });
    }

    /// A literal that is not an integer fails on that property.
    #[test]
    fn invalid_int_literal_is_format_error(
        fields in fields(),
        literal in "[a-z]{1,6}|[1-9][0-9]{10,13}|[0-9]+\\.[0-9]+",
    ) {
        let mut fields: Vec<_> = fields.into_iter().filter(|(name, _)| *name != "age").collect();
        fields.push(("age", quoted(&literal)));
        let error = parse_json(&document(&fields), schema(), "Person").unwrap_err();
        prop_assert_eq!(
            error.kind,
            AssembleErrorKind::FormatError { name: "age".into(), kind: ScalarKind::Int32 }
        );
    }

    /// Collection items come back in array order.
    #[test]
    fn collection_order_preserved(tags in prop::collection::vec("[a-z]{0,5}", 0..10)) {
        let items: Vec<_> = tags.iter().map(|t| quoted(t)).collect();
        let source = format!("{{\"tags\":[{}]}}", items.join(","));
        let person = parse_json(&source, schema(), "Person").unwrap();
        let parsed: Vec<_> = person
            .get("tags")
            .and_then(Value::as_collection)
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        prop_assert_eq!(parsed, tags.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
