//! Tests for the Reference union codec
//!
//! These tests exercise the discriminator dispatch of the Reference model
//! through the public API: round-trips for each variant, the null
//! pass-through on the optional paths, and rejection of unknown
//! discriminators.

use serde_json::{json, Value};

use nessie_client::nessie::models::{
    Branch, Hash, ModelError, Reference, ReferenceType, Tag,
};

/// Decoding then re-encoding a discriminated object must reproduce an
/// equivalent JSON object for every variant (field order is irrelevant in
/// `serde_json::Value` equality).
#[test]
fn test_round_trip_for_each_variant() {
    let inputs = vec![
        json!({"type": "TAG", "name": "v1.0", "hash": "1122aabb"}),
        json!({"type": "BRANCH", "name": "main", "hash": "abc123"}),
        json!({"type": "HASH", "hash": "deadbeefcafe"}),
    ];

    for input in inputs {
        let reference = Reference::from_json(input.clone())
            .unwrap_or_else(|e| panic!("Failed to decode {}: {}", input, e));
        assert_eq!(
            reference.to_json(),
            input,
            "Round-trip should reproduce the original object"
        );
    }
}

#[test]
fn test_branch_example_from_wire() {
    let reference = Reference::from_json(json!({
        "type": "BRANCH",
        "name": "main",
        "hash": "abc123"
    }))
    .unwrap();

    assert_eq!(reference.reference_type(), ReferenceType::Branch);
    assert_eq!(
        reference,
        Reference::Branch(Branch {
            name: "main".to_string(),
            hash: Some("abc123".to_string()),
        })
    );
}

#[test]
fn test_decoding_null_passes_through() {
    let decoded = Reference::from_json_opt(Value::Null).unwrap();
    assert!(decoded.is_none(), "null must decode to None unchanged");
}

#[test]
fn test_encoding_none_passes_through() {
    assert_eq!(Reference::to_json_opt(None), Value::Null);

    let tag = Reference::Tag(Tag {
        name: "v2".to_string(),
        hash: None,
    });
    assert_eq!(
        Reference::to_json_opt(Some(&tag)),
        json!({"type": "TAG", "name": "v2"})
    );
}

#[test]
fn test_unknown_discriminator_mentions_offending_value() {
    let err = Reference::from_json(json!({"type": "UNKNOWN", "name": "x"})).unwrap_err();

    match &err {
        ModelError::UnrecognizedVariant { discriminator, .. } => {
            assert_eq!(discriminator, "UNKNOWN");
        }
        other => panic!("Expected UnrecognizedVariant, got {:?}", other),
    }
    assert!(
        err.to_string().contains("UNKNOWN"),
        "Error message should mention the offending discriminator: {}",
        err
    );
}

/// The discriminator is case-sensitive on the wire; lowercase variants of
/// the known tags are unknown values.
#[test]
fn test_discriminator_is_case_sensitive() {
    let err = Reference::from_json(json!({"type": "branch", "name": "main"})).unwrap_err();
    assert!(matches!(err, ModelError::UnrecognizedVariant { .. }));
}

#[test]
fn test_reference_nests_inside_response_models() {
    // A Vec<Reference> is how the list-references endpoint answers.
    let decoded: Vec<Reference> = serde_json::from_value(json!([
        {"type": "BRANCH", "name": "main", "hash": "abc123"},
        {"type": "HASH", "hash": "deadbeef"}
    ]))
    .unwrap();

    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1], Reference::Hash(Hash { hash: "deadbeef".to_string() }));
}
