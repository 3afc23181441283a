//! Identifying-field detection and identity-based list alignment.

use confdiff_core::decode::from_yaml_str;
use confdiff_core::identity::{align, match_by_identity, Aligned, Alignment};
use confdiff_core::{identity_field, Scalar, Value};

/// Parse a YAML flow/block list into its elements.
fn list(text: &str) -> Vec<Value> {
    let docs = from_yaml_str(text).expect("fixture must be valid YAML");
    docs[0]
        .as_sequence()
        .expect("fixture must be a sequence")
        .to_vec()
}

// ============================================================================
// 1. Field selection
// ============================================================================

#[test]
fn name_is_preferred() {
    let from = list("[{id: 1, key: a, name: x}, {id: 2, key: b, name: y}]");
    assert_eq!(identity_field(&from, &from), Some("name"));
}

#[test]
fn key_is_preferred_over_id() {
    let from = list("[{id: 1, key: a}, {id: 2, key: b}]");
    assert_eq!(identity_field(&from, &from), Some("key"));
}

#[test]
fn id_is_preferred_over_other_fields() {
    let from = list("[{uuid: u1, id: 1}, {uuid: u2, id: 2}]");
    assert_eq!(identity_field(&from, &from), Some("id"));
}

#[test]
fn first_qualifying_field_in_document_order_otherwise() {
    let from = list("[{kind: svc, port: 80, host: a}, {kind: svc, port: 81, host: b}]");
    // `kind` repeats, so `port` is the first field with unique values.
    assert_eq!(identity_field(&from, &from), Some("port"));
}

#[test]
fn preferred_field_with_duplicates_falls_through() {
    let from = list("[{name: same, id: 1}, {name: same, id: 2}]");
    assert_eq!(identity_field(&from, &from), Some("id"));
}

#[test]
fn field_must_be_present_in_both_lists() {
    let from = list("[{name: a}, {name: b}]");
    let to = list("[{name: a}, {title: b}]");
    assert_eq!(identity_field(&from, &to), None);
}

#[test]
fn same_identifier_on_both_sides_is_allowed() {
    let from = list("[{name: concourse}, {name: testnet}]");
    let to = list("[{name: concourse}]");
    assert_eq!(identity_field(&from, &to), Some("name"));
}

#[test]
fn null_identifiers_do_not_qualify() {
    let from = list("[{name: ~}, {name: b}]");
    assert_eq!(identity_field(&from, &from), None);
}

#[test]
fn nested_identifier_values_do_not_qualify() {
    let from = list("[{name: {first: a}}, {name: {first: b}}]");
    assert_eq!(identity_field(&from, &from), None);
}

#[test]
fn mixed_lists_are_not_identifiable() {
    let from = list("[{name: a}, plain]");
    assert_eq!(identity_field(&from, &from), None);
}

#[test]
fn string_and_integer_identifiers_are_distinct() {
    let from = list("[{id: 1}, {id: '1'}]");
    assert_eq!(identity_field(&from, &from), Some("id"));
}

// ============================================================================
// 2. Alignment
// ============================================================================

#[test]
fn matched_and_removed_follow_source_order_then_additions() {
    let from = list("[{name: a}, {name: b}, {name: c}]");
    let to = list("[{name: d}, {name: c}, {name: a}]");

    let entries = match_by_identity("name", &from, &to);
    let shape: Vec<(&str, String)> = entries
        .iter()
        .map(|entry| match entry {
            Aligned::Matched { id, .. } => ("matched", id.to_string()),
            Aligned::Removed { id, .. } => ("removed", id.to_string()),
            Aligned::Added { id, .. } => ("added", id.to_string()),
        })
        .collect();

    assert_eq!(
        shape,
        [
            ("matched", "a".to_string()),
            ("removed", "b".to_string()),
            ("matched", "c".to_string()),
            ("added", "d".to_string()),
        ]
    );
}

#[test]
fn matched_entries_carry_both_elements() {
    let from = list("[{name: a, v: 1}]");
    let to = list("[{name: a, v: 2}]");

    match &match_by_identity("name", &from, &to)[0] {
        Aligned::Matched { id, from: f, to: t } => {
            assert_eq!(**id, Scalar::String("a".into()));
            assert_eq!(*f, &from[0]);
            assert_eq!(*t, &to[0]);
        }
        other => panic!("expected a matched entry, got {other:?}"),
    }
}

#[test]
fn align_reports_identity_field() {
    let from = list("[{name: a}]");
    let to = list("[{name: b}]");
    match align(&from, &to) {
        Alignment::Identified { field, entries } => {
            assert_eq!(field, "name");
            assert_eq!(entries.len(), 2);
        }
        other => panic!("expected identified alignment, got {other:?}"),
    }
}

#[test]
fn align_falls_back_to_positions() {
    let from = list("[a, b]");
    let to = list("[a, b, c, d]");
    match align(&from, &to) {
        Alignment::Positional {
            pairs,
            removed,
            added,
        } => {
            assert_eq!(pairs.len(), 2);
            assert!(removed.is_empty());
            assert_eq!(added, &to[2..]);
        }
        other => panic!("expected positional alignment, got {other:?}"),
    }
}
