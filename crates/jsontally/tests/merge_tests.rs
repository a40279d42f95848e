//! Deep overwrite behaviour on whole documents

use jsontally::*;
use pretty_assertions::assert_eq;

fn parse(text: &str) -> TrackedObject {
    TrackedObject::parse(text).unwrap()
}

#[test]
fn test_overwrite_scenario() {
    let base = parse(
        r#"{
            "str": "Original string",
            "null": null,
            "ver": "1.2",
            "num": 10,
            "bad": "TO REMOVE",
            "obj": {"a": 1, "b": {"c": "keep", "d": "replace"}},
            "array": ["a", "b", "c"]
        }"#,
    );
    let overwrites = parse(
        r#"{
            "str": "Overwritten string",
            "num": 12.5,
            "bad": null,
            "unexistant": null,
            "obj": {"b": {"d": "replaced", "e": true}},
            "array": ["a", "d"]
        }"#,
    );
    let expected = parse(
        r#"{
            "str": "Overwritten string",
            "null": null,
            "ver": "1.2",
            "num": 12.5,
            "obj": {"a": 1, "b": {"c": "keep", "d": "replaced", "e": true}},
            "array": ["a", "d"]
        }"#,
    );

    let result = overwrite(Some(&base), Some(&overwrites), &MergeOptions::default());
    assert_eq!(result, expected);
    assert_eq!(result.kind_of("num"), Some(ValueKind::Double));
    assert!(!structurally_equal(Some(&result), Some(&base)));
}

#[test]
fn test_identity_reconciliation_keeps_overwrite_order() {
    let base = parse(
        r#"{"layers": [
            {"id": "bathymetry", "opacity": 0.5, "style": "blues"},
            {"id": "reefs", "opacity": 1.0},
            {"id": "coast"}
        ]}"#,
    );
    let overwrites = parse(
        r#"{"layers": [
            {"id": "reefs", "opacity": 0.8},
            {"id": "labels", "font": "sans"},
            {"id": "bathymetry", "style": null}
        ]}"#,
    );
    let expected = parse(
        r#"{"layers": [
            {"id": "reefs", "opacity": 0.8},
            {"id": "labels", "font": "sans"},
            {"id": "bathymetry", "opacity": 0.5}
        ]}"#,
    );

    let result = base.overwrite_with(&overwrites, &MergeOptions::with_identity_key("id"));
    assert_eq!(result, expected);
}

#[test]
fn test_without_identity_arrays_are_replaced() {
    let base = parse(r#"{"layers": [{"id": "a", "x": 1}, {"id": "b"}]}"#);
    let overwrites = parse(r#"{"layers": [{"id": "a", "y": 2}]}"#);
    let result = base.overwrite(&overwrites);
    assert_eq!(result, overwrites);
}

#[test]
fn test_merge_result_is_tracked_independently() {
    let base = parse(r#"{"a": 1, "nested": {"b": 2}}"#);
    let overwrites = parse(r#"{"nested": {"c": 3}}"#);
    let result = base.overwrite(&overwrites);

    let nested = result.get_object("nested").unwrap().unwrap();
    nested.get::<i32>("b").unwrap();
    nested.get::<i32>("c").unwrap();
    result.get::<i32>("a").unwrap();

    assert!(result.never_visited().is_empty());
    assert_eq!(base.never_visited().len(), 2);
    assert_eq!(overwrites.never_visited().len(), 1);
}

#[test]
fn test_missing_inputs() {
    let doc = parse(r#"{"k": [1, {"x": null}]}"#);
    let options = MergeOptions::with_identity_key("id");
    assert_eq!(overwrite(Some(&doc), None, &options), doc);
    assert_eq!(overwrite(None, Some(&doc), &options), doc);
    assert_eq!(overwrite(None, None, &options), TrackedObject::new());
}

#[test]
fn test_empty_overwrites_leave_base_unchanged() {
    let base = parse(
        r#"{"name": "reef", "depth": {"min": 2, "max": 40.5}, "layers": [{"id": "a", "tags": ["x"]}, 3]}"#,
    );
    let result = base.overwrite_with(&TrackedObject::new(), &MergeOptions::with_identity_key("id"));
    assert_eq!(result, base);
}

#[test]
fn test_empty_base_yields_overwrites() {
    let overwrites = parse(
        r#"{"name": "reef", "depth": {"min": 2, "nested": {"deep": [1, [2]]}}, "layers": [{"id": "a"}, null]}"#,
    );
    assert_eq!(TrackedObject::new().overwrite(&overwrites), overwrites);
    assert_eq!(
        TrackedObject::new().overwrite_with(&overwrites, &MergeOptions::with_identity_key("id")),
        overwrites
    );
}
