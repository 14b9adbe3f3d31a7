//! Unit tests for SourcePosition and SourceLocation

use core_types::{SourceLocation, SourcePosition};

#[test]
fn test_position_default_is_origin() {
    let pos = SourcePosition::default();
    assert_eq!(pos.line, 0);
    assert_eq!(pos.column, 0);
    assert_eq!(pos.offset, 0);
}

#[test]
fn test_location_serializes_without_empty_source() {
    let loc = SourceLocation::new(SourcePosition::new(1, 0, 0), SourcePosition::new(1, 5, 5));
    let json = serde_json::to_string(&loc).unwrap();
    assert_eq!(
        json,
        r#"{"start":{"line":1,"column":0,"offset":0},"end":{"line":1,"column":5,"offset":5}}"#
    );
}

#[test]
fn test_location_serializes_source_label() {
    let loc = SourceLocation::default().with_source(Some("a.js".to_string()));
    let json = serde_json::to_string(&loc).unwrap();
    assert!(json.ends_with(r#""source":"a.js"}"#));
}
