//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError, JsResult};

#[test]
fn test_error_kinds_are_distinct() {
    assert_ne!(ErrorKind::Scanner, ErrorKind::Grammar);
    assert_ne!(ErrorKind::CoverGrammar, ErrorKind::Jsx);
}

#[test]
fn test_error_propagates_through_result() {
    fn fails() -> JsResult<()> {
        Err(JsError::new(ErrorKind::CoverGrammar, "Unexpected token ...", 1, 1, 2))
    }
    fn outer() -> JsResult<u32> {
        fails()?;
        Ok(1)
    }
    let err = outer().unwrap_err();
    assert_eq!(err.kind, ErrorKind::CoverGrammar);
    assert_eq!(err.index, 1);
}

#[test]
fn test_error_serializes_kind_and_position() {
    let err = JsError::new(ErrorKind::Grammar, "Unexpected end of input", 3, 1, 4);
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "Grammar");
    assert_eq!(json["line"], 1);
    assert_eq!(json["column"], 4);
    assert!(json.get("source_name").is_none());
}
