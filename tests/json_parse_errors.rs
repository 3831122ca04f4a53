//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used in invalid-JSON diagnostics.
//! Invariants: Hints never echo document payload; assertions target category/position text.
//! Notes: Uses source include to exercise the parser boundary in isolation.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_eof_errors() {
    let syntax_err = parse::from_str::<Value>(r#"[{"map":}]"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_str::<Value>(r#"[{"map": "<svg/>""#).unwrap_err();
    assert_eq!(parse::categorize_error(&eof_err), ParseFailureCategory::Eof);
}

#[test]
fn category_mapping_handles_data_errors() {
    let data_err = parse::from_str::<Vec<Value>>(r#"{"map": "<svg/>"}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&data_err),
        ParseFailureCategory::Data
    );
}

#[test]
fn hint_contains_category_position_and_context() {
    let err = parse::from_str::<Value>("[\n  {\"map\": tru}\n]").unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: syntax"));
    assert!(hint.contains("line 2"));
    assert!(hint.contains("context: test.context"));
    assert!(!hint.contains("tru}"));
}

#[test]
fn valid_document_decodes() {
    let value: Value = parse::from_str(r#"[{"request_id": 1, "map": "<svg/>"}]"#).expect("valid");
    assert_eq!(value[0]["map"], "<svg/>");
}

#[test]
fn out_of_range_numbers_decode() {
    let value: Value = parse::from_str(r#"[{"x": 1e400}, {"map": "<svg/>"}]"#).expect("valid");
    assert!(value[0]["x"].is_number());
    assert_eq!(value[1]["map"], "<svg/>");
}
