use tabular_reshaper::ingestion::json::{ingest_json_from_path, ingest_json_from_str};
use tabular_reshaper::types::{Schema, Value};
use tabular_reshaper::IngestionError;

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn ingest_json_array_infers_columns_in_key_order() {
    let input = r#"[{"g":"x","v":1},{"g":"y","v":2.5,"w":"extra"}]"#;
    let ds = ingest_json_from_str(input, None).unwrap();

    assert_eq!(ds.schema, Schema::new(["g", "v", "w"]));
    assert_eq!(
        ds.rows,
        vec![
            vec![text("x"), Value::Number(1.0), Value::Null],
            vec![text("y"), Value::Number(2.5), text("extra")],
        ]
    );
}

#[test]
fn ingest_ndjson_with_nested_schema_paths() {
    let schema = Schema::new(["id", "user.name", "extra"]);
    let ds = ingest_json_from_path("tests/fixtures/events.ndjson", Some(&schema)).unwrap();

    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.rows[0], vec![Value::Number(1.0), text("ada"), Value::Null]);
    assert_eq!(ds.rows[2], vec![Value::Number(3.0), Value::Null, Value::Number(7.0)]);
}

#[test]
fn ingest_ndjson_keeps_bools_and_objects_as_text() {
    let ds = ingest_json_from_path("tests/fixtures/events.ndjson", None).unwrap();

    assert_eq!(ds.schema, Schema::new(["id", "user", "kind", "ok", "extra"]));
    assert_eq!(ds.rows[0][1], text(r#"{"name":"ada"}"#));
    assert_eq!(ds.rows[0][3], text("true"));
    assert_eq!(ds.rows[1][3], Value::Null);
}

#[test]
fn ingest_single_object_is_one_row() {
    let ds = ingest_json_from_str(r#"{"a": "1"}"#, None).unwrap();
    assert_eq!(ds.rows, vec![vec![text("1")]]);
}

#[test]
fn ingest_json_rejects_non_object_rows() {
    let err = ingest_json_from_str("[1, 2]", None).unwrap_err();
    assert!(err.to_string().contains("row 1 is not a json object"));
}

#[test]
fn ingest_json_reports_malformed_documents() {
    let err = ingest_json_from_str("[{\"a\": 1}", None).unwrap_err();
    assert!(matches!(err, IngestionError::Json(_)));

    let err = ingest_json_from_str("{\"a\": 1}\n{oops}\n", None).unwrap_err();
    assert!(err.to_string().contains("invalid ndjson at line 2"));

    let err = ingest_json_from_str("[\n  {\"a\": 1},\n  {\"a\": }\n]\n", None).unwrap_err();
    assert!(matches!(err, IngestionError::Json(_)));

    let err = ingest_json_from_str("   ", None).unwrap_err();
    assert!(err.to_string().contains("json input is empty"));
}
