//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object (one row)
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Without a schema, columns are the object keys in order of first appearance across all rows.
//! With a schema, nested fields can be selected using dot paths (e.g. `user.name`).

use std::fs;
use std::path::Path;

use indexmap::IndexSet;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema, Value};

type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Ingest a JSON/NDJSON file into an in-memory [`DataSet`].
pub fn ingest_json_from_path(path: impl AsRef<Path>, schema: Option<&Schema>) -> IngestionResult<DataSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text, schema)
}

/// Ingest JSON from an in-memory string into a [`DataSet`].
///
/// Numbers load as [`Value::Number`], strings as [`Value::Text`], and `null` or absent keys as
/// [`Value::Null`]. Booleans, arrays and nested objects load as their JSON text.
pub fn ingest_json_from_str(input: &str, schema: Option<&Schema>) -> IngestionResult<DataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    let values = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(v @ serde_json::Value::Object(_)) => vec![v],
        Ok(_) => {
            return Err(IngestionError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            });
        }
        // NDJSON only when the first line stands alone; otherwise report the document's error.
        Err(_) if first_line_is_json(trimmed) => parse_ndjson(trimmed)?,
        Err(e) => return Err(e.into()),
    };

    let objects = values
        .iter()
        .enumerate()
        .map(|(idx0, v)| {
            v.as_object().ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {} is not a json object", idx0 + 1),
            })
        })
        .collect::<IngestionResult<Vec<&JsonObject>>>()?;

    let schema = match schema {
        Some(schema) => schema.clone(),
        None => {
            let keys: IndexSet<&str> = objects
                .iter()
                .flat_map(|obj| obj.keys().map(String::as_str))
                .collect();
            Schema::new(keys)
        }
    };

    let rows: Vec<Vec<Value>> = objects
        .iter()
        .map(|obj| {
            schema
                .column_names()
                .map(|column| get_by_dot_path(obj, column).map(convert_json_value).unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(DataSet::new(schema, rows))
}

fn first_line_is_json(input: &str) -> bool {
    input
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| serde_json::from_str::<serde_json::Value>(line).is_ok())
}

fn parse_ndjson(input: &str) -> IngestionResult<Vec<serde_json::Value>> {
    let mut values = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
            IngestionError::SchemaMismatch {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            }
        })?;
        values.push(v);
    }
    Ok(values)
}

fn get_by_dot_path<'a>(root: &'a JsonObject, path: &str) -> Option<&'a serde_json::Value> {
    // An exact key wins over a nested lookup.
    if let Some(v) = root.get(path) {
        return Some(v);
    }

    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        match current {
            serde_json::Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn convert_json_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}
