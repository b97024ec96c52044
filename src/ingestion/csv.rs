//! Delimited-text (CSV/TSV) ingestion implementation.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema, Value};

/// Ingest a comma-separated file into an in-memory [`DataSet`].
///
/// See [`ingest_csv_from_reader`] for the rules.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: Option<&Schema>) -> IngestionResult<DataSet> {
    ingest_delimited_from_path(path, b',', schema)
}

/// Ingest a tab-separated file into an in-memory [`DataSet`].
pub fn ingest_tsv_from_path(path: impl AsRef<Path>, schema: Option<&Schema>) -> IngestionResult<DataSet> {
    ingest_delimited_from_path(path, b'\t', schema)
}

/// Ingest a delimited file using `delimiter` between fields.
pub fn ingest_delimited_from_path(
    path: impl AsRef<Path>,
    delimiter: u8,
    schema: Option<&Schema>,
) -> IngestionResult<DataSet> {
    let mut rdr = reader_builder(delimiter).from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest delimited data from an in-memory string.
pub fn ingest_delimited_from_str(
    input: &str,
    delimiter: u8,
    schema: Option<&Schema>,
) -> IngestionResult<DataSet> {
    let mut rdr = reader_builder(delimiter).from_reader(input.as_bytes());
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest delimited data from an existing CSV reader.
///
/// Rules:
///
/// - The input must have a header row; it becomes the dataset schema.
/// - Every cell is loaded as [`Value::Text`], untrimmed (empty cells are empty text). Apply
///   numeric coercion afterwards if needed.
/// - Records shorter than the header leave their trailing cells missing (read as null).
/// - If `schema` is given, only those columns are kept, in schema order (header order may differ);
///   a column absent from the header is a [`IngestionError::SchemaMismatch`].
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: Option<&Schema>,
) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();

    let (schema, col_idxs) = match schema {
        Some(schema) => {
            // Map schema columns -> header indexes (allows re-ordered columns).
            let mut col_idxs = Vec::with_capacity(schema.len());
            for column in schema.column_names() {
                match headers.iter().position(|h| h == column) {
                    Some(idx) => col_idxs.push(idx),
                    None => {
                        return Err(IngestionError::SchemaMismatch {
                            message: format!(
                                "missing required column '{column}'. headers={:?}",
                                headers.iter().collect::<Vec<_>>(),
                            ),
                        });
                    }
                }
            }
            (schema.clone(), col_idxs)
        }
        None => (Schema::new(headers.iter()), (0..headers.len()).collect()),
    };

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = col_idxs
            .iter()
            .map(|&idx| match record.get(idx) {
                Some(raw) => Value::Text(raw.to_owned()),
                None => Value::Null,
            })
            .collect();
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).delimiter(delimiter).flexible(true);
    builder
}
