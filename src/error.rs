use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for reshaping operations that can fail.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV/TSV and JSON ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text (CSV/TSV) ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON document.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected shape (missing requested columns, non-object JSON
    /// rows, unknown format, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

/// Error type returned by reshaping operations.
///
/// Most reshaping never fails: absent columns read as [`crate::types::Value::Null`]. Only strict
/// column checks and hierarchy construction produce errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    /// A column required by the caller is absent from the schema.
    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    /// The rows do not form a valid hierarchy.
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
}

/// Reasons a set of rows cannot be stratified into a single-rooted tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The id or parent-id column is absent from the schema.
    #[error("hierarchy requires column '{column}'")]
    MissingRequiredColumn { column: String },

    /// Every row has a resolvable parent, so no row can be the root.
    #[error("no root")]
    NoRoot,

    /// More than one row has a null or unresolvable parent.
    #[error("multiple roots: {ids:?}")]
    MultipleRoots { ids: Vec<String> },

    /// Two rows share the same id.
    #[error("ambiguous id '{id}'")]
    DuplicateId { id: String },

    /// Rows whose parent chain never reaches the root.
    #[error("cycle among ids {ids:?}")]
    Cycle { ids: Vec<String> },
}
