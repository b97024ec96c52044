//! `tabular-reshaper` turns flat tables into the shapes chart code consumes.
//!
//! Rows are loaded (or built by hand) into an in-memory [`types::DataSet`], then reshaped into
//! plain, serializable records: per-index groups, per-series groups, grouped sums ("rollups")
//! and parent/child hierarchies. Drawing is someone else's job: scales, axes and layouts are
//! expected to consume these records, and nothing here depends on a renderer.
//!
//! ## Data model
//!
//! - A [`types::Schema`] is the caller-declared, ordered list of column names. By convention the
//!   first column is the index/category column and the rest are named series.
//! - Each cell is a [`types::Value`]: `Null` (missing), `Number`, or `Text`.
//! - Reading an absent column, or past the end of a short row, yields `Value::Null` rather than an
//!   error.
//!
//! ## Loading data
//!
//! ```no_run
//! use tabular_reshaper::ingestion::{ingest_from_path, IngestionOptions};
//!
//! # fn main() -> Result<(), tabular_reshaper::IngestionError> {
//! // Auto-detects by extension (.csv/.tsv/.json/.ndjson).
//! let opts = IngestionOptions {
//!     coerce_numbers: true,
//!     ..Default::default()
//! };
//! let ds = ingest_from_path("fruit.csv", &opts)?;
//! println!("rows={}", ds.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Reshaping
//!
//! ```rust
//! use tabular_reshaper::processing::coerce_numbers;
//! use tabular_reshaper::reshape::{build_hierarchy, group_by_index, rollup};
//! use tabular_reshaper::types::{DataSet, Schema, Value};
//!
//! # fn main() -> Result<(), tabular_reshaper::ReshapeError> {
//! let raw = DataSet::new(
//!     Schema::new(["name", "parent", "size"]),
//!     vec![
//!         vec!["fruit".into(), "".into(), "0".into()],
//!         vec!["apple".into(), "fruit".into(), "3".into()],
//!         vec!["pear".into(), "fruit".into(), "7".into()],
//!     ],
//! );
//! let ds = coerce_numbers(&raw);
//!
//! // One group per row, one point per non-index column.
//! let groups = group_by_index(&ds, "name");
//! assert_eq!(groups[1].values.len(), 2);
//!
//! // Sum `size` per parent, in first-seen order.
//! let totals = rollup(&ds, "parent", "size");
//! assert_eq!(totals[1].key, Value::from("fruit"));
//! assert_eq!(totals[1].value, 10.0);
//!
//! // Stratify into a tree; children ordered by descending aggregated value.
//! let root = build_hierarchy(&ds, "name", "parent", "size")?;
//! assert_eq!(root.value, 10.0);
//! assert_eq!(root.top_level_ids(), vec!["pear", "apple"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema, dataset and value types
//! - [`ingestion`]: CSV/TSV/JSON loading with observer hooks
//! - [`processing`]: row-level helpers (filter/map/reduce/sort, column extraction)
//! - [`reshape`]: grouping, rollup and hierarchy construction
//! - [`error`]: error types

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod reshape;
pub mod types;

pub use error::{IngestionError, IngestionResult, ReshapeError, ReshapeResult, StructuralError};
