//! In-memory row-level helpers.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion (or
//! built by hand). Every function here is pure: it returns a new value and leaves its input
//! untouched.
//!
//! Currently implemented:
//!
//! - [`filter()`], [`filter_equals()`], [`filter_not_equals()`], [`top_n()`]: row selection
//! - [`map()`], [`coerce_numbers()`]: row mapping and numeric coercion
//! - [`column_values()`], [`unique_column_values()`]: column extraction
//! - [`reduce()`], [`min_of()`], [`max_of()`]: reductions (count/sum/min/max)
//! - [`sort_ascending()`], [`sort_descending()`]: stable column sorts
//!
//! ## Example: coerce → filter → sort → reduce
//!
//! ```rust
//! use tabular_reshaper::processing::{
//!     coerce_numbers, filter_equals, reduce, sort_descending, top_n, ReduceOp,
//! };
//! use tabular_reshaper::types::{DataSet, Schema, Value};
//!
//! let raw = DataSet::new(
//!     Schema::new(["name", "nationality", "score"]),
//!     vec![
//!         vec!["Ada".into(), "uk".into(), "10".into()],
//!         vec!["Blaise".into(), "fr".into(), "20".into()],
//!         vec!["Alan".into(), "uk".into(), "15".into()],
//!     ],
//! );
//!
//! let ds = coerce_numbers(&raw);
//! let uk = filter_equals(&ds, "nationality", &Value::from("uk"));
//! let best = top_n(&sort_descending(&uk, "score"), 1);
//! assert_eq!(best.rows[0][0], Value::from("Alan"));
//!
//! let sum = reduce(&uk, "score", ReduceOp::Sum).unwrap();
//! assert_eq!(sum, Value::Number(25.0));
//! ```

pub mod columns;
pub mod filter;
pub mod map;
pub mod reduce;
pub mod sort;

pub use columns::{column_values, unique_column_values};
pub use filter::{filter, filter_equals, filter_not_equals, top_n};
pub use map::{coerce_numbers, map};
pub use reduce::{max_of, min_of, reduce, ReduceOp};
pub use sort::{sort_ascending, sort_descending};
