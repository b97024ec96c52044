//! Chart-ready shapes derived from a [`crate::types::DataSet`].
//!
//! Every function here takes the current rows and returns a fresh, read-only snapshot; nothing
//! is mutated in place and no rendering concern leaks in. The outputs are plain data
//! (`serde::Serialize`) meant to be handed to whatever draws the chart:
//!
//! - [`group_by_index()`]: one [`IndexGroup`] per row (multi-series bar/line layouts)
//! - [`group_by_series()`]: one [`SeriesGroup`] per non-index column (one line per series)
//! - [`rollup()`]: one [`RollupEntry`] per distinct key (pie/bar totals)
//! - [`build_hierarchy()`]: a single-rooted [`HierarchyNode`] tree (partition/sunburst/treemap)
//!
//! ## Example
//!
//! ```rust
//! use tabular_reshaper::reshape::{group_by_series, group_max};
//! use tabular_reshaper::types::{DataSet, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(["year", "north", "south"]),
//!     vec![
//!         vec![Value::Number(2019.0), Value::Number(4.0), Value::Number(9.0)],
//!         vec![Value::Number(2020.0), Value::Number(6.0), Value::Number(2.0)],
//!     ],
//! );
//!
//! let lines = group_by_series(&ds, "year");
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[1].series, "south");
//! assert_eq!(group_max(&lines), Value::Number(9.0));
//! ```

pub mod group;
pub mod hierarchy;
pub mod rollup;

pub use group::{
    group_by_index, group_by_series, group_max, group_min, ungroup_index, GroupedValues,
    IndexGroup, IndexPoint, SeriesGroup, SeriesPoint,
};
pub use hierarchy::{build_hierarchy, HierarchyNode};
pub use rollup::{rollup, RollupEntry};
