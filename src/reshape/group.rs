//! Pivots between row-major tables and per-index / per-series groups.

use std::cmp::Ordering;

use indexmap::IndexSet;
use serde::Serialize;

use crate::processing::reduce::extreme;
use crate::types::{DataSet, Schema, Value};

/// One (series, value) pair taken from a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub series: String,
    pub value: Value,
}

/// All series values of one row, keyed by the row's index value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexGroup {
    pub index: Value,
    pub values: Vec<SeriesPoint>,
}

/// One (index, value) pair taken from a series column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexPoint {
    pub index: Value,
    pub value: Value,
}

/// All index values of one series column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesGroup {
    pub series: String,
    pub values: Vec<IndexPoint>,
}

/// Groups whose point values can be scanned for a min/max.
pub trait GroupedValues {
    /// The value of every point in the group, in order.
    fn point_values(&self) -> impl Iterator<Item = &Value>;
}

impl GroupedValues for IndexGroup {
    fn point_values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().map(|p| &p.value)
    }
}

impl GroupedValues for SeriesGroup {
    fn point_values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().map(|p| &p.value)
    }
}

/// Pivot every row into an [`IndexGroup`].
///
/// The group's index is the row's `index_column` value; its points are every other column in
/// schema order. One group is produced per row, so duplicate index values yield duplicate groups.
///
/// If `index_column` is absent from the schema the index reads as [`Value::Null`] and the first
/// column is treated as the index column.
pub fn group_by_index(dataset: &DataSet, index_column: &str) -> Vec<IndexGroup> {
    let series = series_columns(&dataset.schema, index_column);
    let index_idx = dataset.schema.index_of(index_column);

    (0..dataset.row_count())
        .map(|row| IndexGroup {
            index: index_idx
                .map(|col| dataset.cell(row, col).clone())
                .unwrap_or(Value::Null),
            values: series
                .iter()
                .map(|&(col, name)| SeriesPoint {
                    series: name.to_owned(),
                    value: dataset.cell(row, col).clone(),
                })
                .collect(),
        })
        .collect()
}

/// Pivot every non-index column into a [`SeriesGroup`] with one point per row.
///
/// Produces `column count - 1` groups, in schema order.
pub fn group_by_series(dataset: &DataSet, index_column: &str) -> Vec<SeriesGroup> {
    let index_idx = dataset.schema.index_of(index_column);

    series_columns(&dataset.schema, index_column)
        .into_iter()
        .map(|(col, name)| SeriesGroup {
            series: name.to_owned(),
            values: (0..dataset.row_count())
                .map(|row| IndexPoint {
                    index: index_idx
                        .map(|i| dataset.cell(row, i).clone())
                        .unwrap_or(Value::Null),
                    value: dataset.cell(row, col).clone(),
                })
                .collect(),
        })
        .collect()
}

/// Smallest point value across all groups under natural ordering; `Null` if there is none.
pub fn group_min<G: GroupedValues>(groups: &[G]) -> Value {
    extreme(groups.iter().flat_map(|g| g.point_values()), Ordering::Less)
}

/// Largest point value across all groups under natural ordering; `Null` if there is none.
pub fn group_max<G: GroupedValues>(groups: &[G]) -> Value {
    extreme(groups.iter().flat_map(|g| g.point_values()), Ordering::Greater)
}

/// Flatten [`IndexGroup`]s back into a table.
///
/// The schema is `index_column` followed by every series name in first-seen order. A group that
/// lacks a series gets [`Value::Null`] in that column.
pub fn ungroup_index(groups: &[IndexGroup], index_column: &str) -> DataSet {
    let columns: IndexSet<&str> = groups
        .iter()
        .flat_map(|g| &g.values)
        .map(|p| p.series.as_str())
        .collect();

    let rows = groups
        .iter()
        .map(|g| {
            let mut row = Vec::with_capacity(columns.len() + 1);
            row.push(g.index.clone());
            for name in &columns {
                let value = g
                    .values
                    .iter()
                    .find(|p| p.series == *name)
                    .map(|p| p.value.clone())
                    .unwrap_or(Value::Null);
                row.push(value);
            }
            row
        })
        .collect();

    let schema = Schema::new(std::iter::once(index_column).chain(columns.iter().copied()));
    DataSet::new(schema, rows)
}

fn series_columns<'a>(schema: &'a Schema, index_column: &str) -> Vec<(usize, &'a str)> {
    let skip = schema.index_of(index_column).unwrap_or(0);
    schema
        .column_names()
        .enumerate()
        .filter(|&(i, _)| i != skip)
        .collect()
}
