//! Group-and-sum aggregation.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{DataSet, Value, ValueKey};

/// One grouping key mapped to the sum of the target column over its rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupEntry {
    pub key: Value,
    pub value: f64,
}

/// Group rows by `group_by_column` and sum `sum_column` within each group.
///
/// Keys are matched by display form, so `1` and `"1"` land in the same group, which keeps the
/// first-seen value as its key. Entries come out in first-seen order of their key; they are not
/// sorted. Cells of
/// `sum_column` without a numeric view (text, nulls, or an unknown column) count as 0.
///
/// ```
/// use tabular_reshaper::reshape::{rollup, RollupEntry};
/// use tabular_reshaper::types::{DataSet, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(["g", "v"]),
///     vec![
///         vec!["x".into(), Value::Number(1.0)],
///         vec!["x".into(), Value::Number(2.0)],
///         vec!["y".into(), Value::Number(5.0)],
///     ],
/// );
/// assert_eq!(
///     rollup(&ds, "g", "v"),
///     vec![
///         RollupEntry {
///             key: "x".into(),
///             value: 3.0,
///         },
///         RollupEntry {
///             key: "y".into(),
///             value: 5.0,
///         },
///     ]
/// );
/// ```
pub fn rollup(dataset: &DataSet, group_by_column: &str, sum_column: &str) -> Vec<RollupEntry> {
    let mut groups: IndexMap<ValueKey, RollupEntry> = IndexMap::new();

    for (key, cell) in dataset
        .column_iter(group_by_column)
        .zip(dataset.column_iter(sum_column))
    {
        let addend = cell.to_number().filter(|n| !n.is_nan()).unwrap_or(0.0);
        groups
            .entry(ValueKey::of(key))
            .or_insert_with(|| RollupEntry {
                key: key.clone(),
                value: 0.0,
            })
            .value += addend;
    }

    groups.into_values().collect()
}
