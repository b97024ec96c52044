//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Rows whose `column` value is loosely equal to `value` (see [`Value::loose_eq`]).
///
/// A column absent from the schema reads as [`Value::Null`], so only a `Null` probe matches it.
pub fn filter_equals(dataset: &DataSet, column: &str, value: &Value) -> DataSet {
    filter_by_column(dataset, column, |cell| cell.loose_eq(value))
}

/// Rows whose `column` value is not loosely equal to `value`.
pub fn filter_not_equals(dataset: &DataSet, column: &str, value: &Value) -> DataSet {
    filter_by_column(dataset, column, |cell| !cell.loose_eq(value))
}

/// The first `n` rows, in order.
pub fn top_n(dataset: &DataSet, n: usize) -> DataSet {
    DataSet::new(
        dataset.schema.clone(),
        dataset.rows.iter().take(n).cloned().collect(),
    )
}

fn filter_by_column<F>(dataset: &DataSet, column: &str, mut keep: F) -> DataSet
where
    F: FnMut(&Value) -> bool,
{
    let idx = dataset.schema.index_of(column);
    dataset.filter_rows(|row| match idx.and_then(|i| row.get(i)) {
        Some(cell) => keep(cell),
        None => keep(&Value::Null),
    })
}
