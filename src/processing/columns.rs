//! Column extraction.

use indexmap::IndexMap;

use crate::types::{DataSet, Value, ValueKey};

/// Values of `column` in row order, one per row.
///
/// Rows lacking the column (and every row, for a column absent from the schema) yield
/// [`Value::Null`], so the result length always equals the row count.
pub fn column_values(dataset: &DataSet, column: &str) -> Vec<Value> {
    dataset.column_iter(column).cloned().collect()
}

/// Distinct values of `column` in first-seen order.
///
/// Values are compared by display form, so `1` and `"1"` count once and the first one seen is
/// kept. `Null` is distinct from empty text.
pub fn unique_column_values(dataset: &DataSet, column: &str) -> Vec<Value> {
    let mut seen: IndexMap<ValueKey, Value> = IndexMap::new();
    for v in dataset.column_iter(column) {
        seen.entry(ValueKey::of(v)).or_insert_with(|| v.clone());
    }
    seen.into_values().collect()
}
