//! Reduction operations for [`crate::types::DataSet`].

use std::cmp::Ordering;

use crate::types::{DataSet, NaturalOrder, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum the numeric view of each cell, skipping non-numeric cells.
    Sum,
    /// Minimum under natural ordering, ignoring nulls.
    Min,
    /// Maximum under natural ordering, ignoring nulls.
    Max,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Min`/`Max`, returns `Some(Value::Null)` if no cell qualifies.
/// - For `Count`, always returns `Some(Value::Number(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    dataset.schema.index_of(column)?;

    match op {
        ReduceOp::Count => Some(Value::Number(dataset.row_count() as f64)),
        ReduceOp::Sum => {
            let sum = dataset
                .column_iter(column)
                .filter_map(Value::to_number)
                .fold(None, |acc: Option<f64>, v| Some(acc.unwrap_or(0.0) + v));
            Some(sum.map(Value::Number).unwrap_or(Value::Null))
        }
        ReduceOp::Min => Some(extreme(dataset.column_iter(column), Ordering::Less)),
        ReduceOp::Max => Some(extreme(dataset.column_iter(column), Ordering::Greater)),
    }
}

/// Minimum value of `column` under natural ordering.
///
/// Ordering is numeric when every non-null value is numeric and lexicographic otherwise. Returns
/// [`Value::Null`] for an empty dataset, an all-null column, or an unknown column.
pub fn min_of(dataset: &DataSet, column: &str) -> Value {
    extreme(dataset.column_iter(column), Ordering::Less)
}

/// Maximum value of `column` under natural ordering. See [`min_of`].
pub fn max_of(dataset: &DataSet, column: &str) -> Value {
    extreme(dataset.column_iter(column), Ordering::Greater)
}

/// The first value that compares `wanted` against every other non-null value.
pub(crate) fn extreme<'a, I>(values: I, wanted: Ordering) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let values: Vec<&Value> = values.into_iter().filter(|v| !v.is_null()).collect();
    let order = NaturalOrder::detect(values.iter().copied());

    let mut best: Option<&Value> = None;
    for v in values {
        best = match best {
            Some(b) if order.compare(v, b) != wanted => Some(b),
            _ => Some(v),
        };
    }
    best.cloned().unwrap_or(Value::Null)
}
