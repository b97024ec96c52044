//! Row mapping for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] by applying `mapper` to every row.
///
/// This is a convenience wrapper around [`DataSet::map_rows`].
///
/// # Panics
///
/// Panics if `mapper` returns rows with a different length than the schema column count.
pub fn map<F>(dataset: &DataSet, mapper: F) -> DataSet
where
    F: FnMut(&[Value]) -> Vec<Value>,
{
    dataset.map_rows(mapper)
}

/// Returns a copy of `dataset` with every numeric-looking text cell replaced by its number.
///
/// Cells that do not classify as numbers (including empty text) are left unchanged; the input
/// dataset is not modified. See [`DataSet::coerce_numbers_in_place`] for the in-place variant.
///
/// ```
/// use tabular_reshaper::processing::coerce_numbers;
/// use tabular_reshaper::types::{DataSet, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(["x"]),
///     vec![vec![Value::from("5")], vec![Value::from("5a")]],
/// );
/// let out = coerce_numbers(&ds);
/// assert_eq!(out.rows, vec![vec![Value::Number(5.0)], vec![Value::from("5a")]]);
/// ```
pub fn coerce_numbers(dataset: &DataSet) -> DataSet {
    let mut out = dataset.clone();
    out.coerce_numbers_in_place();
    out
}
