//! Stable column sorts.

use crate::types::{DataSet, NaturalOrder};

/// Rows sorted ascending by `column` under natural ordering.
///
/// The sort is stable: ties keep their original relative order. Null cells go last.
pub fn sort_ascending(dataset: &DataSet, column: &str) -> DataSet {
    sort_by_column(dataset, column, false)
}

/// Rows sorted descending by `column` under natural ordering.
///
/// The sort is stable: ties keep their original relative order. Null cells go last.
pub fn sort_descending(dataset: &DataSet, column: &str) -> DataSet {
    sort_by_column(dataset, column, true)
}

fn sort_by_column(dataset: &DataSet, column: &str, descending: bool) -> DataSet {
    let Some(idx) = dataset.schema.index_of(column) else {
        return dataset.clone();
    };

    let order = NaturalOrder::detect(dataset.column_iter(column));
    let mut positions: Vec<usize> = (0..dataset.row_count()).collect();
    positions.sort_by(|&a, &b| {
        let (a_cell, b_cell) = (dataset.cell(a, idx), dataset.cell(b, idx));
        match (a_cell.is_null(), b_cell.is_null(), descending) {
            // Nulls stay last in both directions.
            (false, false, true) => order.compare(b_cell, a_cell),
            _ => order.compare(a_cell, b_cell),
        }
    });

    DataSet::new(
        dataset.schema.clone(),
        positions
            .into_iter()
            .map(|pos| dataset.rows[pos].clone())
            .collect(),
    )
}
