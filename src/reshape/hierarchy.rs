//! Parent/child tree construction from id and parent-id columns.
//!
//! [`build_hierarchy`] stratifies a flat table into a single-rooted tree:
//!
//! - Every row becomes one [`HierarchyNode`], identified by the display form of its id cell.
//! - A row whose parent cell is null, empty, or names no row is a root candidate; exactly one
//!   candidate must exist.
//! - Node values are aggregated bottom-up (own value plus the aggregated values of the children),
//!   and children are ordered by descending aggregated value with ties kept in row order.
//!
//! Parents are resolved through an id index built once, and aggregation is a single post-order
//! pass, so construction is linear in the number of rows (plus the child sorts).

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ReshapeResult, StructuralError};
use crate::types::{DataSet, Value};

/// One node of a stratified hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    /// Display form of the row's id cell.
    pub id: String,
    /// Id of the parent node, `None` for the root.
    pub parent_id: Option<String>,
    /// Own value plus the aggregated values of all children.
    pub value: f64,
    /// Distance from the root (the root has depth 0).
    pub depth: usize,
    /// Longest distance to a descendant leaf (leaves have height 0).
    pub height: usize,
    /// Position of the source row in the dataset.
    pub row: usize,
    /// Children ordered by descending aggregated value.
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Ids of the root's direct children, in child order.
    pub fn top_level_ids(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.id.as_str()).collect()
    }

    /// This node and all of its descendants in pre-order.
    pub fn descendants(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Descendant leaves in pre-order.
    pub fn leaves(&self) -> Vec<&HierarchyNode> {
        self.descendants()
            .into_iter()
            .filter(|n| n.is_leaf())
            .collect()
    }

    /// The first node in pre-order with the given id.
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        self.descendants().into_iter().find(|n| n.id == id)
    }
}

/// Stratify `dataset` into a tree using `id_column` and `parent_id_column`.
///
/// Aggregated values sum `value_column`; cells without a numeric view count as 0.
///
/// # Errors
///
/// Returns [`crate::error::ReshapeError::Structural`] when the id or parent column is missing,
/// ids are duplicated, there is no root or more than one root, or some rows never reach the root.
///
/// ```
/// use tabular_reshaper::reshape::build_hierarchy;
/// use tabular_reshaper::types::{DataSet, Schema, Value};
///
/// # fn main() -> Result<(), tabular_reshaper::ReshapeError> {
/// let ds = DataSet::new(
///     Schema::new(["id", "parent", "v"]),
///     vec![
///         vec!["root".into(), Value::Null, Value::Number(0.0)],
///         vec!["a".into(), "root".into(), Value::Number(3.0)],
///         vec!["b".into(), "root".into(), Value::Number(7.0)],
///     ],
/// );
/// let root = build_hierarchy(&ds, "id", "parent", "v")?;
/// assert_eq!(root.value, 10.0);
/// assert_eq!(root.top_level_ids(), vec!["b", "a"]);
/// # Ok(())
/// # }
/// ```
pub fn build_hierarchy(
    dataset: &DataSet,
    id_column: &str,
    parent_id_column: &str,
    value_column: &str,
) -> ReshapeResult<HierarchyNode> {
    Ok(stratify(dataset, id_column, parent_id_column, value_column)?)
}

fn stratify(
    dataset: &DataSet,
    id_column: &str,
    parent_id_column: &str,
    value_column: &str,
) -> Result<HierarchyNode, StructuralError> {
    let id_idx = required_column(dataset, id_column)?;
    let parent_idx = required_column(dataset, parent_id_column)?;
    let value_idx = dataset.schema.index_of(value_column);
    let n = dataset.row_count();

    let ids: Vec<String> = (0..n).map(|row| dataset.cell(row, id_idx).display_text()).collect();

    let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(n);
    for (row, id) in ids.iter().enumerate() {
        if by_id.insert(id.as_str(), row).is_some() {
            return Err(StructuralError::DuplicateId { id: id.clone() });
        }
    }

    let parent_ids: Vec<Option<String>> = (0..n)
        .map(|row| match dataset.cell(row, parent_idx) {
            Value::Null => None,
            cell => Some(cell.display_text()).filter(|p| !p.is_empty()),
        })
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots = Vec::new();
    for (row, parent) in parent_ids.iter().enumerate() {
        match parent.as_deref().and_then(|p| by_id.get(p)) {
            Some(&parent_row) => children[parent_row].push(row),
            None => roots.push(row),
        }
    }

    let root = match roots.as_slice() {
        [] => return Err(StructuralError::NoRoot),
        [only] => *only,
        many => {
            return Err(StructuralError::MultipleRoots {
                ids: many.iter().map(|&r| ids[r].clone()).collect(),
            });
        }
    };

    // Pre-order walk from the root; anything left unvisited hangs off a cycle.
    let mut order = Vec::with_capacity(n);
    let mut depth = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut stack = vec![root];
    while let Some(row) = stack.pop() {
        visited[row] = true;
        order.push(row);
        for &child in children[row].iter().rev() {
            depth[child] = depth[row] + 1;
            stack.push(child);
        }
    }
    if order.len() < n {
        return Err(StructuralError::Cycle {
            ids: (0..n).filter(|&r| !visited[r]).map(|r| ids[r].clone()).collect(),
        });
    }

    // Post-order (reverse pre-order) aggregation: children are finished before their parent.
    let mut built: Vec<Option<HierarchyNode>> = vec![None; n];
    for &row in order.iter().rev() {
        let mut kids: Vec<HierarchyNode> = children[row]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        kids.sort_by(|a, b| descending(a.value, b.value));

        let own = value_idx
            .and_then(|col| dataset.cell(row, col).to_number())
            .filter(|v| !v.is_nan())
            .unwrap_or(0.0);

        built[row] = Some(HierarchyNode {
            id: ids[row].clone(),
            parent_id: if row == root { None } else { parent_ids[row].clone() },
            value: finite_or_zero(own + kids.iter().map(|k| k.value).sum::<f64>()),
            depth: depth[row],
            height: kids.iter().map(|k| k.height + 1).max().unwrap_or(0),
            row,
            children: kids,
        });
    }

    built[root].take().ok_or(StructuralError::NoRoot)
}

/// `Infinity + -Infinity` sums to NaN; it counts as 0 like a NaN own value.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

fn required_column(dataset: &DataSet, column: &str) -> Result<usize, StructuralError> {
    dataset
        .schema
        .index_of(column)
        .ok_or_else(|| StructuralError::MissingRequiredColumn {
            column: column.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::build_hierarchy;
    use crate::error::{ReshapeError, StructuralError};
    use crate::types::{DataSet, Schema, Value};

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn rows(entries: &[(&str, Option<&str>, f64)]) -> DataSet {
        DataSet::new(
            Schema::new(["id", "parent", "v"]),
            entries
                .iter()
                .map(|&(id, parent, v)| vec![text(id), parent.into(), Value::Number(v)])
                .collect(),
        )
    }

    fn structural(err: ReshapeError) -> StructuralError {
        match err {
            ReshapeError::Structural(e) => e,
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn opposite_infinities_sum_to_zero_and_siblings_still_sort() {
        let ids: Vec<String> = (0..40).map(|i| format!("c{i}")).collect();
        let mut entries = vec![("root", None, 0.0)];
        for (i, id) in ids.iter().enumerate() {
            let own = if i == 5 || i == 20 { 0.0 } else { (i + 1) as f64 };
            entries.push((id.as_str(), Some("root"), own));
        }
        entries.extend([
            ("c5a", Some("c5"), f64::INFINITY),
            ("c5b", Some("c5"), f64::NEG_INFINITY),
            ("c20a", Some("c20"), f64::NEG_INFINITY),
            ("c20b", Some("c20"), f64::INFINITY),
        ]);
        let root = build_hierarchy(&rows(&entries), "id", "parent", "v").unwrap();

        assert_eq!(root.value, 793.0);
        assert_eq!(root.find("c5").unwrap().value, 0.0);
        assert_eq!(root.find("c5").unwrap().top_level_ids(), vec!["c5a", "c5b"]);
        assert_eq!(root.find("c20").unwrap().top_level_ids(), vec!["c20b", "c20a"]);

        let order = root.top_level_ids();
        assert_eq!(order.len(), 40);
        assert_eq!(order[0], "c39");
        assert_eq!(&order[38..], ["c5", "c20"]);
        assert!(root.children.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn children_sorted_by_descending_value() {
        let ds = rows(&[("root", None, 0.0), ("a", Some("root"), 3.0), ("b", Some("root"), 7.0)]);
        let root = build_hierarchy(&ds, "id", "parent", "v").unwrap();

        assert_eq!(root.id, "root");
        assert_eq!(root.parent_id, None);
        assert_eq!(root.value, 10.0);
        assert_eq!(root.top_level_ids(), vec!["b", "a"]);
        assert_eq!(root.children[0].value, 7.0);
        assert_eq!(root.children[0].parent_id.as_deref(), Some("root"));
    }

    #[test]
    fn values_aggregate_bottom_up_through_levels() {
        let ds = rows(&[
            ("leaf1", Some("mid"), 2.0),
            ("root", None, 0.0),
            ("mid", Some("root"), 0.0),
            ("leaf2", Some("mid"), 5.0),
            ("solo", Some("root"), 4.0),
        ]);
        let root = build_hierarchy(&ds, "id", "parent", "v").unwrap();

        assert_eq!(root.value, 11.0);
        assert_eq!(root.top_level_ids(), vec!["mid", "solo"]);
        let mid = root.find("mid").unwrap();
        assert_eq!(mid.value, 7.0);
        assert_eq!(mid.depth, 1);
        assert_eq!(mid.height, 1);
        assert_eq!(mid.row, 2);
        assert_eq!(root.height, 2);
        assert_eq!(root.find("leaf1").unwrap().depth, 2);

        let leaves: Vec<_> = root.leaves().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(leaves, vec!["leaf2", "leaf1", "solo"]);
        assert_eq!(root.descendants().len(), 5);
    }

    #[test]
    fn interior_own_value_is_included() {
        let ds = rows(&[("root", None, 1.0), ("a", Some("root"), 2.0)]);
        let root = build_hierarchy(&ds, "id", "parent", "v").unwrap();
        assert_eq!(root.value, 3.0);
    }

    #[test]
    fn ties_keep_row_order() {
        let ds = rows(&[
            ("root", None, 0.0),
            ("x", Some("root"), 1.0),
            ("y", Some("root"), 1.0),
            ("z", Some("root"), 1.0),
        ]);
        let root = build_hierarchy(&ds, "id", "parent", "v").unwrap();
        assert_eq!(root.top_level_ids(), vec!["x", "y", "z"]);
    }

    #[test]
    fn unresolvable_parent_can_be_the_single_root() {
        let ds = rows(&[("top", Some("elsewhere"), 1.0), ("a", Some("top"), 1.0)]);
        let root = build_hierarchy(&ds, "id", "parent", "v").unwrap();
        assert_eq!(root.id, "top");
        assert_eq!(root.parent_id, None);
        assert_eq!(root.value, 2.0);
    }

    #[test]
    fn empty_parent_text_marks_root() {
        let ds = DataSet::new(
            Schema::new(["id", "parent", "v"]),
            vec![
                vec![text("root"), text(""), text("")],
                vec![text("a"), text("root"), text("4")],
            ],
        );
        let root = build_hierarchy(&ds, "id", "parent", "v").unwrap();
        assert_eq!(root.value, 4.0);
    }

    #[test]
    fn numeric_ids_match_text_parent_references() {
        let ds = DataSet::new(
            Schema::new(["id", "parent", "v"]),
            vec![
                vec![Value::Number(1.0), Value::Null, Value::Number(0.0)],
                vec![Value::Number(2.0), text("1"), Value::Number(6.0)],
            ],
        );
        let root = build_hierarchy(&ds, "id", "parent", "v").unwrap();
        assert_eq!(root.top_level_ids(), vec!["2"]);
    }

    #[test]
    fn two_roots_is_an_error() {
        let ds = rows(&[("r1", None, 1.0), ("r2", Some("missing"), 1.0)]);
        let err = structural(build_hierarchy(&ds, "id", "parent", "v").unwrap_err());
        assert_eq!(
            err,
            StructuralError::MultipleRoots {
                ids: vec!["r1".to_string(), "r2".to_string()]
            }
        );
    }

    #[test]
    fn empty_dataset_has_no_root() {
        let ds = rows(&[]);
        let err = structural(build_hierarchy(&ds, "id", "parent", "v").unwrap_err());
        assert_eq!(err, StructuralError::NoRoot);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let ds = rows(&[("root", None, 0.0), ("a", Some("root"), 1.0), ("a", Some("root"), 2.0)]);
        let err = structural(build_hierarchy(&ds, "id", "parent", "v").unwrap_err());
        assert_eq!(err, StructuralError::DuplicateId { id: "a".to_string() });
    }

    #[test]
    fn cycles_are_rejected() {
        let ds = rows(&[
            ("root", None, 0.0),
            ("a", Some("b"), 1.0),
            ("b", Some("a"), 1.0),
        ]);
        let err = structural(build_hierarchy(&ds, "id", "parent", "v").unwrap_err());
        assert_eq!(
            err,
            StructuralError::Cycle {
                ids: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn self_parent_with_no_other_root_is_no_root() {
        let ds = rows(&[("a", Some("a"), 1.0)]);
        let err = structural(build_hierarchy(&ds, "id", "parent", "v").unwrap_err());
        assert_eq!(err, StructuralError::NoRoot);
    }

    #[test]
    fn missing_id_or_parent_column_is_structural() {
        let ds = rows(&[("root", None, 0.0)]);
        let err = structural(build_hierarchy(&ds, "name", "parent", "v").unwrap_err());
        assert_eq!(
            err,
            StructuralError::MissingRequiredColumn { column: "name".to_string() }
        );
        assert!(build_hierarchy(&ds, "id", "up", "v").is_err());
    }

    #[test]
    fn missing_value_column_aggregates_to_zero() {
        let ds = rows(&[("root", None, 5.0), ("a", Some("root"), 3.0)]);
        let root = build_hierarchy(&ds, "id", "parent", "weight").unwrap();
        assert_eq!(root.value, 0.0);
        assert_eq!(root.children.len(), 1);
    }
}
