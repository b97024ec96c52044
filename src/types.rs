//! Core data model types.
//!
//! Tables are loaded (or built by hand) into an in-memory [`DataSet`]: an ordered list of column
//! names ([`Schema`]) plus row-major [`Value`] storage aligned to it.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReshapeError, ReshapeResult};

/// Ordered list of column names describing the shape of every row.
///
/// By convention the first column is the index/category column and the remaining columns are
/// named series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered column names.
    pub columns: Vec<String>,
}

impl Schema {
    /// Create a new schema from column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.as_str())
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

static NULL_VALUE: Value = Value::Null;

/// A single cell value.
///
/// `Null` stands for a missing/undefined cell. With serde the variants map to JSON `null`, a
/// number and a string respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/undefined value.
    Null,
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl Value {
    /// Classify raw text as either a number or text.
    ///
    /// Returns [`Value::Number`] when the trimmed text is a numeric literal (decimal with optional
    /// sign/fraction/exponent, `0x`/`0o`/`0b` integers, or `Infinity`), otherwise
    /// [`Value::Text`] holding `raw` unchanged. Empty and whitespace-only input stays text.
    ///
    /// ```
    /// use tabular_reshaper::types::Value;
    ///
    /// assert_eq!(Value::classify("5"), Value::Number(5.0));
    /// assert_eq!(Value::classify(" 2.5e1 "), Value::Number(25.0));
    /// assert_eq!(Value::classify("5a"), Value::Text("5a".to_string()));
    /// assert_eq!(Value::classify(""), Value::Text(String::new()));
    /// ```
    pub fn classify(raw: &str) -> Value {
        match parse_numeric(raw) {
            Some(n) => Value::Number(n),
            None => Value::Text(raw.to_owned()),
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Loose numeric view of the value.
    ///
    /// Numbers are returned as-is, numeric-looking text is parsed, everything else is `None`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_numeric(s),
            Value::Null => None,
        }
    }

    /// Loose equality: numeric-looking values compare as numbers.
    ///
    /// `Null` only equals `Null`, and `NaN` never equals anything.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Number(n), Value::Text(s)) | (Value::Text(s), Value::Number(n)) => {
                parse_numeric(s).is_some_and(|parsed| parsed == *n)
            }
        }
    }

    /// Display form used for lexicographic ordering and identity keys.
    ///
    /// Integral numbers print without a fractional part; `Null` prints as an empty string.
    pub fn display_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Comparison mode for a set of values under natural ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaturalOrder {
    /// Every non-null value has a numeric view.
    Numeric,
    /// At least one non-null value is non-numeric text.
    Lexicographic,
}

impl NaturalOrder {
    /// Decide the ordering mode for `values`, ignoring nulls.
    pub fn detect<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let all_numeric = values
            .into_iter()
            .filter(|v| !v.is_null())
            .all(|v| v.to_number().is_some());
        if all_numeric {
            NaturalOrder::Numeric
        } else {
            NaturalOrder::Lexicographic
        }
    }

    /// Compare two values; nulls sort after everything else.
    pub fn compare(self, a: &Value, b: &Value) -> Ordering {
        match (a.is_null(), b.is_null()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        match self {
            NaturalOrder::Numeric => {
                let x = a.to_number().unwrap_or(f64::NAN);
                let y = b.to_number().unwrap_or(f64::NAN);
                x.partial_cmp(&y)
                    .unwrap_or_else(|| x.is_nan().cmp(&y.is_nan()))
            }
            NaturalOrder::Lexicographic => a.display_text().cmp(&b.display_text()),
        }
    }
}

/// Hashable identity of a [`Value`], used for grouping and de-duplication.
///
/// Non-null values are keyed by their display form, so `1` and `"1"` share a key, as do `-0`
/// and `0`. `Null` keeps its own key and never merges with empty text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Null,
    Shown(String),
}

impl ValueKey {
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKey::Null,
            other => ValueKey::Shown(other.display_text()),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (`row`, `column`), or [`Value::Null`] when either is out of range.
    pub fn cell(&self, row: usize, column: usize) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_VALUE)
    }

    /// Iterate the values of `column` in row order.
    ///
    /// Yields one item per row; rows without the column (or an unknown column) yield
    /// [`Value::Null`].
    pub fn column_iter<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let idx = self.schema.index_of(column);
        (0..self.rows.len()).map(move |row| match idx {
            Some(col) => self.cell(row, col),
            None => &NULL_VALUE,
        })
    }

    /// Fail with [`ReshapeError::MissingColumn`] if any of `columns` is absent from the schema.
    pub fn require_columns(&self, columns: &[&str]) -> ReshapeResult<()> {
        match columns.iter().find(|c| self.schema.index_of(c).is_none()) {
            Some(missing) => Err(ReshapeError::MissingColumn {
                column: (*missing).to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema column count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Replace every numeric-looking text cell with its number, in place.
    ///
    /// Each cell is either fully replaced or left untouched; non-numeric cells are skipped.
    /// Callers must not read the dataset concurrently while this runs.
    pub fn coerce_numbers_in_place(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            if let Value::Text(s) = cell {
                if let Some(n) = parse_numeric(s) {
                    *cell = Value::Number(n);
                }
            }
        }
    }
}

/// Parse numeric-looking text; `None` when the text is not a number.
fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(n) = parse_radix_literal(s) {
        return Some(n);
    }

    // `f64::from_str` also accepts words like "inf" and "nan"; only plain literals count here.
    let literal = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if !literal {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u128::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // Normalises -0 to "0".
        "0".to_string()
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, NaturalOrder, Schema, Value};
    use std::cmp::Ordering;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn classify_accepts_numeric_literals() {
        assert_eq!(Value::classify("42"), Value::Number(42.0));
        assert_eq!(Value::classify("-3.5"), Value::Number(-3.5));
        assert_eq!(Value::classify("+.5"), Value::Number(0.5));
        assert_eq!(Value::classify("1e3"), Value::Number(1000.0));
        assert_eq!(Value::classify(" 7 "), Value::Number(7.0));
        assert_eq!(Value::classify("0x1F"), Value::Number(31.0));
        assert_eq!(Value::classify("0b101"), Value::Number(5.0));
        assert_eq!(Value::classify("-Infinity"), Value::Number(f64::NEG_INFINITY));
    }

    #[test]
    fn classify_keeps_non_numeric_text() {
        for raw in ["", "   ", "5a", "NaN", "inf", "abc", "1.2.3", "0x", "0xZZ", "e5"] {
            assert_eq!(Value::classify(raw), text(raw), "raw={raw:?}");
        }
    }

    #[test]
    fn loose_eq_compares_numeric_text_as_numbers() {
        assert!(Value::Number(5.0).loose_eq(&text("5")));
        assert!(text("5.0").loose_eq(&Value::Number(5.0)));
        assert!(!text("5.0").loose_eq(&text("5")));
        assert!(!Value::Number(5.0).loose_eq(&text("five")));
        assert!(Value::Null.loose_eq(&Value::Null));
        assert!(!Value::Null.loose_eq(&text("")));
        assert!(!Value::Number(f64::NAN).loose_eq(&Value::Number(f64::NAN)));
    }

    #[test]
    fn display_text_drops_integral_fraction() {
        assert_eq!(Value::Number(3.0).display_text(), "3");
        assert_eq!(Value::Number(-0.0).display_text(), "0");
        assert_eq!(Value::Number(2.5).display_text(), "2.5");
        assert_eq!(Value::Null.display_text(), "");
    }

    #[test]
    fn natural_order_detects_mode_ignoring_nulls() {
        let numeric = [Value::Number(1.0), text("2"), Value::Null];
        assert_eq!(NaturalOrder::detect(&numeric), NaturalOrder::Numeric);

        let mixed = [Value::Number(10.0), text("b")];
        assert_eq!(NaturalOrder::detect(&mixed), NaturalOrder::Lexicographic);
    }

    #[test]
    fn natural_order_sorts_nulls_last() {
        let order = NaturalOrder::Numeric;
        assert_eq!(order.compare(&Value::Null, &Value::Number(1.0)), Ordering::Greater);
        assert_eq!(order.compare(&Value::Number(1.0), &Value::Null), Ordering::Less);
        assert_eq!(order.compare(&text("10"), &Value::Number(9.0)), Ordering::Greater);
        assert_eq!(
            NaturalOrder::Lexicographic.compare(&text("10"), &Value::Number(9.0)),
            Ordering::Less
        );
    }

    #[test]
    fn cell_and_column_iter_read_missing_as_null() {
        let ds = DataSet::new(
            Schema::new(["a", "b"]),
            vec![vec![Value::Number(1.0), text("x")], vec![Value::Number(2.0)]],
        );
        assert_eq!(ds.cell(1, 1), &Value::Null);
        assert_eq!(ds.cell(9, 0), &Value::Null);

        let b: Vec<_> = ds.column_iter("b").cloned().collect();
        assert_eq!(b, vec![text("x"), Value::Null]);

        let missing: Vec<_> = ds.column_iter("nope").cloned().collect();
        assert_eq!(missing, vec![Value::Null, Value::Null]);
    }

    #[test]
    fn require_columns_reports_first_missing() {
        let ds = DataSet::new(Schema::new(["a"]), vec![]);
        assert!(ds.require_columns(&["a"]).is_ok());
        let err = ds.require_columns(&["a", "b", "c"]).unwrap_err();
        assert_eq!(err.to_string(), "missing column 'b'");
    }

    #[test]
    fn coerce_numbers_in_place_is_per_cell() {
        let mut ds = DataSet::new(
            Schema::new(["x", "y"]),
            vec![vec![text("5"), text("")], vec![text("5a"), Value::Null]],
        );
        ds.coerce_numbers_in_place();
        assert_eq!(
            ds.rows,
            vec![
                vec![Value::Number(5.0), text("")],
                vec![text("5a"), Value::Null],
            ]
        );
    }

    #[test]
    fn value_serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::Null, Value::Number(1.5), text("a")]).unwrap();
        assert_eq!(json, r#"[null,1.5,"a"]"#);
    }
}
