use std::fmt;
use std::ops::{Add, Index};

use thiserror::Error;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a frame column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Ordered and hashable so cells can live in `BTreeMap` / `BTreeSet`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so CellValue can live in ordered collections --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for numeric work.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// -- Conversions so frame literals read naturally --

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Integer(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Cell arithmetic for derived columns: integer + integer stays integer,
/// any numeric mix widens to float, everything else is `Null`.
impl Add for &CellValue {
    type Output = CellValue;

    fn add(self, rhs: &CellValue) -> CellValue {
        match (self, rhs) {
            (CellValue::Integer(a), CellValue::Integer(b)) => CellValue::Integer(a + b),
            _ => match (self.as_f64(), rhs.as_f64()) {
                (Some(a), Some(b)) => CellValue::Float(a + b),
                _ => CellValue::Null,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Frame – an in-memory table with named columns
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("row {row} has {got} cells but the frame has {expected} columns")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("column '{column}' has {got} values but the frame has {expected} rows")]
    LengthMismatch {
        column: String,
        got: usize,
        expected: usize,
    },

    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    #[error("frame has no rows")]
    EmptyFrame,
}

/// A small row-major table: named columns, dynamically-typed cells.
#[derive(Debug, Clone)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Frame {
    /// Build a frame from column names and row-major cells.
    /// Every row must have exactly one cell per column.
    pub fn new<S: Into<String>>(
        columns: Vec<S>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, FrameError> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(FrameError::RaggedRow {
                    row: i,
                    got: row.len(),
                    expected: columns.len(),
                });
            }
        }
        Ok(Frame { columns, rows })
    }

    /// Column names, in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Borrow a row as a name-aware view.
    pub fn row(&self, idx: usize) -> RowRef<'_> {
        RowRef {
            columns: &self.columns,
            cells: &self.rows[idx],
        }
    }

    /// Iterate rows as name-aware views.
    pub fn iter_rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|cells| RowRef {
            columns: &self.columns,
            cells,
        })
    }

    fn column_index(&self, name: &str) -> Result<usize, FrameError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Borrow one column's cells, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&CellValue>, FrameError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Extract one column as `f64`s. Fails on the first non-numeric cell.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, FrameError> {
        self.column(name)?
            .into_iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| FrameError::NonNumericColumn(name.to_string()))
            })
            .collect()
    }

    /// Append a pre-computed column. The value count must match the row count.
    pub fn with_column<S: Into<String>>(
        &self,
        name: S,
        values: Vec<CellValue>,
    ) -> Result<Frame, FrameError> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(FrameError::LengthMismatch {
                column: name,
                got: values.len(),
                expected: self.rows.len(),
            });
        }
        let mut columns = self.columns.clone();
        columns.push(name);
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, v)| {
                let mut row = row.clone();
                row.push(v);
                row
            })
            .collect();
        Ok(Frame { columns, rows })
    }

    /// Append a column computed per row, e.g. `frame.derive("D", |r| &r["A"] + &r["B"])`.
    pub fn derive<S, F>(&self, name: S, f: F) -> Result<Frame, FrameError>
    where
        S: Into<String>,
        F: Fn(&RowRef<'_>) -> CellValue,
    {
        let values = self.iter_rows().map(|row| f(&row)).collect();
        self.with_column(name, values)
    }

    /// Keep only the rows at the given indices, in the given order.
    pub fn take(&self, indices: &[usize]) -> Frame {
        Frame {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Render up to `limit` rows as an ASCII table with `+---+` borders
    /// and right-aligned cells.
    pub fn render(&self, limit: Option<usize>) -> String {
        let shown = limit.unwrap_or(self.rows.len()).min(self.rows.len());

        // Column widths: header vs. widest shown cell.
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in self.rows.iter().take(shown) {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.to_string().len());
            }
        }

        let border: String = {
            let mut s = String::from("+");
            for w in &widths {
                s.push_str(&"-".repeat(*w));
                s.push('+');
            }
            s.push('\n');
            s
        };

        let mut out = String::new();
        out.push_str(&border);
        out.push('|');
        for (w, name) in widths.iter().zip(&self.columns) {
            out.push_str(&format!("{name:>w$}|", w = *w));
        }
        out.push('\n');
        out.push_str(&border);
        for row in self.rows.iter().take(shown) {
            out.push('|');
            for (w, cell) in widths.iter().zip(row) {
                out.push_str(&format!("{:>w$}|", cell.to_string(), w = *w));
            }
            out.push('\n');
        }
        out.push_str(&border);
        if shown < self.rows.len() {
            out.push_str(&format!("showing {shown} of {} rows\n", self.rows.len()));
        }
        out
    }

    /// Print the table preview to stdout.
    pub fn show(&self, limit: Option<usize>) {
        print!("{}", self.render(limit));
    }
}

// ---------------------------------------------------------------------------
// RowRef – a borrowed row with column-name lookup
// ---------------------------------------------------------------------------

/// A borrowed view of one frame row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> RowRef<'a> {
    /// Look up a cell by column name.
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        Some(&self.cells[idx])
    }

    /// All cells in column order.
    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }
}

impl<'a> Index<&str> for RowRef<'a> {
    type Output = CellValue;

    fn index(&self, column: &str) -> &CellValue {
        self.get(column)
            .unwrap_or_else(|| panic!("no column named '{column}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Frame {
        Frame::new(
            vec!["Name", "Age"],
            vec![
                vec!["Alice".into(), 25.into()],
                vec!["Bob".into(), 30.into()],
                vec!["Charlie".into(), 35.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Frame::new(
            vec!["A", "B"],
            vec![vec![1.into(), 2.into()], vec![3.into()]],
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn renders_spark_style_table() {
        let frame = people();
        let expected = "\
+-------+---+
|   Name|Age|
+-------+---+
|  Alice| 25|
|    Bob| 30|
|Charlie| 35|
+-------+---+
";
        assert_eq!(frame.render(None), expected);
    }

    #[test]
    fn render_limit_notes_hidden_rows() {
        let out = people().render(Some(2));
        assert!(out.contains("Bob"));
        assert!(!out.contains("Charlie"));
        assert!(out.contains("showing 2 of 3 rows"));
    }

    #[test]
    fn derive_adds_elementwise_sum() {
        let frame = Frame::new(
            vec!["A", "B"],
            vec![vec![1.into(), 10.into()], vec![2.into(), 20.into()]],
        )
        .unwrap();
        let frame = frame.derive("D", |row| &row["A"] + &row["B"]).unwrap();
        assert_eq!(frame.columns(), &["A", "B", "D"]);
        assert_eq!(frame.row(0)["D"], CellValue::Integer(11));
        assert_eq!(frame.row(1)["D"], CellValue::Integer(22));
    }

    #[test]
    fn with_column_checks_length() {
        let err = people().with_column("X", vec![1.into()]).unwrap_err();
        assert!(matches!(err, FrameError::LengthMismatch { .. }));
    }

    #[test]
    fn numeric_column_rejects_strings() {
        let frame = people();
        assert!(frame.numeric_column("Age").is_ok());
        assert!(matches!(
            frame.numeric_column("Name").unwrap_err(),
            FrameError::NonNumericColumn(_)
        ));
    }

    #[test]
    fn cell_add_widens_to_float() {
        let sum = &CellValue::Integer(1) + &CellValue::Float(0.5);
        assert_eq!(sum, CellValue::Float(1.5));
        let bad = &CellValue::String("a".into()) + &CellValue::Integer(1);
        assert_eq!(bad, CellValue::Null);
    }
}
