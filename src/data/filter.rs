use std::cmp::Ordering;
use std::fmt;

use super::model::{CellValue, Frame, FrameError};

// ---------------------------------------------------------------------------
// Comparison predicates over frame columns
// ---------------------------------------------------------------------------

/// Comparison operator for a column predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        };
        write!(f, "{s}")
    }
}

/// A single column comparison, e.g. `Age > 30`.
#[derive(Debug, Clone)]
pub struct Predicate {
    pub column: String,
    pub op: CmpOp,
    pub rhs: CellValue,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.rhs)
    }
}

/// Column reference used to build predicates: `col("Age").gt(30)`.
#[derive(Debug, Clone)]
pub struct ColumnRef {
    name: String,
}

/// Start a predicate from a column name.
pub fn col(name: &str) -> ColumnRef {
    ColumnRef {
        name: name.to_string(),
    }
}

impl ColumnRef {
    fn cmp_with<V: Into<CellValue>>(self, op: CmpOp, rhs: V) -> Predicate {
        Predicate {
            column: self.name,
            op,
            rhs: rhs.into(),
        }
    }

    pub fn gt<V: Into<CellValue>>(self, rhs: V) -> Predicate {
        self.cmp_with(CmpOp::Gt, rhs)
    }

    pub fn ge<V: Into<CellValue>>(self, rhs: V) -> Predicate {
        self.cmp_with(CmpOp::Ge, rhs)
    }

    pub fn lt<V: Into<CellValue>>(self, rhs: V) -> Predicate {
        self.cmp_with(CmpOp::Lt, rhs)
    }

    pub fn le<V: Into<CellValue>>(self, rhs: V) -> Predicate {
        self.cmp_with(CmpOp::Le, rhs)
    }

    pub fn eq_value<V: Into<CellValue>>(self, rhs: V) -> Predicate {
        self.cmp_with(CmpOp::Eq, rhs)
    }

    pub fn ne_value<V: Into<CellValue>>(self, rhs: V) -> Predicate {
        self.cmp_with(CmpOp::Ne, rhs)
    }
}

/// Compare two cells when their types admit an ordering.
///
/// Integer and Float compare numerically against each other; strings compare
/// lexically; booleans compare as booleans. `Null` and mismatched types have
/// no ordering.
fn compare(lhs: &CellValue, rhs: &CellValue) -> Option<Ordering> {
    match (lhs, rhs) {
        (CellValue::String(a), CellValue::String(b)) => Some(a.cmp(b)),
        (CellValue::Bool(a), CellValue::Bool(b)) => Some(a.cmp(b)),
        (CellValue::Null, _) | (_, CellValue::Null) => None,
        _ => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(a), Some(b)) => Some(a.total_cmp(&b)),
            _ => None,
        },
    }
}

impl Predicate {
    /// Whether a cell satisfies this predicate.
    ///
    /// Incomparable cells (`Null`, missing, type mismatch) never satisfy a
    /// predicate, `Ne` included.
    pub fn matches(&self, cell: &CellValue) -> bool {
        let Some(ord) = compare(cell, &self.rhs) else {
            return false;
        };
        match self.op {
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::Ge => ord != Ordering::Less,
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::Le => ord != Ordering::Greater,
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::Ne => ord != Ordering::Equal,
        }
    }
}

/// Return indices of rows that pass all predicates.
///
/// A row passes when every predicate's column exists and the row's cell
/// satisfies the comparison.
pub fn filtered_indices(frame: &Frame, predicates: &[Predicate]) -> Result<Vec<usize>, FrameError> {
    // Validate column names up front so a typo fails loudly instead of
    // silently matching nothing.
    for p in predicates {
        if !frame.columns().contains(&p.column) {
            return Err(FrameError::ColumnNotFound(p.column.clone()));
        }
    }

    Ok(frame
        .iter_rows()
        .enumerate()
        .filter(|(_, row)| {
            predicates.iter().all(|p| {
                row.get(&p.column)
                    .map(|cell| p.matches(cell))
                    .unwrap_or(false)
            })
        })
        .map(|(i, _)| i)
        .collect())
}

impl Frame {
    /// Materialize the rows passing all predicates as a new frame.
    pub fn filter(&self, predicates: &[Predicate]) -> Result<Frame, FrameError> {
        let indices = filtered_indices(self, predicates)?;
        Ok(self.take(&indices))
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
    fn age_over_30_keeps_only_charlie() {
        let filtered = people().filter(&[col("Age").gt(30)]).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.row(0)["Name"], CellValue::String("Charlie".into()));
        assert_eq!(filtered.row(0)["Age"], CellValue::Integer(35));
    }

    #[test]
    fn boundary_is_strict() {
        // Bob is exactly 30 and must not pass Age > 30.
        let indices = filtered_indices(&people(), &[col("Age").gt(30)]).unwrap();
        assert_eq!(indices, vec![2]);
        let ge = filtered_indices(&people(), &[col("Age").ge(30)]).unwrap();
        assert_eq!(ge, vec![1, 2]);
    }

    #[test]
    fn predicates_combine_conjunctively() {
        let indices =
            filtered_indices(&people(), &[col("Age").gt(20), col("Age").lt(32)]).unwrap();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn integer_cells_compare_against_float_rhs() {
        let indices = filtered_indices(&people(), &[col("Age").gt(29.5)]).unwrap();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn null_never_satisfies_a_predicate() {
        let frame = Frame::new(
            vec!["Age"],
            vec![vec![CellValue::Null], vec![40.into()]],
        )
        .unwrap();
        for p in [col("Age").gt(0), col("Age").ne_value(40)] {
            let indices = filtered_indices(&frame, &[p]).unwrap();
            assert!(!indices.contains(&0));
        }
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = people().filter(&[col("Height").gt(1)]).unwrap_err();
        assert!(matches!(err, FrameError::ColumnNotFound(_)));
    }

    #[test]
    fn string_predicates_compare_lexically() {
        let indices = filtered_indices(&people(), &[col("Name").eq_value("Bob")]).unwrap();
        assert_eq!(indices, vec![1]);
        let indices = filtered_indices(&people(), &[col("Name").lt("B")]).unwrap();
        assert_eq!(indices, vec![0]);
    }
}
