//! Shape check with wildcard dimensions.

use serde::Serialize;

use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;

/// One dimension of an expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dim {
    /// Wildcard; this dimension is not checked.
    Any,
    /// The dimension must equal this count.
    Exactly(usize),
}

impl Dim {
    fn matches(self, actual: usize) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(expected) => expected == actual,
        }
    }

    /// The expected count, or `None` for a wildcard.
    pub fn expectation(self) -> Option<usize> {
        match self {
            Self::Any => None,
            Self::Exactly(expected) => Some(expected),
        }
    }
}

impl From<usize> for Dim {
    fn from(value: usize) -> Self {
        Self::Exactly(value)
    }
}

impl From<i64> for Dim {
    fn from(value: i64) -> Self {
        if value < 0 {
            Self::Any
        } else {
            Self::Exactly(value as usize)
        }
    }
}

impl From<i32> for Dim {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl From<Option<usize>> for Dim {
    fn from(value: Option<usize>) -> Self {
        match value {
            Some(expected) => Self::Exactly(expected),
            None => Self::Any,
        }
    }
}

/// An expected (rows, columns) shape. Either dimension may be a wildcard,
/// spelled `Dim::Any`, a negative count, or `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    /// Expected row count.
    pub rows: Dim,
    /// Expected column count.
    pub cols: Dim,
}

impl Shape {
    /// Creates a shape expectation from anything dimension-like.
    pub fn new(rows: impl Into<Dim>, cols: impl Into<Dim>) -> Self {
        Self {
            rows: rows.into(),
            cols: cols.into(),
        }
    }
}

impl<R: Into<Dim>, C: Into<Dim>> From<(R, C)> for Shape {
    fn from((rows, cols): (R, C)) -> Self {
        Self::new(rows, cols)
    }
}

/// Asserts that the table has the expected shape.
///
/// Wildcards skip a dimension: `(-1, 2)` and `(None, Some(2))` both check
/// only the column count, and behave identically to `(rows, 2)` whenever the
/// table has `rows` rows. The failure report carries both the expected and
/// the actual dimensions.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use frame_guard::checks::is_shape;
/// use frame_guard::table::Table;
///
/// let table = Table::try_new(vec![
///     ("a", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
/// ])?;
/// is_shape(&table, (3usize, 1usize))?;
/// is_shape(&table, (-1, 1))?;
/// is_shape(&table, (None, Some(1)))?;
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
pub fn is_shape<'a>(table: &'a Table, shape: impl Into<Shape>) -> Result<&'a Table> {
    let shape = shape.into();
    let (rows, cols) = table.shape();
    if shape.rows.matches(rows) && shape.cols.matches(cols) {
        return Ok(table);
    }
    Err(ValidationFailure::new(
        CheckKind::IsShape,
        ViolationReport::Shape {
            expected_rows: shape.rows.expectation(),
            expected_columns: shape.cols.expectation(),
            actual: (rows, cols),
        },
    )
    .into())
}
