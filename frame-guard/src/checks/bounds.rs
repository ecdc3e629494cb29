//! Range-membership check.

use arrow::array::BooleanArray;

use crate::diagnostics::{locate_failures, Mask};
use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
}

impl Bounds {
    /// Creates inclusive `[lower, upper]` bounds.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}

/// Asserts that every value in each configured column lies within its
/// inclusive bounds.
///
/// Null cells pass; `none_missing` is the check for those. NaN values lie
/// within no bounds and are violations. Fails on the first violating column,
/// reporting the out-of-range rows.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Float64Array};
/// use frame_guard::checks::{within_range, Bounds};
/// use frame_guard::table::Table;
///
/// let table = Table::try_new(vec![
///     ("a", Arc::new(Float64Array::from(vec![0.0, 0.5, 1.0])) as ArrayRef),
/// ])?;
/// within_range(&table, &[("a".to_string(), Bounds::new(0.0, 1.0))])?;
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
pub fn within_range<'a>(table: &'a Table, items: &[(String, Bounds)]) -> Result<&'a Table> {
    for (column, bounds) in items {
        let values = table.numeric(column)?;
        let out_of_range: BooleanArray = values
            .iter()
            .map(|value| Some(matches!(value, Some(value) if !bounds.contains(value))))
            .collect();

        let mask = Mask::single(table.shared_index(), column.clone(), out_of_range)?;
        if mask.any() {
            return Err(ValidationFailure::new(
                CheckKind::WithinRange,
                ViolationReport::Locations(locate_failures(&mask)),
            )
            .into());
        }
    }
    Ok(table)
}
