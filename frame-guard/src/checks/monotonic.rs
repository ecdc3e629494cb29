//! Monotonicity check.

use arrow::array::Array;

use crate::diagnostics::Location;
use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;

/// Direction and strictness for one column's monotonicity requirement.
///
/// `increasing: None` requires the column to be entirely non-decreasing or
/// entirely non-increasing; the whole column must pick one direction, mixed
/// steps fail even if each step is monotone in some direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonotonicOptions {
    /// `Some(true)` for non-decreasing, `Some(false)` for non-increasing,
    /// `None` for either direction (decided per column).
    pub increasing: Option<bool>,
    /// Whether ties between adjacent rows are violations.
    pub strict: bool,
}

impl MonotonicOptions {
    /// Requires the column to be non-decreasing.
    pub fn increasing() -> Self {
        Self {
            increasing: Some(true),
            strict: false,
        }
    }

    /// Requires the column to be non-increasing.
    pub fn decreasing() -> Self {
        Self {
            increasing: Some(false),
            strict: false,
        }
    }

    /// Accepts either direction, as long as the whole column commits to one.
    pub fn any_direction() -> Self {
        Self::default()
    }

    /// Makes ties between adjacent rows violations.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Asserts that columns are monotonic in index order.
///
/// `items` maps columns to per-column options; when `None`, `default` applies
/// to every column in declared order. Deltas are computed between adjacent
/// rows over the numeric view; the first row has no predecessor and is never
/// a violation on its own. A null cell poisons both of its adjacent deltas.
/// Fails on the first violating column.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use frame_guard::checks::{is_monotonic, MonotonicOptions};
/// use frame_guard::table::Table;
///
/// let table = Table::try_new(vec![
///     ("a", Arc::new(Int64Array::from(vec![1, 2, 2])) as ArrayRef),
/// ])?;
/// is_monotonic(&table, None, MonotonicOptions::increasing())?;
/// assert!(is_monotonic(&table, None, MonotonicOptions::increasing().strict()).is_err());
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
pub fn is_monotonic<'a>(
    table: &'a Table,
    items: Option<&[(String, MonotonicOptions)]>,
    default: MonotonicOptions,
) -> Result<&'a Table> {
    let all_columns: Vec<(String, MonotonicOptions)>;
    let items = match items {
        Some(items) => items,
        None => {
            all_columns = table
                .column_names()
                .map(|name| (name.to_string(), default))
                .collect();
            &all_columns
        }
    };

    for (column, options) in items {
        check_column(table, column, *options)?;
    }
    Ok(table)
}

fn check_column(table: &Table, column: &str, options: MonotonicOptions) -> Result<()> {
    let values = table.numeric(column)?;
    if values.len() < 2 {
        return Ok(());
    }

    // delta[i] covers the step from row i to row i + 1; None when either side
    // is missing, which satisfies no direction.
    let deltas: Vec<Option<f64>> = (0..values.len() - 1)
        .map(|i| {
            if values.is_null(i) || values.is_null(i + 1) {
                None
            } else {
                Some(values.value(i + 1) - values.value(i))
            }
        })
        .collect();

    let violations = |upward: bool| -> Vec<usize> {
        deltas
            .iter()
            .enumerate()
            .filter_map(|(i, delta)| {
                let holds = match delta {
                    None => false,
                    Some(delta) => match (upward, options.strict) {
                        (true, true) => *delta > 0.0,
                        (true, false) => *delta >= 0.0,
                        (false, true) => *delta < 0.0,
                        (false, false) => *delta <= 0.0,
                    },
                };
                // report the later row of the offending step
                (!holds).then_some(i + 1)
            })
            .collect()
    };

    let offending = match options.increasing {
        Some(true) => violations(true),
        Some(false) => violations(false),
        None => {
            let upward = violations(true);
            let downward = violations(false);
            if upward.is_empty() || downward.is_empty() {
                Vec::new()
            } else if upward.len() <= downward.len() {
                upward
            } else {
                downward
            }
        }
    };

    if offending.is_empty() {
        return Ok(());
    }

    let index = table.index();
    let locations = offending
        .into_iter()
        .map(|row| Location::new(index[row].clone(), column))
        .collect();
    Err(ValidationFailure::new(CheckKind::IsMonotonic, ViolationReport::Locations(locations)).into())
}
