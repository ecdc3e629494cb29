//! Missing-value check.

use arrow::compute;
use tracing::debug;

use crate::diagnostics::{locate_failures, Mask};
use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;

/// Asserts that no cell in the selected columns is missing.
///
/// `columns` defaults to every column. On failure the report lists every
/// missing (row, column) cell in column-major order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use frame_guard::checks::none_missing;
/// use frame_guard::table::Table;
///
/// let table = Table::try_new(vec![
///     ("a", Arc::new(Int64Array::from(vec![Some(1), Some(2)])) as ArrayRef),
/// ])?;
/// none_missing(&table, None)?;
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
pub fn none_missing<'a>(table: &'a Table, columns: Option<&[&str]>) -> Result<&'a Table> {
    let selected: Vec<&str> = match columns {
        Some(columns) => columns.to_vec(),
        None => table.column_names().collect(),
    };

    let mut mask_columns = Vec::with_capacity(selected.len());
    for name in selected {
        let array = table.column(name)?;
        let nulls = compute::is_null(array.as_ref())?;
        mask_columns.push((name.to_string(), nulls));
    }

    let mask = Mask::new(table.shared_index(), mask_columns)?;
    if mask.any() {
        let locations = locate_failures(&mask);
        debug!(check = %CheckKind::NoneMissing, missing = locations.len(), "missing values found");
        return Err(ValidationFailure::new(
            CheckKind::NoneMissing,
            ViolationReport::Locations(locations),
        )
        .into());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Location;
    use crate::test_helpers::{int_column, table_of};

    #[test]
    fn passes_and_returns_the_same_table() {
        let table = table_of(vec![("a", int_column(vec![Some(1), Some(2)]))]);
        let returned = none_missing(&table, None).unwrap();
        assert!(std::ptr::eq(returned, &table));
    }

    #[test]
    fn reports_every_missing_cell() {
        let table = table_of(vec![
            ("a", int_column(vec![Some(1), None, None])),
            ("b", int_column(vec![None, Some(2), Some(3)])),
        ]);

        let error = none_missing(&table, None).unwrap_err();
        let failure = error.as_validation().unwrap();
        assert_eq!(failure.kind(), CheckKind::NoneMissing);
        match failure.report() {
            ViolationReport::Locations(locations) => assert_eq!(
                locations,
                &vec![
                    Location::new(1i64, "a"),
                    Location::new(2i64, "a"),
                    Location::new(0i64, "b"),
                ]
            ),
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn column_selection_ignores_other_columns() {
        let table = table_of(vec![
            ("a", int_column(vec![Some(1)])),
            ("b", int_column(vec![None])),
        ]);
        assert!(none_missing(&table, Some(&["a"])).is_ok());
        assert!(none_missing(&table, Some(&["b"])).is_err());
    }
}
