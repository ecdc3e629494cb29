//! Set-membership check.

use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;
use crate::value::CellValue;

/// Asserts that every value in each configured column belongs to its allowed
/// set.
///
/// A null cell passes only if `CellValue::Null` is itself in the allowed set.
/// Fails on the first violating column (in the order given), reporting the
/// offending values with their row labels.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, StringArray};
/// use frame_guard::checks::within_set;
/// use frame_guard::table::Table;
/// use frame_guard::value::CellValue;
///
/// let table = Table::try_new(vec![
///     ("units", Arc::new(StringArray::from(vec!["ug/L", "mg/L"])) as ArrayRef),
/// ])?;
/// let allowed = vec![("units".to_string(), vec![
///     CellValue::from("ug/L"),
///     CellValue::from("mg/L"),
/// ])];
/// within_set(&table, &allowed)?;
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
pub fn within_set<'a>(table: &'a Table, items: &[(String, Vec<CellValue>)]) -> Result<&'a Table> {
    for (column, allowed) in items {
        let array = table.column(column)?;
        let index = table.index();

        let mut offending = Vec::new();
        for row in 0..array.len() {
            let value = CellValue::from_array(array.as_ref(), column, row)?;
            if !allowed.contains(&value) {
                offending.push((index[row].clone(), value));
            }
        }

        if !offending.is_empty() {
            return Err(ValidationFailure::new(
                CheckKind::WithinSet,
                ViolationReport::Values {
                    column: column.clone(),
                    offending,
                },
            )
            .into());
        }
    }
    Ok(table)
}
