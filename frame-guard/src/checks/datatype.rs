//! Element-type conformance check.

use arrow::datatypes::DataType;

use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;

/// Asserts that columns carry the expected arrow element types.
///
/// Comparison is exact `DataType` equality. Fails on the first mismatching
/// column (in the order given), reporting both type tags.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use arrow::datatypes::DataType;
/// use frame_guard::checks::has_dtypes;
/// use frame_guard::table::Table;
///
/// let table = Table::try_new(vec![
///     ("a", Arc::new(Int64Array::from(vec![1])) as ArrayRef),
/// ])?;
/// has_dtypes(&table, &[("a".to_string(), DataType::Int64)])?;
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
pub fn has_dtypes<'a>(table: &'a Table, items: &[(String, DataType)]) -> Result<&'a Table> {
    for (column, expected) in items {
        let actual = table.dtype(column)?;
        if actual != expected {
            return Err(ValidationFailure::new(
                CheckKind::HasDtypes,
                ViolationReport::Dtype {
                    column: column.clone(),
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                },
            )
            .into());
        }
    }
    Ok(table)
}
