//! Functional-dependency (one-to-many) integrity check.

use std::collections::HashMap;

use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;
use crate::value::CellValue;

/// Asserts a strict functional dependency between two columns: every distinct
/// value of `many_column` must associate with exactly one distinct value of
/// `unit_column`, over deduplicated (many, unit) pairs.
///
/// A retail store has distinct departments, each with several employees; if
/// an employee works in a single department, the employee-to-department
/// relationship is one-to-many and this check holds. Fails on the first
/// `many_column` value (in row order) that maps to more than one unit,
/// reporting the value and all of its associations.
pub fn one_to_many<'a>(
    table: &'a Table,
    unit_column: &str,
    many_column: &str,
) -> Result<&'a Table> {
    let many = table.column(many_column)?;
    let unit = table.column(unit_column)?;

    let mut associations: HashMap<CellValue, Vec<CellValue>> = HashMap::new();
    let mut first_seen: Vec<CellValue> = Vec::new();

    for row in 0..table.num_rows() {
        let many_value = CellValue::from_array(many.as_ref(), many_column, row)?;
        let unit_value = CellValue::from_array(unit.as_ref(), unit_column, row)?;
        let units = associations.entry(many_value.clone()).or_insert_with(|| {
            first_seen.push(many_value);
            Vec::new()
        });
        if !units.contains(&unit_value) {
            units.push(unit_value);
        }
    }

    for many_value in &first_seen {
        let units = &associations[many_value];
        if units.len() > 1 {
            return Err(ValidationFailure::new(
                CheckKind::OneToMany,
                ViolationReport::Dependency {
                    many_column: many_column.to_string(),
                    unit_column: unit_column.to_string(),
                    value: many_value.clone(),
                    units: units.clone(),
                },
            )
            .into());
        }
    }
    Ok(table)
}
