//! Statistical outlier check.

use arrow::array::BooleanArray;
use tracing::debug;

use crate::diagnostics::{locate_failures, Mask};
use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;

/// Asserts that every value lies strictly within `n` standard deviations of
/// its column's mean.
///
/// Runs over every numeric column; non-numeric columns are skipped. Mean and
/// standard deviation are the sample statistics (ddof = 1) over the non-null
/// values, so columns with fewer than two non-null values are skipped too.
/// A value passes iff `|v - mean| < n * std`; null cells never satisfy that
/// inequality and are reported. The whole table is one failure surface: a
/// single raised error lists violations across every column.
pub fn within_n_std(table: &Table, n: f64) -> Result<&Table> {
    let mut mask_columns = Vec::new();
    for (name, array) in table.columns() {
        if !array.data_type().is_numeric() {
            continue;
        }
        let values = table.numeric(name)?;
        let non_null: Vec<f64> = values.iter().flatten().collect();
        if non_null.len() < 2 {
            continue;
        }

        let mean = non_null.iter().sum::<f64>() / non_null.len() as f64;
        let variance = non_null
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / (non_null.len() - 1) as f64;
        let std = variance.sqrt();

        let out_of_bounds: BooleanArray = values
            .iter()
            .map(|value| {
                Some(match value {
                    Some(value) => (value - mean).abs() >= n * std,
                    None => true,
                })
            })
            .collect();
        mask_columns.push((name.to_string(), out_of_bounds));
    }

    let mask = Mask::new(table.shared_index(), mask_columns)?;
    if mask.any() {
        let locations = locate_failures(&mask);
        debug!(check = %CheckKind::WithinNStd, outliers = locations.len(), "statistical outliers found");
        return Err(ValidationFailure::new(
            CheckKind::WithinNStd,
            ViolationReport::Locations(locations),
        )
        .into());
    }
    Ok(table)
}
