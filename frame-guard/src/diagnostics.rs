//! Failure masks and precise (row, column) location reporting.
//!
//! Every check's failure path funnels through [`locate_failures`] so reports
//! name exact offending cells instead of a vague "something's wrong". Masks
//! are built at the failure site and consumed immediately; nothing here is
//! retained across calls.

use std::fmt;
use std::sync::Arc;

use arrow::array::BooleanArray;
use serde::Serialize;

use crate::error::{GuardError, Result};
use crate::value::Label;

/// A single offending cell, identified by row label and column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// The row's index label.
    pub row: Label,
    /// The column name.
    pub column: String,
}

impl Location {
    /// Creates a location from a row label and column name.
    pub fn new(row: impl Into<Label>, column: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, '{}')", self.row, self.column)
    }
}

/// A boolean mask over (a subset of) a table's cells.
///
/// `true` marks a cell; null mask entries count as unmarked. The mask shares
/// the table's row index and keeps columns in their declared order.
#[derive(Debug, Clone)]
pub struct Mask {
    index: Arc<[Label]>,
    columns: Vec<(String, BooleanArray)>,
}

impl Mask {
    /// Builds a mask, checking that every column aligns with the index.
    pub fn new(index: Arc<[Label]>, columns: Vec<(String, BooleanArray)>) -> Result<Self> {
        for (name, values) in &columns {
            if values.len() != index.len() {
                return Err(GuardError::length_mismatch(format!(
                    "mask column '{name}' has {} entries for {} index labels",
                    values.len(),
                    index.len()
                )));
            }
        }
        Ok(Self { index, columns })
    }

    /// Builds a mask over a single column.
    pub fn single(
        index: Arc<[Label]>,
        column: impl Into<String>,
        values: BooleanArray,
    ) -> Result<Self> {
        Self::new(index, vec![(column.into(), values)])
    }

    /// The shared row index.
    pub fn index(&self) -> &[Label] {
        &self.index
    }

    /// Columns in declared order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &BooleanArray)> {
        self.columns.iter().map(|(name, values)| (name.as_str(), values))
    }

    /// True if any cell is marked.
    pub fn any(&self) -> bool {
        self.columns
            .iter()
            .any(|(_, values)| values.iter().any(|flag| flag == Some(true)))
    }

    /// True if every cell is marked.
    pub fn all(&self) -> bool {
        self.columns
            .iter()
            .all(|(_, values)| values.iter().all(|flag| flag == Some(true)))
    }

    /// Flips every entry. Null entries flip to marked, so inverting a pass
    /// mask marks exactly the entries that did not pass.
    pub fn invert(&self) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let flipped: BooleanArray =
                    values.iter().map(|flag| Some(flag != Some(true))).collect();
                (name.clone(), flipped)
            })
            .collect();
        Self {
            index: self.index.clone(),
            columns,
        }
    }
}

/// Converts a failure mask into the ordered list of offending cell locations.
///
/// Enumeration is column-major: columns in the mask's declared order, rows in
/// index order within each column.
pub fn locate_failures(mask: &Mask) -> Vec<Location> {
    let mut locations = Vec::new();
    for (name, values) in mask.columns() {
        for (row, flag) in values.iter().enumerate() {
            if flag == Some(true) {
                locations.push(Location {
                    row: mask.index()[row].clone(),
                    column: name.to_string(),
                });
            }
        }
    }
    locations
}
