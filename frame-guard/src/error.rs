//! Error types for frame-guard.
//!
//! All check failures share a single taxonomy: [`ValidationFailure`], carrying
//! the identity of the failing check and a structured [`ViolationReport`]
//! payload. Misuse errors (unknown columns, unusable data types) and arrow
//! kernel failures are sibling variants of the [`GuardError`] umbrella.
//!
//! Reports are constructed once, at the point of detection, and never mutated
//! afterwards; they propagate unmodified through any number of stacked guards.

use std::fmt;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::Location;
use crate::table::TableSnapshot;
use crate::value::{CellValue, Label};

/// Result type for guard operations.
pub type Result<T, E = GuardError> = std::result::Result<T, E>;

/// Errors that can occur while running checks or guards.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A check found data that violates its constraint.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// A check was configured with a column the table does not have.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A column's data type cannot be used by the requested check.
    #[error("column '{column}' has unsupported data type {dtype} for this check")]
    UnsupportedType {
        /// The offending column.
        column: String,
        /// Its actual data type.
        dtype: DataType,
    },

    /// A table or mask was constructed from misaligned pieces.
    #[error("length mismatch: {0}")]
    LengthMismatch(String),

    /// A table was constructed with a repeated column name.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// Arrow computation error.
    #[error("arrow computation failed: {0}")]
    Arrow(#[from] ArrowError),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GuardError {
    /// Creates an unknown-column error.
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn(name.into())
    }

    /// Creates an unsupported-type error for the given column.
    pub fn unsupported_type(column: impl Into<String>, dtype: DataType) -> Self {
        Self::UnsupportedType {
            column: column.into(),
            dtype,
        }
    }

    /// Creates a length-mismatch error with the given message.
    pub fn length_mismatch(msg: impl Into<String>) -> Self {
        Self::LengthMismatch(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the validation failure carried by this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

/// The identity of a check, attached to every failure it raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    NoneMissing,
    IsMonotonic,
    IsShape,
    UniqueIndex,
    WithinSet,
    WithinRange,
    WithinNStd,
    HasDtypes,
    OneToMany,
    Verify,
    VerifyAll,
    VerifyAny,
}

impl CheckKind {
    /// The check's conventional snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoneMissing => "none_missing",
            Self::IsMonotonic => "is_monotonic",
            Self::IsShape => "is_shape",
            Self::UniqueIndex => "unique_index",
            Self::WithinSet => "within_set",
            Self::WithinRange => "within_range",
            Self::WithinNStd => "within_n_std",
            Self::HasDtypes => "has_dtypes",
            Self::OneToMany => "one_to_many",
            Self::Verify => "verify",
            Self::VerifyAll => "verify_all",
            Self::VerifyAny => "verify_any",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raised check failure: which check failed and what it found.
///
/// Immutable after construction; the payload is built in full at the failure
/// site.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{kind} check failed: {report}")]
pub struct ValidationFailure {
    kind: CheckKind,
    report: ViolationReport,
}

impl ValidationFailure {
    /// Creates a failure for the given check with its violation payload.
    pub fn new(kind: CheckKind, report: ViolationReport) -> Self {
        Self { kind, report }
    }

    /// The check that raised this failure.
    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    /// The structured violation payload.
    pub fn report(&self) -> &ViolationReport {
        &self.report
    }
}

/// Machine-usable description of what a check found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReport {
    /// Explicit (row, column) cell locations, in column-major order.
    Locations(Vec<Location>),

    /// Offending raw values in one column, with their row labels.
    Values {
        /// The violating column.
        column: String,
        /// (row label, value) pairs outside the allowed set.
        offending: Vec<(Label, CellValue)>,
    },

    /// Duplicate row index labels, each listed once in first-occurrence order.
    Duplicates(Vec<Label>),

    /// A functional-dependency key associated with more than one value.
    Dependency {
        /// The column whose values must map to a single unit each.
        many_column: String,
        /// The column holding the dependent unit values.
        unit_column: String,
        /// The offending key.
        value: CellValue,
        /// Every distinct unit it maps to.
        units: Vec<CellValue>,
    },

    /// Expected vs. actual table dimensions. `None` marks a wildcard.
    Shape {
        /// Expected row count, if checked.
        expected_rows: Option<usize>,
        /// Expected column count, if checked.
        expected_columns: Option<usize>,
        /// The table's actual (rows, columns).
        actual: (usize, usize),
    },

    /// A column whose element type disagrees with the expectation.
    Dtype {
        /// The mismatching column.
        column: String,
        /// The expected type tag.
        expected: String,
        /// The actual type tag.
        actual: String,
    },

    /// A user-supplied predicate that did not hold.
    Predicate {
        /// The predicate's name as supplied by the caller.
        name: String,
        /// Snapshot of the table the predicate rejected, for whole-table
        /// failures; absent when `failing` carries per-entry locations.
        table: Option<TableSnapshot>,
        /// Locations of the failing entries, when the predicate produced a
        /// per-entry mask; empty for whole-table failures.
        failing: Vec<Location>,
    },
}

/// How many items a report renders before truncating its display. The
/// underlying payload is never truncated.
const DISPLAY_LIMIT: usize = 10;

fn write_truncated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().take(DISPLAY_LIMIT).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    if items.len() > DISPLAY_LIMIT {
        write!(f, " and {} more", items.len() - DISPLAY_LIMIT)?;
    }
    Ok(())
}

fn dim(expected: &Option<usize>) -> String {
    match expected {
        Some(n) => n.to_string(),
        None => "*".to_string(),
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locations(locations) => {
                write!(f, "{} invalid cell(s): ", locations.len())?;
                write_truncated(f, locations)
            }
            Self::Values { column, offending } => {
                write!(
                    f,
                    "column '{column}' has {} value(s) outside the allowed set: ",
                    offending.len()
                )?;
                let rendered: Vec<String> = offending
                    .iter()
                    .map(|(label, value)| format!("{label}={value}"))
                    .collect();
                write_truncated(f, &rendered)
            }
            Self::Duplicates(labels) => {
                f.write_str("duplicate index labels: ")?;
                write_truncated(f, labels)
            }
            Self::Dependency {
                many_column,
                unit_column,
                value,
                units,
            } => {
                write!(
                    f,
                    "value {value} in '{many_column}' maps to {} distinct '{unit_column}' values: ",
                    units.len()
                )?;
                write_truncated(f, units)
            }
            Self::Shape {
                expected_rows,
                expected_columns,
                actual,
            } => {
                write!(
                    f,
                    "expected shape ({}, {}), got ({}, {})",
                    dim(expected_rows),
                    dim(expected_columns),
                    actual.0,
                    actual.1
                )
            }
            Self::Dtype {
                column,
                expected,
                actual,
            } => {
                write!(f, "column '{column}' expected dtype {expected}, got {actual}")
            }
            Self::Predicate {
                name,
                table,
                failing,
            } => {
                if failing.is_empty() {
                    match table {
                        Some(snapshot) => write!(
                            f,
                            "predicate '{name}' is not true for a table of {} row(s)",
                            snapshot.num_rows()
                        ),
                        None => write!(f, "predicate '{name}' is not true"),
                    }
                } else {
                    write!(
                        f,
                        "predicate '{name}' not true for {} entr(ies): ",
                        failing.len()
                    )?;
                    write_truncated(f, failing)
                }
            }
        }
    }
}
