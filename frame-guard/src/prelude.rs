//! Prelude for commonly used types and functions in frame-guard.

pub use crate::checks::{
    has_dtypes, is_monotonic, is_shape, none_missing, one_to_many, unique_index, within_n_std,
    within_range, within_set, Bounds, Dim, MonotonicOptions, Shape,
};
pub use crate::diagnostics::{locate_failures, Location, Mask};
pub use crate::error::{CheckKind, GuardError, Result, ValidationFailure, ViolationReport};
pub use crate::guard::{CheckSpec, Guard, MaskPredicate, TablePredicate};
pub use crate::table::{Table, TableSnapshot};
pub use crate::value::{CellValue, Label};
pub use crate::verify::{verify, verify_all, verify_any};
