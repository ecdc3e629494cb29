//! # frame-guard - Defensive checks for tabular pipelines
//!
//! frame-guard is a defensive-programming layer for tabular data pipelines: a
//! library of composable predicate checks over a table (rows x named columns)
//! plus a guard mechanism that wraps a pipeline stage so its output (and
//! optionally its input) is validated transparently on every call.
//!
//! Checks are observers, never transformers: on success a check returns the
//! very table reference it was given; on violation it raises a structured
//! [`ValidationFailure`](error::ValidationFailure) naming the exact offending
//! (row, column) cells, values, or dimensions. Nothing is ever mutated or
//! repaired.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use frame_guard::prelude::*;
//!
//! # fn main() -> Result<(), GuardError> {
//! let table = Table::try_new(vec![
//!     ("station", Arc::new(StringArray::from(vec!["w1", "w2", "w3"])) as ArrayRef),
//!     ("ph", Arc::new(Float64Array::from(vec![6.9, 7.0, 7.4])) as ArrayRef),
//! ])?;
//!
//! // Call checks directly...
//! none_missing(&table, None)?;
//! within_range(&table, &[("ph".to_string(), Bounds::new(0.0, 14.0))])?;
//!
//! // ...or bind a specification to a guard and wrap a pipeline stage.
//! let guard = CheckSpec::within_range(vec![("ph", (0.0, 14.0))]).guard();
//! let stage = guard.wrap_fn(|table: Table| table);
//! let validated = stage(table)?;
//!
//! // Failures carry a machine-usable report.
//! let strict = CheckSpec::within_range(vec![("ph", (7.0, 14.0))]).guard();
//! let error = strict.validate(&validated).unwrap_err();
//! let failure = error.as_validation().unwrap();
//! assert_eq!(failure.kind(), CheckKind::WithinRange);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`checks`]**: the built-in check library, each check independently
//!   callable with the pass-through-or-raise contract
//! - **[`verify`]**: generic verification primitives lifting user predicates
//!   into the same contract
//! - **[`guard`]**: immutable [`CheckSpec`](guard::CheckSpec) values and the
//!   [`Guard`](guard::Guard) protocol (direct validation and transparent
//!   stage decoration)
//! - **[`diagnostics`]**: failure masks and precise (row, column) location
//!   reporting
//! - **[`table`]**: the arrow-backed table carrier
//! - **[`value`]**: row labels and dynamic cell scalars
//! - **[`error`]**: the `GuardError` umbrella and the violation-report
//!   taxonomy
//!
//! The library is fully synchronous and performs no I/O; guards and
//! specifications are immutable after construction and safe to share across
//! threads.

pub mod checks;
pub mod diagnostics;
pub mod error;
pub mod guard;
pub mod prelude;
pub mod table;
pub mod value;
pub mod verify;

#[cfg(test)]
pub mod test_helpers;
