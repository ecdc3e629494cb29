//! Generic verification primitives.
//!
//! These three higher-order checks lift arbitrary user predicates into the
//! same pass-through-or-fail contract as the built-in library, so callers can
//! validate domain logic without extending it. Closures are anonymous in
//! Rust, so each primitive takes an explicit `name` that failure reports
//! carry in place of a function name.

use crate::diagnostics::{locate_failures, Mask};
use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;

/// Asserts that `predicate(table)` is true.
///
/// The failure report names the predicate and embeds a snapshot of the
/// rejected table, so the offending data stays inspectable even when a
/// wrapped stage has already consumed it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use frame_guard::table::Table;
/// use frame_guard::verify::verify;
///
/// let table = Table::try_new(vec![
///     ("a", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
/// ])?;
/// verify(&table, "has_rows", |t| t.num_rows() > 0)?;
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
pub fn verify<'a, F>(table: &'a Table, name: &str, predicate: F) -> Result<&'a Table>
where
    F: Fn(&Table) -> bool,
{
    if predicate(table) {
        return Ok(table);
    }
    Err(ValidationFailure::new(
        CheckKind::Verify,
        ViolationReport::Predicate {
            name: name.to_string(),
            table: Some(table.snapshot()?),
            failing: Vec::new(),
        },
    )
    .into())
}

/// Asserts that every entry of the mask produced by `predicate` is true.
///
/// The mask marks passing entries; on failure the report locates exactly the
/// entries that did not pass.
pub fn verify_all<'a, F>(table: &'a Table, name: &str, predicate: F) -> Result<&'a Table>
where
    F: Fn(&Table) -> Result<Mask>,
{
    let mask = predicate(table)?;
    if mask.all() {
        return Ok(table);
    }
    let failing = locate_failures(&mask.invert());
    Err(ValidationFailure::new(
        CheckKind::VerifyAll,
        ViolationReport::Predicate {
            name: name.to_string(),
            table: None,
            failing,
        },
    )
    .into())
}

/// Asserts that at least one entry of the mask produced by `predicate` is
/// true.
pub fn verify_any<'a, F>(table: &'a Table, name: &str, predicate: F) -> Result<&'a Table>
where
    F: Fn(&Table) -> Result<Mask>,
{
    let mask = predicate(table)?;
    if mask.any() {
        return Ok(table);
    }
    Err(ValidationFailure::new(
        CheckKind::VerifyAny,
        ViolationReport::Predicate {
            name: name.to_string(),
            table: Some(table.snapshot()?),
            failing: Vec::new(),
        },
    )
    .into())
}
