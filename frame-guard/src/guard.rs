//! Check specifications and the guard protocol.
//!
//! A [`CheckSpec`] is the immutable configuration of one check instance: its
//! kind plus its parameters, constructed once and never mutated. A [`Guard`]
//! binds exactly one specification and exposes the two invocation shapes of
//! the protocol as distinct entry points:
//!
//! - **direct mode**: [`Guard::validate`] runs the bound check against a
//!   table right now, handing the same reference back on success;
//! - **wrapping mode**: [`Guard::wrap`] decorates a pipeline stage so every
//!   invocation validates the stage's output (and, with
//!   [`Guard::with_input_check`], its input) before the caller ever observes
//!   it. The result is returned untouched.
//!
//! Wrapped stages keep the `Fn(Table) -> Result<Table, E>` shape, so guards
//! stack: each guard wraps the stage produced by the guards already applied,
//! the innermost check runs first, and all of them observe the same final
//! value since none may alter it.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array};
//! use frame_guard::guard::CheckSpec;
//! use frame_guard::table::Table;
//!
//! # fn main() -> Result<(), frame_guard::error::GuardError> {
//! let guard = CheckSpec::within_range(vec![("ph", (0.0, 14.0))]).guard();
//!
//! // Wrapping mode: the stage is validated on every call.
//! let neutralize = guard.wrap_fn(|table: Table| table);
//!
//! let table = Table::try_new(vec![
//!     ("ph", Arc::new(Float64Array::from(vec![6.9, 7.0, 7.2])) as ArrayRef),
//! ])?;
//! let result = neutralize(table)?;
//!
//! // Direct mode: validate immediately.
//! guard.validate(&result)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use arrow::datatypes::DataType;
use tracing::{debug, instrument, warn};

use crate::checks::{self, Bounds, MonotonicOptions, Shape};
use crate::diagnostics::Mask;
use crate::error::{CheckKind, GuardError, Result};
use crate::table::Table;
use crate::value::CellValue;
use crate::verify;

/// A user predicate returning a single pass/fail verdict.
pub type TablePredicate = Arc<dyn Fn(&Table) -> bool + Send + Sync>;

/// A user predicate returning a per-entry pass mask.
pub type MaskPredicate = Arc<dyn Fn(&Table) -> Result<Mask> + Send + Sync>;

/// Immutable configuration for one check instance.
///
/// Specifications are cheap to clone and safe to share across threads;
/// predicates are held behind `Arc`.
#[derive(Clone)]
pub enum CheckSpec {
    /// See [`checks::none_missing`].
    NoneMissing {
        /// Columns to check; `None` means every column.
        columns: Option<Vec<String>>,
    },
    /// See [`checks::is_monotonic`].
    Monotonic {
        /// Per-column overrides; `None` applies `default` everywhere.
        items: Option<Vec<(String, MonotonicOptions)>>,
        /// Options applied when `items` is `None`.
        default: MonotonicOptions,
    },
    /// See [`checks::is_shape`].
    Shape(Shape),
    /// See [`checks::unique_index`].
    UniqueIndex,
    /// See [`checks::within_set`].
    WithinSet {
        /// Allowed values per column.
        items: Vec<(String, Vec<CellValue>)>,
    },
    /// See [`checks::within_range`].
    WithinRange {
        /// Inclusive bounds per column.
        items: Vec<(String, Bounds)>,
    },
    /// See [`checks::within_n_std`].
    WithinNStd {
        /// Number of standard deviations.
        n: f64,
    },
    /// See [`checks::has_dtypes`].
    HasDtypes {
        /// Expected element type per column.
        items: Vec<(String, DataType)>,
    },
    /// See [`checks::one_to_many`].
    OneToMany {
        /// The column holding the single associated value.
        unit_column: String,
        /// The column whose values must each map to one unit.
        many_column: String,
    },
    /// See [`verify::verify`].
    Verify {
        /// Name carried by failure reports.
        name: String,
        /// The predicate.
        predicate: TablePredicate,
    },
    /// See [`verify::verify_all`].
    VerifyAll {
        /// Name carried by failure reports.
        name: String,
        /// The predicate.
        predicate: MaskPredicate,
    },
    /// See [`verify::verify_any`].
    VerifyAny {
        /// Name carried by failure reports.
        name: String,
        /// The predicate.
        predicate: MaskPredicate,
    },
}

impl CheckSpec {
    /// No missing values anywhere in the table.
    pub fn none_missing() -> Self {
        Self::NoneMissing { columns: None }
    }

    /// No missing values in the given columns.
    pub fn none_missing_in<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::NoneMissing {
            columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }

    /// Every column monotonic per the same options.
    pub fn monotonic(default: MonotonicOptions) -> Self {
        Self::Monotonic {
            items: None,
            default,
        }
    }

    /// Per-column monotonicity options.
    pub fn monotonic_items<S: Into<String>>(
        items: impl IntoIterator<Item = (S, MonotonicOptions)>,
    ) -> Self {
        Self::Monotonic {
            items: Some(
                items
                    .into_iter()
                    .map(|(column, options)| (column.into(), options))
                    .collect(),
            ),
            default: MonotonicOptions::default(),
        }
    }

    /// Expected table shape, with wildcard dimensions.
    pub fn shape(shape: impl Into<Shape>) -> Self {
        Self::Shape(shape.into())
    }

    /// Unique row index labels.
    pub fn unique_index() -> Self {
        Self::UniqueIndex
    }

    /// Column values drawn from allowed sets.
    pub fn within_set<S, V>(items: impl IntoIterator<Item = (S, Vec<V>)>) -> Self
    where
        S: Into<String>,
        V: Into<CellValue>,
    {
        Self::WithinSet {
            items: items
                .into_iter()
                .map(|(column, allowed)| {
                    (column.into(), allowed.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Column values inside inclusive bounds.
    pub fn within_range<S, B>(items: impl IntoIterator<Item = (S, B)>) -> Self
    where
        S: Into<String>,
        B: Into<Bounds>,
    {
        Self::WithinRange {
            items: items
                .into_iter()
                .map(|(column, bounds)| (column.into(), bounds.into()))
                .collect(),
        }
    }

    /// Values strictly within `n` standard deviations of their column mean.
    pub fn within_n_std(n: f64) -> Self {
        Self::WithinNStd { n }
    }

    /// Columns carrying the expected element types.
    pub fn has_dtypes<S: Into<String>>(items: impl IntoIterator<Item = (S, DataType)>) -> Self {
        Self::HasDtypes {
            items: items
                .into_iter()
                .map(|(column, dtype)| (column.into(), dtype))
                .collect(),
        }
    }

    /// Strict functional dependency from `many_column` to `unit_column`.
    pub fn one_to_many(unit_column: impl Into<String>, many_column: impl Into<String>) -> Self {
        Self::OneToMany {
            unit_column: unit_column.into(),
            many_column: many_column.into(),
        }
    }

    /// A named whole-table predicate.
    pub fn verify<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Table) -> bool + Send + Sync + 'static,
    {
        Self::Verify {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// A named per-entry predicate that must hold everywhere.
    pub fn verify_all<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Table) -> Result<Mask> + Send + Sync + 'static,
    {
        Self::VerifyAll {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// A named per-entry predicate that must hold somewhere.
    pub fn verify_any<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Table) -> Result<Mask> + Send + Sync + 'static,
    {
        Self::VerifyAny {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// The identity attached to failures this specification raises.
    pub fn kind(&self) -> CheckKind {
        match self {
            Self::NoneMissing { .. } => CheckKind::NoneMissing,
            Self::Monotonic { .. } => CheckKind::IsMonotonic,
            Self::Shape(_) => CheckKind::IsShape,
            Self::UniqueIndex => CheckKind::UniqueIndex,
            Self::WithinSet { .. } => CheckKind::WithinSet,
            Self::WithinRange { .. } => CheckKind::WithinRange,
            Self::WithinNStd { .. } => CheckKind::WithinNStd,
            Self::HasDtypes { .. } => CheckKind::HasDtypes,
            Self::OneToMany { .. } => CheckKind::OneToMany,
            Self::Verify { .. } => CheckKind::Verify,
            Self::VerifyAll { .. } => CheckKind::VerifyAll,
            Self::VerifyAny { .. } => CheckKind::VerifyAny,
        }
    }

    /// Runs the bound check, passing the table through on success.
    pub fn validate<'a>(&self, table: &'a Table) -> Result<&'a Table> {
        match self {
            Self::NoneMissing { columns } => {
                let selected: Option<Vec<&str>> = columns
                    .as_ref()
                    .map(|columns| columns.iter().map(String::as_str).collect());
                checks::none_missing(table, selected.as_deref())
            }
            Self::Monotonic { items, default } => {
                checks::is_monotonic(table, items.as_deref(), *default)
            }
            Self::Shape(shape) => checks::is_shape(table, *shape),
            Self::UniqueIndex => checks::unique_index(table),
            Self::WithinSet { items } => checks::within_set(table, items),
            Self::WithinRange { items } => checks::within_range(table, items),
            Self::WithinNStd { n } => checks::within_n_std(table, *n),
            Self::HasDtypes { items } => checks::has_dtypes(table, items),
            Self::OneToMany {
                unit_column,
                many_column,
            } => checks::one_to_many(table, unit_column, many_column),
            Self::Verify { name, predicate } => {
                verify::verify(table, name, |table| predicate(table))
            }
            Self::VerifyAll { name, predicate } => {
                verify::verify_all(table, name, |table| predicate(table))
            }
            Self::VerifyAny { name, predicate } => {
                verify::verify_any(table, name, |table| predicate(table))
            }
        }
    }

    /// Obtains a guard bound to this specification.
    pub fn guard(self) -> Guard {
        Guard::new(self)
    }
}

impl fmt::Debug for CheckSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoneMissing { columns } => f
                .debug_struct("NoneMissing")
                .field("columns", columns)
                .finish(),
            Self::Monotonic { items, default } => f
                .debug_struct("Monotonic")
                .field("items", items)
                .field("default", default)
                .finish(),
            Self::Shape(shape) => f.debug_tuple("Shape").field(shape).finish(),
            Self::UniqueIndex => f.write_str("UniqueIndex"),
            Self::WithinSet { items } => {
                f.debug_struct("WithinSet").field("items", items).finish()
            }
            Self::WithinRange { items } => {
                f.debug_struct("WithinRange").field("items", items).finish()
            }
            Self::WithinNStd { n } => f.debug_struct("WithinNStd").field("n", n).finish(),
            Self::HasDtypes { items } => {
                f.debug_struct("HasDtypes").field("items", items).finish()
            }
            Self::OneToMany {
                unit_column,
                many_column,
            } => f
                .debug_struct("OneToMany")
                .field("unit_column", unit_column)
                .field("many_column", many_column)
                .finish(),
            Self::Verify { name, .. } => f
                .debug_struct("Verify")
                .field("name", name)
                .finish_non_exhaustive(),
            Self::VerifyAll { name, .. } => f
                .debug_struct("VerifyAll")
                .field("name", name)
                .finish_non_exhaustive(),
            Self::VerifyAny { name, .. } => f
                .debug_struct("VerifyAny")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

/// A reusable wrapper binding one [`CheckSpec`] to immediate validation or
/// transparent decoration of a pipeline stage.
///
/// Guards are stateless beyond their bound specification: immutable after
/// construction, cheap to clone, and safe to invoke concurrently.
#[derive(Debug, Clone)]
pub struct Guard {
    spec: CheckSpec,
    check_input: bool,
}

impl Guard {
    /// Binds a guard to a specification. Output-only checking by default.
    pub fn new(spec: CheckSpec) -> Self {
        Self {
            spec,
            check_input: false,
        }
    }

    /// Also validates a wrapped stage's input table before the stage runs,
    /// so bad data is rejected before an expensive transformation instead of
    /// after. Off by default; has no effect in direct mode.
    pub fn with_input_check(mut self) -> Self {
        self.check_input = true;
        self
    }

    /// The bound specification.
    pub fn spec(&self) -> &CheckSpec {
        &self.spec
    }

    /// Whether wrapped stages validate their input.
    pub fn checks_input(&self) -> bool {
        self.check_input
    }

    /// Direct mode: runs the bound check now, passing the table through.
    #[instrument(skip(self, table), fields(
        check.kind = %self.spec.kind(),
        table.rows = table.num_rows(),
        table.columns = table.num_columns(),
    ))]
    pub fn validate<'a>(&self, table: &'a Table) -> Result<&'a Table> {
        match self.spec.validate(table) {
            Ok(table) => {
                debug!(result.status = "pass", "check passed");
                Ok(table)
            }
            Err(error) => {
                warn!(result.status = "fail", %error, "check failed");
                Err(error)
            }
        }
    }

    /// Wrapping mode: decorates a fallible stage.
    ///
    /// The returned stage invokes `op`, validates its output (and, when
    /// [`with_input_check`](Self::with_input_check) is set, the input before
    /// `op` runs), and returns the result untouched. Check failures convert
    /// into the stage's error type via `From`; errors raised by `op` itself
    /// propagate unmodified.
    pub fn wrap<F, E>(&self, op: F) -> impl Fn(Table) -> Result<Table, E>
    where
        F: Fn(Table) -> Result<Table, E>,
        E: From<GuardError>,
    {
        let guard = self.clone();
        move |table: Table| {
            if guard.check_input {
                guard.validate(&table)?;
            }
            let result = op(table)?;
            guard.validate(&result)?;
            Ok(result)
        }
    }

    /// Wrapping mode for infallible stages.
    pub fn wrap_fn<F>(&self, op: F) -> impl Fn(Table) -> Result<Table, GuardError>
    where
        F: Fn(Table) -> Table,
    {
        self.wrap(move |table| Ok(op(table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{int_column, table_of};

    #[test]
    fn direct_mode_passes_the_table_through() {
        let table = table_of(vec![("a", int_column(vec![Some(1), Some(2)]))]);
        let guard = CheckSpec::none_missing().guard();
        let returned = guard.validate(&table).unwrap();
        assert!(std::ptr::eq(returned, &table));
    }

    #[test]
    fn spec_validate_equals_calling_the_check_directly() {
        let table = table_of(vec![("a", int_column(vec![Some(1), None]))]);
        let spec = CheckSpec::none_missing();
        let via_spec = spec.validate(&table).unwrap_err();
        let direct = checks::none_missing(&table, None).unwrap_err();
        assert_eq!(
            via_spec.as_validation().unwrap(),
            direct.as_validation().unwrap()
        );
    }

    #[test]
    fn wrapped_stage_validates_output() {
        let guard = CheckSpec::shape((1usize, 1usize)).guard();
        let stage = guard.wrap_fn(|table: Table| table);

        let good = table_of(vec![("a", int_column(vec![Some(1)]))]);
        assert!(stage(good).is_ok());

        let bad = table_of(vec![("a", int_column(vec![Some(1), Some(2)]))]);
        let error = stage(bad).unwrap_err();
        assert_eq!(
            error.as_validation().unwrap().kind(),
            CheckKind::IsShape
        );
    }

    #[test]
    fn input_check_rejects_before_the_stage_runs() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let ran = Arc::new(AtomicBool::new(false));
        let observed = ran.clone();
        let guard = CheckSpec::none_missing().guard().with_input_check();
        let stage = guard.wrap(move |table: Table| {
            observed.store(true, Ordering::SeqCst);
            Ok::<_, GuardError>(table)
        });

        let bad = table_of(vec![("a", int_column(vec![None]))]);
        assert!(stage(bad).is_err());
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[test]
    fn specs_are_shareable_across_threads() {
        let guard = CheckSpec::verify("nonempty", |t: &Table| t.num_rows() > 0).guard();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let guard = guard.clone();
                std::thread::spawn(move || {
                    let table = table_of(vec![("a", int_column(vec![Some(1)]))]);
                    guard.validate(&table).is_ok()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn debug_names_predicates_without_rendering_them() {
        let spec = CheckSpec::verify("nonempty", |t: &Table| t.num_rows() > 0);
        let rendered = format!("{spec:?}");
        assert!(rendered.contains("nonempty"), "{rendered}");
    }
}
