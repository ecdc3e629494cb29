//! Built-in check implementations.
//!
//! Each check is a stateless predicate over a [`Table`](crate::table::Table):
//! it takes the table first, check-specific parameters after, returns the
//! same table reference on success, and raises a structured
//! [`ValidationFailure`](crate::error::ValidationFailure) on violation. Every
//! check is independently callable; none depends on the guard protocol.
//!
//! | Check | Constraint |
//! |---|---|
//! | [`none_missing`] | no missing values in the selected columns |
//! | [`is_monotonic`] | columns ordered by index, per [`MonotonicOptions`] |
//! | [`is_shape`] | (rows, columns) match, with wildcard dimensions |
//! | [`unique_index`] | no duplicate row index labels |
//! | [`within_set`] | column values drawn from allowed sets |
//! | [`within_range`] | column values inside inclusive [`Bounds`] |
//! | [`within_n_std`] | values strictly within n standard deviations of the column mean |
//! | [`has_dtypes`] | columns carry the expected element types |
//! | [`one_to_many`] | strict functional dependency between two columns |
//!
//! For domain logic the table above does not cover, see the generic
//! primitives in [`verify`](crate::verify).

pub mod bounds;
pub mod completeness;
pub mod datatype;
pub mod dependency;
pub mod membership;
pub mod monotonic;
pub mod shape;
pub mod statistics;
pub mod uniqueness;

pub use bounds::{within_range, Bounds};
pub use completeness::none_missing;
pub use datatype::has_dtypes;
pub use dependency::one_to_many;
pub use membership::within_set;
pub use monotonic::{is_monotonic, MonotonicOptions};
pub use shape::{is_shape, Dim, Shape};
pub use statistics::within_n_std;
pub use uniqueness::unique_index;
