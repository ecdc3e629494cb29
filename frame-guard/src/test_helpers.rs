//! Table builders shared by unit tests.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};

use crate::table::Table;
use crate::value::Label;

/// An `Int64` column.
pub fn int_column(values: Vec<Option<i64>>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

/// A `Float64` column.
pub fn float_column(values: Vec<Option<f64>>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}

/// A `Utf8` column.
pub fn string_column(values: Vec<Option<&str>>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

/// A table with the default integer index.
pub fn table_of(columns: Vec<(&str, ArrayRef)>) -> Table {
    Table::try_new(columns).unwrap()
}

/// A table with an explicit text label index.
pub fn table_with_index(labels: Vec<&str>, columns: Vec<(&str, ArrayRef)>) -> Table {
    let index = labels.into_iter().map(Label::from).collect();
    Table::try_with_index(index, columns).unwrap()
}
