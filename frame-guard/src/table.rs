//! The arrow-backed table checks observe.
//!
//! [`Table`] is a thin carrier for the capability set checks need: named
//! column access, a label index, shape queries, and a numeric view. It owns
//! arrow arrays (cheaply clonable `ArrayRef`s) but checks never mutate one;
//! every check borrows a table and, on success, hands the same reference
//! back.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::compute;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::error::{GuardError, Result};
use crate::value::{CellValue, Label};

/// An ordered collection of named columns aligned by a shared row index.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use frame_guard::table::Table;
///
/// let table = Table::try_new(vec![
///     ("a", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
/// ])?;
/// assert_eq!(table.shape(), (3, 1));
/// # Ok::<(), frame_guard::error::GuardError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    columns: Vec<ArrayRef>,
    index: Arc<[Label]>,
}

impl Table {
    /// Builds a table with the default integer index `0..n`.
    pub fn try_new<S: Into<String>>(columns: Vec<(S, ArrayRef)>) -> Result<Self> {
        let rows = columns.first().map(|(_, array)| array.len()).unwrap_or(0);
        let index: Vec<Label> = (0..rows as i64).map(Label::Int).collect();
        Self::try_with_index(index, columns)
    }

    /// Builds a table over an explicit label index.
    ///
    /// Labels need not be unique; `unique_index` exists to check exactly
    /// that. Fails if any column's length disagrees with the index or if a
    /// column name repeats.
    pub fn try_with_index<S: Into<String>>(
        index: Vec<Label>,
        columns: Vec<(S, ArrayRef)>,
    ) -> Result<Self> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays = Vec::with_capacity(columns.len());
        for (name, array) in columns {
            let name = name.into();
            if fields.iter().any(|f: &Field| f.name() == &name) {
                return Err(GuardError::DuplicateColumn(name));
            }
            if array.len() != index.len() {
                return Err(GuardError::length_mismatch(format!(
                    "column '{name}' has {} rows for {} index labels",
                    array.len(),
                    index.len()
                )));
            }
            fields.push(Field::new(name.as_str(), array.data_type().clone(), true));
            arrays.push(array);
        }
        Ok(Self {
            schema: Arc::new(Schema::new(fields)),
            columns: arrays,
            index: index.into(),
        })
    }

    /// Wraps a `RecordBatch` with the default integer index.
    pub fn from_record_batch(batch: &RecordBatch) -> Self {
        let index: Arc<[Label]> = (0..batch.num_rows() as i64).map(Label::Int).collect();
        Self {
            schema: batch.schema(),
            columns: batch.columns().to_vec(),
            index,
        }
    }

    /// The table's schema.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    /// Column names in declared order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.schema.fields().iter().map(|field| field.name().as_str())
    }

    /// Columns in declared order, with their names.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ArrayRef)> {
        self.column_names().zip(self.columns.iter())
    }

    /// Looks a column up by name.
    pub fn column(&self, name: &str) -> Result<&ArrayRef> {
        let (position, _) = self
            .schema
            .column_with_name(name)
            .ok_or_else(|| GuardError::unknown_column(name))?;
        Ok(&self.columns[position])
    }

    /// A column's element type tag.
    pub fn dtype(&self, name: &str) -> Result<&DataType> {
        Ok(self.column(name)?.data_type())
    }

    /// The row index labels.
    pub fn index(&self) -> &[Label] {
        &self.index
    }

    /// The row index, shared for mask construction.
    pub fn shared_index(&self) -> Arc<[Label]> {
        self.index.clone()
    }

    /// A plain-data copy of the table's index and cells.
    ///
    /// Failure reports embed snapshots so callers can inspect the offending
    /// data even after a wrapped stage has consumed its table.
    pub fn snapshot(&self) -> Result<TableSnapshot> {
        let mut columns = Vec::with_capacity(self.num_columns());
        for (name, array) in self.columns() {
            let mut cells = Vec::with_capacity(self.num_rows());
            for row in 0..self.num_rows() {
                cells.push(CellValue::from_array(array.as_ref(), name, row)?);
            }
            columns.push((name.to_string(), cells));
        }
        Ok(TableSnapshot {
            index: self.index.to_vec(),
            columns,
        })
    }

    /// A numeric view of a column, cast to `Float64` with nulls preserved.
    ///
    /// Non-numeric columns are a misuse error, not a validation failure.
    pub fn numeric(&self, name: &str) -> Result<Float64Array> {
        let array = self.column(name)?;
        if !array.data_type().is_numeric() {
            return Err(GuardError::unsupported_type(name, array.data_type().clone()));
        }
        let cast = compute::cast(array.as_ref(), &DataType::Float64)?;
        cast.as_any()
            .downcast_ref::<Float64Array>()
            .cloned()
            .ok_or_else(|| {
                GuardError::internal(format!("cast of column '{name}' did not produce Float64"))
            })
    }
}

/// A detached, serializable copy of a table's index and cell values.
///
/// Snapshots own no arrow buffers; every cell is materialized as a
/// [`CellValue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    /// Row index labels.
    pub index: Vec<Label>,
    /// (column name, cell values) pairs in declared order.
    pub columns: Vec<(String, Vec<CellValue>)>,
}

impl TableSnapshot {
    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    /// The cells of a column, if present.
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, cells)| cells.as_slice())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.index == other.index
            && self.columns == other.columns
    }
}
