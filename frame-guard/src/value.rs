//! Row labels and dynamic cell scalars.
//!
//! Tables carry a label index (not necessarily contiguous or unique), and
//! checks report offending values of whatever type the column holds. [`Label`]
//! and [`CellValue`] are the dynamic carriers for both, covering the closed
//! set of arrow types the check library supports.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;

use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, LargeStringArray, StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;
use serde::Serialize;

use crate::error::{GuardError, Result};

/// A row index label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer label; the default index is `0..n`.
    Int(i64),
    /// Text label.
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for Label {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A dynamically typed cell scalar.
///
/// `Float(NaN)` compares unequal to itself, so a NaN cell is never a member
/// of an allowed-value set. Hashing uses the float's bit pattern, which keeps
/// grouping by value well defined for every non-NaN float.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A missing value.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Text(value) => value.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn downcast<'a, T: Array + 'static>(array: &'a dyn Array, column: &str) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        GuardError::internal(format!(
            "array for column '{column}' does not match its declared data type"
        ))
    })
}

impl CellValue {
    /// Extracts the value at `row` from a supported arrow array.
    ///
    /// `column` is only used for error context. Unsigned 64-bit values beyond
    /// the `i64` range degrade to `Float`.
    pub fn from_array(array: &dyn Array, column: &str, row: usize) -> Result<Self> {
        if array.is_null(row) {
            return Ok(Self::Null);
        }
        let value = match array.data_type() {
            DataType::Null => Self::Null,
            DataType::Boolean => Self::Bool(downcast::<BooleanArray>(array, column)?.value(row)),
            DataType::Int8 => Self::Int(downcast::<Int8Array>(array, column)?.value(row) as i64),
            DataType::Int16 => Self::Int(downcast::<Int16Array>(array, column)?.value(row) as i64),
            DataType::Int32 => Self::Int(downcast::<Int32Array>(array, column)?.value(row) as i64),
            DataType::Int64 => Self::Int(downcast::<Int64Array>(array, column)?.value(row)),
            DataType::UInt8 => Self::Int(downcast::<UInt8Array>(array, column)?.value(row) as i64),
            DataType::UInt16 => {
                Self::Int(downcast::<UInt16Array>(array, column)?.value(row) as i64)
            }
            DataType::UInt32 => {
                Self::Int(downcast::<UInt32Array>(array, column)?.value(row) as i64)
            }
            DataType::UInt64 => {
                let raw = downcast::<UInt64Array>(array, column)?.value(row);
                i64::try_from(raw)
                    .map(Self::Int)
                    .unwrap_or(Self::Float(raw as f64))
            }
            DataType::Float32 => {
                Self::Float(downcast::<Float32Array>(array, column)?.value(row) as f64)
            }
            DataType::Float64 => Self::Float(downcast::<Float64Array>(array, column)?.value(row)),
            DataType::Utf8 => {
                Self::Text(downcast::<StringArray>(array, column)?.value(row).to_string())
            }
            DataType::LargeUtf8 => Self::Text(
                downcast::<LargeStringArray>(array, column)?
                    .value(row)
                    .to_string(),
            ),
            other => return Err(GuardError::unsupported_type(column, other.clone())),
        };
        Ok(value)
    }
}
