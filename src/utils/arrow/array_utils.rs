//! Utilities for working with Arrow arrays.
//!
//! Source spreadsheets exported to CSV or Parquet rarely agree on physical
//! types: a season may arrive as `Int64`, `Float64` or text, a cap hit as an
//! integer. Columns are therefore fetched by name and cast to the type the
//! caller expects.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{InequalityError, Result};

/// Get a column from a record batch, cast to `expected_type`
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller will downcast to
/// * `required` - Whether a missing column is an error
/// * `path` - File the batch came from (for error messages)
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column, converted if necessary
/// * `Ok(None)` - The column is absent and not required
///
/// Values that cannot be converted become nulls.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
    path: &Path,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(InequalityError::MissingColumn {
                column: column_name.to_string(),
                path: path.to_path_buf(),
            });
        }
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();
    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    Ok(Some(cast::cast(column, expected_type)?))
}

/// Downcast a column to a specific array type with a clear error
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| InequalityError::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Replace every `Float64` column by its fixed-point text rendering
///
/// Used before writing CSV so that `0.25` is stored as `0.2500` with four
/// decimals. Nulls stay null.
pub fn fixed_point_floats(batch: &RecordBatch, decimals: usize) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns());

    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        if field.data_type() == &DataType::Float64 {
            let floats = downcast_array::<Float64Array>(column, field.name(), "Float64")?;
            let text: StringArray = floats
                .iter()
                .map(|value| value.map(|v| format!("{v:.decimals$}")))
                .collect();
            fields.push(Field::new(field.name(), DataType::Utf8, field.is_nullable()));
            columns.push(Arc::new(text));
        } else {
            fields.push(field.as_ref().clone());
            columns.push(column.clone());
        }
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}
