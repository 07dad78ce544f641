//! CSV file operations

use std::io::{Seek, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::utils::arrow::fixed_point_floats;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Number of records scanned to infer column types
const INFER_SCHEMA_RECORDS: usize = 1000;

/// Read a CSV file with a header row into record batches
///
/// Column types are inferred from the data; callers cast to the types they
/// need.
pub fn read_csv(path: &Path) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_operation_start("Reading csv file", path);

    let mut file = safe_open_file(path)?;
    let format = Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, Some(INFER_SCHEMA_RECORDS))?;
    file.rewind()?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok(batches)
}

/// Write a record batch as CSV with float columns in fixed-point notation
pub fn write_csv<W: Write>(mut writer: W, batch: &RecordBatch, decimals: usize) -> Result<()> {
    let text = fixed_point_floats(batch, decimals)?;
    {
        let mut csv = WriterBuilder::new().with_header(true).build(&mut writer);
        csv.write(&text)?;
    }
    writer.flush()?;
    Ok(())
}
