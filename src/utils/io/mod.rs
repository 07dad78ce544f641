//! IO utilities for tabular files
//!
//! Source salary tables and the persisted result table are read and written
//! whole, as Parquet or CSV depending on the file extension.

pub mod csv;
pub mod files;
pub mod parquet;

use std::path::Path;

use arrow::record_batch::RecordBatch;
use tempfile::NamedTempFile;

use crate::error::{InequalityError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub use files::find_table_files;

/// On-disk table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Apache Parquet
    Parquet,
    /// Comma-separated values with a header row
    Csv,
}

impl TableFormat {
    /// Pick the format from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("parquet") => Ok(Self::Parquet),
            Some("csv") => Ok(Self::Csv),
            _ => Err(InequalityError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Whether the path has a supported extension
    #[must_use]
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Read every record batch of a Parquet or CSV file
pub fn read_table(path: &Path) -> Result<Vec<RecordBatch>> {
    match TableFormat::from_path(path)? {
        TableFormat::Parquet => self::parquet::read_parquet(path),
        TableFormat::Csv => self::csv::read_csv(path),
    }
}

/// Replace `path` with the contents of `batch`
///
/// The table is written to a temporary file in the destination directory and
/// renamed over the target, so readers never observe a half-written file.
/// `decimals` sets the fixed-point precision of float columns in CSV output.
pub fn write_table(path: &Path, batch: &RecordBatch, decimals: usize) -> Result<()> {
    let start = std::time::Instant::now();
    let format = TableFormat::from_path(path)?;
    log_operation_start("Writing table", path);

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir).map_err(|source| InequalityError::Persistence {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        TableFormat::Parquet => self::parquet::write_parquet(temp.as_file_mut(), batch)?,
        TableFormat::Csv => self::csv::write_csv(temp.as_file_mut(), batch, decimals)?,
    }

    temp.persist(path)
        .map_err(|err| InequalityError::Persistence {
            path: path.to_path_buf(),
            source: err.error,
        })?;

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}
