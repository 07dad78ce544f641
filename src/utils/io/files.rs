//! Discovery of per-season source files

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error::Result;
use crate::error::util::validate_directory;
use crate::utils::io::TableFormat;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Find all Parquet and CSV files directly inside `dir`, sorted by file name
///
/// The sort makes later files win deterministically when two seasons'
/// files both contain the same (team, year) group.
pub fn find_table_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for table files in", dir);
    validate_directory(dir)?;

    let files = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|path| path.is_file() && TableFormat::is_supported(path))
        .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
        .collect_vec();

    if files.is_empty() {
        log_warning("No Parquet or CSV files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, files.len(), None);
    }

    Ok(files)
}
