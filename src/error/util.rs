//! Utility functions for error handling
//!
//! Path checks that turn a missing file or folder into a typed error naming
//! the path, so callers do not have to inspect `io::ErrorKind`.

use std::fs;
use std::path::Path;

use crate::error::{InequalityError, Result};

/// Open a file, mapping a missing path to [`InequalityError::MissingInput`]
pub fn safe_open_file(path: &Path) -> Result<fs::File> {
    if !path.is_file() {
        return Err(InequalityError::MissingInput(path.to_path_buf()));
    }

    Ok(fs::File::open(path)?)
}

/// Check that a directory exists and can be listed
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(InequalityError::MissingInput(path.to_path_buf()));
    }

    fs::read_dir(path)?;
    Ok(())
}

/// Read a whole file into a string
pub fn safe_read_to_string(path: &Path) -> Result<String> {
    let mut file = safe_open_file(path)?;
    let mut content = String::new();
    std::io::Read::read_to_string(&mut file, &mut content)?;
    Ok(content)
}
