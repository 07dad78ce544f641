//! Error handling for inequality computations and table persistence.

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors that can occur while loading salaries, computing measures or
/// persisting the result table
#[derive(Debug, thiserror::Error)]
pub enum InequalityError {
    /// Error opening, reading or listing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding or encoding Arrow data (also raised by the CSV reader)
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error parsing a JSON configuration file
    #[error("Configuration error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from a table
    #[error("Column '{column}' not found in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A column could not be read as the expected Arrow type
    #[error("Column '{column}' is not a {expected} array")]
    InvalidDataType { column: String, expected: String },

    /// File extension is neither `.parquet` nor `.csv`
    #[error("Unsupported table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A file or folder that must exist does not
    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// A salary value is negative or not finite
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A formula was evaluated outside of its numeric domain
    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    /// No salary rows exist for the requested team (and season)
    #[error("No data found for team {team}{}", .year.map(|y| format!(" in {y}")).unwrap_or_default())]
    NoMatchingRecords { team: String, year: Option<i32> },

    /// Writing or replacing the result file failed
    #[error("Failed to persist {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chart rendering failed
    #[error("Plot error: {0}")]
    Plot(String),
}

impl InequalityError {
    /// Whether this error only reports a team/season with no rows
    ///
    /// Batch operations treat these as a logged skip rather than a failure.
    #[must_use]
    pub const fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatchingRecords { .. })
    }
}

/// Result type for inequality operations
pub type Result<T> = std::result::Result<T, InequalityError>;
