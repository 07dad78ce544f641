//! Persistence of the result table
//!
//! Every operation reads the whole file, changes the table in memory and
//! writes the whole file back through an atomic replace. A missing file is a
//! first run and reads as an empty table.

use std::path::{Path, PathBuf};

use crate::config::AppendPolicy;
use crate::error::{InequalityError, Result};
use crate::models::{InequalityResult, ResultTable, TeamSalarySummary};
use crate::utils::io::{read_table, write_table};

/// The result table file on disk
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
    decimals: u32,
}

impl ResultStore {
    /// `decimals` is the fixed-point precision used when the file is CSV
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, decimals: u32) -> Self {
        Self {
            path: path.into(),
            decimals,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the table, or an empty table when the file does not exist yet
    pub fn load(&self) -> Result<ResultTable> {
        if !self.exists() {
            log::info!(
                "No result table at {}, starting a new one",
                self.path.display()
            );
            return Ok(ResultTable::new());
        }
        self.load_existing()
    }

    /// Load the table, failing if the file does not exist
    pub fn load_existing(&self) -> Result<ResultTable> {
        if !self.exists() {
            return Err(InequalityError::MissingInput(self.path.clone()));
        }
        let batches = read_table(&self.path)?;
        ResultTable::from_record_batches(&batches, &self.path)
    }

    /// Overwrite the file with `table`
    pub fn save(&self, table: &ResultTable) -> Result<()> {
        let batch = table.to_record_batch()?;
        write_table(&self.path, &batch, self.decimals as usize)
    }

    /// Merge `rows` into the stored table and persist it
    ///
    /// Returns the table as written.
    pub fn append(
        &self,
        rows: impl IntoIterator<Item = InequalityResult>,
        policy: AppendPolicy,
    ) -> Result<ResultTable> {
        let mut table = self.load()?;
        for row in rows {
            table.insert(row, policy);
        }
        self.save(&table)?;
        Ok(table)
    }
}

/// Write per-team summaries, replacing any previous file
pub fn write_summary(path: &Path, summaries: &[TeamSalarySummary], decimals: u32) -> Result<()> {
    let batch = TeamSalarySummary::to_record_batch(summaries)?;
    write_table(path, &batch, decimals as usize)
}
