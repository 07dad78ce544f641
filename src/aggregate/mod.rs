//! Aggregation of salary samples into result rows
//!
//! Two modes feed the result table:
//!
//! - Row append: one Gini row per requested team is computed from an injected
//!   [`SalaryTable`] and merged into the stored table.
//! - Column extension: an Ortega or Atkinson column is (re)computed for every
//!   stored row by scanning a folder of per-season source files.
//!
//! A team or season without salary rows is never fatal in batch mode; it is
//! logged and reported back in the run summary.

use std::path::Path;

use itertools::Itertools;
use log::{debug, info, warn};

use crate::algorithm::round_to;
use crate::config::{AppendPolicy, SourceColumns};
use crate::error::{InequalityError, Result};
use crate::models::{InequalityResult, Measure, ResultTable, SalarySample, SalaryTable};
use crate::store::ResultStore;
use crate::utils::io::find_table_files;
use crate::utils::logging::{create_file_progress_bar, finish_progress_bar};

/// Outcome of a batch Gini run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Rows computed in this run
    pub written: Vec<InequalityResult>,
    /// Teams with no salary rows
    pub skipped: Vec<String>,
}

/// Outcome of a column extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionSummary {
    /// Source files scanned
    pub files: usize,
    /// Result rows that found a matching sample in at least one file
    pub matched_rows: usize,
    /// Result rows left at the 0.0 default
    pub unmatched_rows: usize,
}

/// A measure computed by column extension
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtensionMeasure {
    /// Ortega gamma score
    OrtegaGamma,
    /// Atkinson index with the given aversion exponent
    Atkinson { epsilon: f64 },
}

impl ExtensionMeasure {
    /// Column the measure is stored in
    #[must_use]
    pub const fn measure(self) -> Measure {
        match self {
            Self::OrtegaGamma => Measure::OrtegaGamma,
            Self::Atkinson { .. } => Measure::AtkinsonIndex,
        }
    }

    /// Evaluate the measure over one sample (unrounded)
    pub fn compute(self, sample: &SalarySample) -> Result<f64> {
        match self {
            Self::OrtegaGamma => Ok(sample.ortega_gamma()),
            Self::Atkinson { epsilon } => sample.atkinson(epsilon),
        }
    }
}

/// Computes Gini rows from a source table passed in by the caller
#[derive(Debug, Clone, Copy)]
pub struct InequalityAggregator<'a> {
    salaries: &'a SalaryTable,
    decimals: u32,
}

impl<'a> InequalityAggregator<'a> {
    #[must_use]
    pub const fn new(salaries: &'a SalaryTable, decimals: u32) -> Self {
        Self { salaries, decimals }
    }

    /// Gini row for a team
    ///
    /// The season is the year of the team's first row in the table; only rows
    /// of that season make up the sample.
    pub fn gini_row(&self, team: &str) -> Result<InequalityResult> {
        let mut years = self
            .salaries
            .team_records(team)
            .map(|record| record.year)
            .unique();
        let Some(year) = years.next() else {
            return Err(InequalityError::NoMatchingRecords {
                team: team.to_string(),
                year: None,
            });
        };
        if years.next().is_some() {
            warn!("Team {team} spans several seasons, using {year}");
        }

        self.gini_row_for_year(team, year)
    }

    /// Gini row for an exact (team, season)
    pub fn gini_row_for_year(&self, team: &str, year: i32) -> Result<InequalityResult> {
        let sample = self.salaries.sample(team, year);
        if sample.is_empty() {
            return Err(InequalityError::NoMatchingRecords {
                team: team.to_string(),
                year: Some(year),
            });
        }

        let row = InequalityResult::from_gini(team, year, &sample.gini(), self.decimals);
        debug!(
            "{team} {year}: raw gini {:?}, adjusted {:?}, roster {}",
            row.raw_gini,
            row.adjusted_gini,
            sample.len()
        );
        Ok(row)
    }

    /// Gini rows for a list of teams, skipping teams without data
    pub fn gini_rows<S: AsRef<str>>(&self, teams: &[S]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for team in teams {
            let team = team.as_ref();
            match self.gini_row(team) {
                Ok(row) => summary.written.push(row),
                Err(err) if err.is_no_match() => {
                    warn!("{err}");
                    summary.skipped.push(team.to_string());
                }
                Err(err) => return Err(err),
            }
        }

        Ok(summary)
    }

    /// Compute Gini rows for `teams` and merge them into the store
    ///
    /// The file is written once, after every team has been processed. If no
    /// team has data the file is left untouched.
    pub fn append_gini<S: AsRef<str>>(
        &self,
        store: &ResultStore,
        teams: &[S],
        policy: AppendPolicy,
    ) -> Result<RunSummary> {
        let summary = self.gini_rows(teams)?;
        if summary.written.is_empty() {
            warn!("No Gini rows computed, {} left unchanged", store.path().display());
            return Ok(summary);
        }

        let table = store.append(summary.written.iter().cloned(), policy)?;
        info!(
            "Wrote {} Gini rows ({} skipped), result table now has {} rows",
            summary.written.len(),
            summary.skipped.len(),
            table.len()
        );
        Ok(summary)
    }
}

/// Overwrite `measure` on every row that has a matching sample in `salaries`
///
/// Returns the indices of the rows that matched.
pub fn fill_measure(
    table: &mut ResultTable,
    salaries: &SalaryTable,
    measure: ExtensionMeasure,
    decimals: u32,
) -> Result<Vec<usize>> {
    let column = measure.measure();
    let mut matched = Vec::new();

    for (idx, row) in table.rows_mut().iter_mut().enumerate() {
        let sample = salaries.sample(&row.team, row.year);
        if sample.is_empty() {
            continue;
        }
        let value = measure.compute(&sample)?;
        row.set_value(column, round_to(value, decimals));
        matched.push(idx);
    }

    Ok(matched)
}

/// Options for [`extend_with_measure`]
#[derive(Debug, Clone, Copy)]
pub struct ExtensionOptions<'a> {
    /// Source column names of the per-season files
    pub columns: &'a SourceColumns,
    /// Rounding of the stored values
    pub decimals: u32,
    /// Show a progress bar over the files
    pub show_progress: bool,
}

/// Recompute one measure column of the stored result table
///
/// The column is reset to 0.0 on every row, then each per-season file in
/// `folder` (in file-name order) overwrites the rows it has a sample for.
/// Running twice on the same inputs writes the same table.
pub fn extend_with_measure(
    store: &ResultStore,
    folder: &Path,
    measure: ExtensionMeasure,
    options: &ExtensionOptions<'_>,
) -> Result<ExtensionSummary> {
    let mut table = store.load_existing()?;
    let files = find_table_files(folder)?;
    let column = measure.measure();
    table.reset_measure(column, 0.0);

    let mut matched = vec![false; table.len()];
    let pb = create_file_progress_bar(
        files.len() as u64,
        Some(column.column_name()),
        options.show_progress,
    );

    for file in &files {
        let salaries = SalaryTable::load(file, options.columns)?;
        for idx in fill_measure(&mut table, &salaries, measure, options.decimals)? {
            matched[idx] = true;
        }
        pb.inc(1);
    }
    finish_progress_bar(&pb, Some("done"));

    for (row, _) in table
        .rows()
        .iter()
        .zip(&matched)
        .filter(|(_, found)| !**found)
    {
        warn!(
            "No salary data found for {} {}, {} left at 0",
            row.team, row.year, column
        );
    }

    store.save(&table)?;

    let matched_rows = matched.iter().filter(|found| **found).count();
    let summary = ExtensionSummary {
        files: files.len(),
        matched_rows,
        unmatched_rows: matched.len() - matched_rows,
    };
    info!(
        "Extended {} with {column}: {} rows matched across {} files",
        store.path().display(),
        summary.matched_rows,
        summary.files
    );
    Ok(summary)
}
