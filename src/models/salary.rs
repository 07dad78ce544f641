//! Salary-cap source data
//!
//! A [`SalaryTable`] holds every (team, season, cap hit) row of one or more
//! source files. It is loaded once and then handed to the aggregator by
//! reference; nothing mutates it afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{Array, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::algorithm::{self, GiniCoefficients};
use crate::config::SourceColumns;
use crate::error::{InequalityError, Result};
use crate::utils::arrow::{downcast_array, get_column};
use crate::utils::io::read_table;

/// One player's cap hit for a team and season
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    /// Team code, e.g. `TOR`
    pub team: String,
    /// Season identifier, e.g. `2024`
    pub year: i32,
    /// Salary-cap charge
    pub cap_hit: f64,
}

impl SalaryRecord {
    /// Create a new salary record
    #[must_use]
    pub fn new(team: impl Into<String>, year: i32, cap_hit: f64) -> Self {
        Self {
            team: team.into(),
            year,
            cap_hit,
        }
    }

    /// Arrow schema of a source table with the given column names
    #[must_use]
    pub fn schema(columns: &SourceColumns) -> Schema {
        Schema::new(vec![
            Field::new(&columns.team, DataType::Utf8, false),
            Field::new(&columns.year, DataType::Int32, false),
            Field::new(&columns.cap_hit, DataType::Float64, false),
        ])
    }
}

/// Check the non-negative, finite invariant of a cap hit
fn validate_cap_hit(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InequalityError::DegenerateInput(format!(
            "cap hit must be a non-negative number, got {value}"
        )))
    }
}

/// The cap hits of one (team, season) group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalarySample {
    values: Vec<f64>,
}

impl SalarySample {
    /// Build a sample, rejecting negative or non-finite values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        for value in &values {
            validate_cap_hit(*value)?;
        }
        Ok(Self { values })
    }

    /// Values taken from an already validated [`SalaryTable`]
    pub(crate) fn from_validated(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Raw cap hits in table order
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Roster size
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw and size-adjusted Gini
    #[must_use]
    pub fn gini(&self) -> GiniCoefficients {
        algorithm::gini_coefficients(&self.values)
    }

    /// Ortega gamma score
    #[must_use]
    pub fn ortega_gamma(&self) -> f64 {
        algorithm::ortega_gamma(&self.values)
    }

    /// Atkinson index for the given aversion exponent
    pub fn atkinson(&self, epsilon: f64) -> Result<f64> {
        algorithm::atkinson(&self.values, epsilon)
    }
}

/// Every salary row loaded from the source files
#[derive(Debug, Clone, Default)]
pub struct SalaryTable {
    records: Vec<SalaryRecord>,
}

impl SalaryTable {
    /// Build a table from in-memory records
    pub fn new(records: Vec<SalaryRecord>) -> Result<Self> {
        for record in &records {
            validate_cap_hit(record.cap_hit)?;
        }
        Ok(Self { records })
    }

    /// Load a Parquet or CSV source file
    pub fn load(path: &Path, columns: &SourceColumns) -> Result<Self> {
        let batches = read_table(path)?;
        let table = Self::from_record_batches(&batches, columns, path)?;
        log::info!(
            "Loaded {} salary records for {} teams from {}",
            table.len(),
            table.teams().len(),
            path.display()
        );
        Ok(table)
    }

    /// Convert record batches into salary records
    ///
    /// Rows whose team, season or cap hit is missing (or could not be
    /// converted), and rows with a negative cap hit, are dropped with a
    /// warning.
    pub fn from_record_batches(
        batches: &[RecordBatch],
        columns: &SourceColumns,
        path: &Path,
    ) -> Result<Self> {
        let mut records = Vec::new();
        let mut dropped = 0_usize;

        for batch in batches {
            let team_col = get_column(batch, &columns.team, &DataType::Utf8, true, path)?
                .ok_or_else(|| missing(&columns.team, path))?;
            let year_col = get_column(batch, &columns.year, &DataType::Int32, true, path)?
                .ok_or_else(|| missing(&columns.year, path))?;
            let cap_col = get_column(batch, &columns.cap_hit, &DataType::Float64, true, path)?
                .ok_or_else(|| missing(&columns.cap_hit, path))?;

            let teams = downcast_array::<StringArray>(&team_col, &columns.team, "String")?;
            let years = downcast_array::<Int32Array>(&year_col, &columns.year, "Int32")?;
            let caps = downcast_array::<Float64Array>(&cap_col, &columns.cap_hit, "Float64")?;

            for row in 0..batch.num_rows() {
                if teams.is_null(row) || years.is_null(row) || caps.is_null(row) {
                    dropped += 1;
                    continue;
                }
                let cap_hit = caps.value(row);
                if validate_cap_hit(cap_hit).is_err() {
                    dropped += 1;
                    continue;
                }
                records.push(SalaryRecord::new(
                    teams.value(row).trim(),
                    years.value(row),
                    cap_hit,
                ));
            }
        }

        if dropped > 0 {
            log::warn!(
                "Dropped {dropped} rows with missing or invalid values from {}",
                path.display()
            );
        }

        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows for one team, in table order
    pub fn team_records<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a SalaryRecord> {
        self.records.iter().filter(move |record| record.team == team)
    }

    /// Cap hits for an exact (team, season) match; empty if none
    #[must_use]
    pub fn sample(&self, team: &str, year: i32) -> SalarySample {
        SalarySample::from_validated(
            self.team_records(team)
                .filter(|record| record.year == year)
                .map(|record| record.cap_hit)
                .collect(),
        )
    }

    /// All (team, season) groups, ordered by key
    #[must_use]
    pub fn groups(&self) -> BTreeMap<(String, i32), SalarySample> {
        self.records
            .iter()
            .into_group_map_by(|record| (record.team.clone(), record.year))
            .into_iter()
            .map(|(key, rows)| {
                let values = rows.iter().map(|record| record.cap_hit).collect();
                (key, SalarySample::from_validated(values))
            })
            .collect()
    }

    /// Distinct team codes, sorted
    #[must_use]
    pub fn teams(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.team.as_str())
            .sorted()
            .dedup()
            .collect()
    }
}

fn missing(column: &str, path: &Path) -> InequalityError {
    InequalityError::MissingColumn {
        column: column.to_string(),
        path: path.to_path_buf(),
    }
}
