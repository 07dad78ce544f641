//! Inequality results and the persisted result table
//!
//! One [`InequalityResult`] row exists per (team, season). Measures are
//! optional because the table is built up over several runs: the Gini run
//! creates rows, later runs add the Ortega and Atkinson columns.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::algorithm::{GiniCoefficients, round_to};
use crate::config::AppendPolicy;
use crate::error::Result;
use crate::utils::arrow::{downcast_array, get_column};

pub const TEAM_COLUMN: &str = "Team";
pub const YEAR_COLUMN: &str = "Year";
pub const ROSTER_SIZE_COLUMN: &str = "Roster Size";

/// A stored inequality measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measure {
    /// Population Gini coefficient
    RawGini,
    /// Small-sample corrected Gini
    AdjustedGini,
    /// Ortega gamma score
    OrtegaGamma,
    /// Atkinson index
    AtkinsonIndex,
}

impl Measure {
    /// Every measure in column order
    pub const ALL: [Self; 4] = [
        Self::RawGini,
        Self::AdjustedGini,
        Self::OrtegaGamma,
        Self::AtkinsonIndex,
    ];

    /// Column header in the result table
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::RawGini => "Raw Gini",
            Self::AdjustedGini => "Adjusted Gini",
            Self::OrtegaGamma => "Ortega Gamma",
            Self::AtkinsonIndex => "Atkinson Index",
        }
    }

    /// Short command-line name
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::RawGini => "raw-gini",
            Self::AdjustedGini => "adjusted-gini",
            Self::OrtegaGamma => "ortega-gamma",
            Self::AtkinsonIndex => "atkinson-index",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|measure| measure.key() == s || measure.column_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown measure '{s}', expected one of: {}",
                    Self::ALL.iter().map(|m| m.key()).join(", ")
                )
            })
    }
}

/// One row of the result table
#[derive(Debug, Clone, PartialEq)]
pub struct InequalityResult {
    pub team: String,
    pub year: i32,
    pub raw_gini: Option<f64>,
    pub adjusted_gini: Option<f64>,
    pub roster_size: Option<usize>,
    pub ortega_gamma: Option<f64>,
    pub atkinson_index: Option<f64>,
}

impl InequalityResult {
    /// Create a row with no measures
    #[must_use]
    pub fn new(team: impl Into<String>, year: i32) -> Self {
        Self {
            team: team.into(),
            year,
            raw_gini: None,
            adjusted_gini: None,
            roster_size: None,
            ortega_gamma: None,
            atkinson_index: None,
        }
    }

    /// Row holding rounded Gini coefficients and the roster size
    #[must_use]
    pub fn from_gini(
        team: impl Into<String>,
        year: i32,
        gini: &GiniCoefficients,
        decimals: u32,
    ) -> Self {
        Self {
            raw_gini: Some(round_to(gini.raw, decimals)),
            adjusted_gini: Some(round_to(gini.adjusted, decimals)),
            roster_size: Some(gini.sample_size),
            ..Self::new(team, year)
        }
    }

    /// Whether this row is keyed by (team, year)
    #[must_use]
    pub fn matches(&self, team: &str, year: i32) -> bool {
        self.team == team && self.year == year
    }

    #[must_use]
    pub const fn value(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::RawGini => self.raw_gini,
            Measure::AdjustedGini => self.adjusted_gini,
            Measure::OrtegaGamma => self.ortega_gamma,
            Measure::AtkinsonIndex => self.atkinson_index,
        }
    }

    pub fn set_value(&mut self, measure: Measure, value: f64) {
        let slot = match measure {
            Measure::RawGini => &mut self.raw_gini,
            Measure::AdjustedGini => &mut self.adjusted_gini,
            Measure::OrtegaGamma => &mut self.ortega_gamma,
            Measure::AtkinsonIndex => &mut self.atkinson_index,
        };
        *slot = Some(value);
    }

    /// Copy every value present in `other` into this row
    fn merge_from(&mut self, other: &Self) {
        for measure in Measure::ALL {
            if let Some(value) = other.value(measure) {
                self.set_value(measure, value);
            }
        }
        if other.roster_size.is_some() {
            self.roster_size = other.roster_size;
        }
    }
}

/// The collection of result rows persisted between runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<InequalityResult>,
}

impl ResultTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rows(rows: Vec<InequalityResult>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[InequalityResult] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [InequalityResult] {
        &mut self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row without checking for an existing key
    pub fn push(&mut self, row: InequalityResult) {
        self.rows.push(row);
    }

    /// Merge `row` into the first row with the same key, or append it
    ///
    /// Values present in `row` overwrite the stored ones; measures it does
    /// not carry are kept.
    pub fn upsert(&mut self, row: InequalityResult) {
        match self
            .rows
            .iter_mut()
            .find(|existing| existing.matches(&row.team, row.year))
        {
            Some(existing) => existing.merge_from(&row),
            None => self.rows.push(row),
        }
    }

    /// Insert a row according to `policy`
    pub fn insert(&mut self, row: InequalityResult, policy: AppendPolicy) {
        match policy {
            AppendPolicy::Upsert => self.upsert(row),
            AppendPolicy::Append => self.push(row),
        }
    }

    #[must_use]
    pub fn find(&self, team: &str, year: i32) -> Option<&InequalityResult> {
        self.rows.iter().find(|row| row.matches(team, year))
    }

    /// Set `measure` to `value` on every row
    pub fn reset_measure(&mut self, measure: Measure, value: f64) {
        for row in &mut self.rows {
            row.set_value(measure, value);
        }
    }

    /// Distinct team codes, sorted
    #[must_use]
    pub fn teams(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.team.as_str())
            .sorted()
            .dedup()
            .collect()
    }

    /// (season, value) points of one team's measure, ordered by season
    #[must_use]
    pub fn series(&self, team: &str, measure: Measure) -> Vec<(i32, f64)> {
        self.rows
            .iter()
            .filter(|row| row.team == team)
            .filter_map(|row| row.value(measure).map(|value| (row.year, value)))
            .sorted_by_key(|(year, _)| *year)
            .collect()
    }

    /// Measures carried by at least one row, in column order
    #[must_use]
    pub fn measures_present(&self) -> Vec<Measure> {
        Measure::ALL
            .into_iter()
            .filter(|measure| self.rows.iter().any(|row| row.value(*measure).is_some()))
            .collect()
    }

    /// Convert the table into a single record batch
    ///
    /// `Team` and `Year` are always written; `Raw Gini`, `Adjusted Gini`,
    /// `Roster Size`, `Ortega Gamma` and `Atkinson Index` follow in that order
    /// when any row has a value for them.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let mut fields = vec![
            Field::new(TEAM_COLUMN, DataType::Utf8, false),
            Field::new(YEAR_COLUMN, DataType::Int32, false),
        ];
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                self.rows.iter().map(|row| row.team.as_str()),
            )),
            Arc::new(Int32Array::from_iter_values(
                self.rows.iter().map(|row| row.year),
            )),
        ];

        let present = self.measures_present();
        for measure in [Measure::RawGini, Measure::AdjustedGini] {
            if present.contains(&measure) {
                fields.push(Field::new(measure.column_name(), DataType::Float64, true));
                columns.push(self.measure_array(measure));
            }
        }

        if self.rows.iter().any(|row| row.roster_size.is_some()) {
            fields.push(Field::new(ROSTER_SIZE_COLUMN, DataType::Int64, true));
            columns.push(Arc::new(Int64Array::from_iter(
                self.rows.iter().map(|row| row.roster_size.map(|n| n as i64)),
            )));
        }

        for measure in [Measure::OrtegaGamma, Measure::AtkinsonIndex] {
            if present.contains(&measure) {
                fields.push(Field::new(measure.column_name(), DataType::Float64, true));
                columns.push(self.measure_array(measure));
            }
        }

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }

    fn measure_array(&self, measure: Measure) -> ArrayRef {
        Arc::new(Float64Array::from_iter(
            self.rows.iter().map(|row| row.value(measure)),
        ))
    }

    /// Rebuild the table from record batches read back from disk
    ///
    /// Rows without a team or season are skipped with a warning.
    pub fn from_record_batches(batches: &[RecordBatch], path: &Path) -> Result<Self> {
        let mut rows = Vec::new();
        let mut skipped = 0_usize;

        for batch in batches {
            let team_col = get_column(batch, TEAM_COLUMN, &DataType::Utf8, true, path)?;
            let year_col = get_column(batch, YEAR_COLUMN, &DataType::Int32, true, path)?;
            let roster_col = get_column(batch, ROSTER_SIZE_COLUMN, &DataType::Int64, false, path)?;
            let measure_cols = Measure::ALL
                .into_iter()
                .map(|measure| {
                    get_column(batch, measure.column_name(), &DataType::Float64, false, path)
                        .map(|col| (measure, col))
                })
                .collect::<Result<Vec<_>>>()?;

            let (Some(team_col), Some(year_col)) = (team_col, year_col) else {
                continue;
            };
            let teams = downcast_array::<StringArray>(&team_col, TEAM_COLUMN, "String")?;
            let years = downcast_array::<Int32Array>(&year_col, YEAR_COLUMN, "Int32")?;
            let rosters = roster_col
                .as_ref()
                .map(|col| downcast_array::<Int64Array>(col, ROSTER_SIZE_COLUMN, "Int64"))
                .transpose()?;
            let measures = measure_cols
                .iter()
                .filter_map(|(measure, col)| col.as_ref().map(|col| (*measure, col)))
                .map(|(measure, col)| {
                    downcast_array::<Float64Array>(col, measure.column_name(), "Float64")
                        .map(|values| (measure, values))
                })
                .collect::<Result<Vec<_>>>()?;

            for idx in 0..batch.num_rows() {
                if teams.is_null(idx) || years.is_null(idx) {
                    skipped += 1;
                    continue;
                }

                let mut row = InequalityResult::new(teams.value(idx), years.value(idx));
                if let Some(rosters) = rosters {
                    if !rosters.is_null(idx) {
                        row.roster_size = usize::try_from(rosters.value(idx)).ok();
                    }
                }
                for (measure, values) in &measures {
                    if !values.is_null(idx) {
                        row.set_value(*measure, values.value(idx));
                    }
                }
                rows.push(row);
            }
        }

        if skipped > 0 {
            log::warn!(
                "Skipped {skipped} result rows without team or season in {}",
                path.display()
            );
        }

        Ok(Self { rows })
    }
}
