//! Per-team salary summary rows

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::algorithm::{mean, population_std_dev, round_to};
use crate::error::Result;
use crate::models::salary::SalaryTable;

/// Average cap hit and its population standard deviation for one team
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSalarySummary {
    pub team: String,
    pub average_cap_hit: f64,
    pub salary_variation_pop_sd: f64,
}

impl TeamSalarySummary {
    /// Arrow schema of the summary table
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("Team", DataType::Utf8, false),
            Field::new("Average_Cap_Hit", DataType::Float64, false),
            Field::new("Salary_Variation_PopSD", DataType::Float64, false),
        ])
    }

    /// Summarise every team in `table`, sorted by team code
    ///
    /// All seasons present in the table are pooled per team.
    #[must_use]
    pub fn from_table(table: &SalaryTable, decimals: u32) -> Vec<Self> {
        table
            .teams()
            .into_iter()
            .filter_map(|team| {
                let values: Vec<f64> = table.team_records(team).map(|r| r.cap_hit).collect();
                Some(Self {
                    team: team.to_string(),
                    average_cap_hit: round_to(mean(&values)?, decimals),
                    salary_variation_pop_sd: round_to(population_std_dev(&values)?, decimals),
                })
            })
            .collect()
    }

    /// Convert summary rows to a record batch
    pub fn to_record_batch(summaries: &[Self]) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                summaries.iter().map(|s| s.team.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                summaries.iter().map(|s| s.average_cap_hit),
            )),
            Arc::new(Float64Array::from_iter_values(
                summaries.iter().map(|s| s.salary_variation_pop_sd),
            )),
        ];
        Ok(RecordBatch::try_new(Arc::new(Self::schema()), columns)?)
    }
}
