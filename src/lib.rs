//! Income-inequality statistics over team salary-cap tables.
//!
//! Salary rows (team, season, cap hit) are loaded from Parquet or CSV files,
//! grouped per team and season, and summarised with the Gini coefficient, its
//! small-sample adjustment, the Ortega gamma score and the Atkinson index.
//! Results accumulate in a result table persisted between runs, and can be
//! charted per team or across the league.

pub mod aggregate;
pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;
pub mod visual;

// Re-export the most common types for easier use
pub use aggregate::{
    ExtensionMeasure, ExtensionOptions, ExtensionSummary, InequalityAggregator, RunSummary,
    extend_with_measure, fill_measure,
};
pub use algorithm::{adjusted_gini, atkinson, gini, ortega_gamma};
pub use config::{AnalysisConfig, AppendPolicy, SourceColumns};
pub use error::{InequalityError, Result};
pub use models::{
    InequalityResult, Measure, ResultTable, SalaryRecord, SalarySample, SalaryTable,
    TeamSalarySummary,
};
pub use store::{ResultStore, write_summary};
pub use visual::{plot_all_teams, plot_from_store, plot_team};

// Arrow types
pub use arrow::record_batch::RecordBatch;
