//! Configuration for inequality runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_read_to_string;

/// NHL franchise codes processed when no team list is given
pub const DEFAULT_ROSTER: [&str; 32] = [
    "ANA", "ARI", "BOS", "BUF", "CAR", "CBJ", "CGY", "CHI", "COL", "DAL", "DET", "EDM", "FLA",
    "LAK", "MIN", "MTL", "NJD", "NSH", "NYI", "NYR", "OTT", "PHI", "PIT", "SEA", "SJS", "STL",
    "TBL", "TOR", "VAN", "VGK", "WAS", "WPG",
];

/// Names of the source columns holding team code, season and cap hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    /// Team code column
    pub team: String,
    /// Season column
    pub year: String,
    /// Salary-cap charge column
    pub cap_hit: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            team: "Team".to_string(),
            year: "Year".to_string(),
            cap_hit: "Cap Hit".to_string(),
        }
    }
}

/// How new Gini rows are merged into an existing result table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendPolicy {
    /// Replace the row with the same (Team, Year) key, keeping its other measures
    #[default]
    Upsert,
    /// Concatenate, allowing duplicate keys
    Append,
}

/// Configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Single-season source file used by the Gini and summary runs
    pub source_file: PathBuf,
    /// Folder of per-season source files used by column extension
    pub source_folder: PathBuf,
    /// Persisted result table
    pub results_file: PathBuf,
    /// Output of the per-team salary summary
    pub summary_file: PathBuf,
    /// Source column names
    pub columns: SourceColumns,
    /// Team codes processed by roster runs
    pub roster: Vec<String>,
    /// Atkinson inequality-aversion exponent
    pub epsilon: f64,
    /// Decimal places kept for inequality measures
    pub decimals: u32,
    /// Decimal places kept for summary statistics
    pub summary_decimals: u32,
    /// Merge policy for Gini rows
    pub policy: AppendPolicy,
    /// Show progress bars while scanning per-season files
    pub show_progress: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from("LWCH_202425.parquet"),
            source_folder: PathBuf::from("data/league_wide_cap_hits"),
            results_file: PathBuf::from("team_inequality_measures.parquet"),
            summary_file: PathBuf::from("salary_stats_by_team.csv"),
            columns: SourceColumns::default(),
            roster: DEFAULT_ROSTER.iter().map(ToString::to_string).collect(),
            epsilon: 0.5,
            decimals: 4,
            summary_decimals: 2,
            policy: AppendPolicy::default(),
            show_progress: true,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
