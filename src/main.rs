use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use cap_inequality::{
    AnalysisConfig, AppendPolicy, ExtensionMeasure, ExtensionOptions, InequalityAggregator,
    Measure, ResultStore, SalaryTable, TeamSalarySummary, extend_with_measure, plot_from_store,
    write_summary,
};
use clap::{Parser, Subcommand};
use log::info;

/// Salary-cap inequality measures per team and season
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON configuration file; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Result table (.parquet or .csv)
    #[arg(long, global = true)]
    results: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute raw and adjusted Gini per team and merge them into the result table
    Gini {
        /// Single-season source file
        #[arg(long)]
        source: Option<PathBuf>,
        /// Team codes (defaults to the configured roster)
        #[arg(long = "team")]
        teams: Vec<String>,
        /// Use every team present in the source file
        #[arg(long, conflicts_with = "teams")]
        all: bool,
        /// Append duplicate rows instead of replacing rows with the same key
        #[arg(long)]
        append: bool,
    },
    /// Recompute the Ortega Gamma column from a folder of per-season files
    Ortega {
        /// Folder of per-season source files
        #[arg(long)]
        folder: Option<PathBuf>,
    },
    /// Recompute the Atkinson Index column from a folder of per-season files
    Atkinson {
        /// Folder of per-season source files
        #[arg(long)]
        folder: Option<PathBuf>,
        /// Inequality-aversion exponent
        #[arg(long)]
        epsilon: Option<f64>,
    },
    /// Average cap hit and population standard deviation per team
    Summary {
        /// Source file
        #[arg(long)]
        source: Option<PathBuf>,
        /// Output file (.parquet or .csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Chart a measure by season as SVG
    Plot {
        /// Measure to plot (raw-gini, adjusted-gini, ortega-gamma, atkinson-index)
        #[arg(long, default_value = "raw-gini")]
        measure: Measure,
        /// Only plot this team
        #[arg(long)]
        team: Option<String>,
        /// Output SVG file
        #[arg(long, default_value = "inequality.svg")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(results) = cli.results {
        config.results_file = results;
    }
    if cli.quiet {
        config.show_progress = false;
    }

    let start = Instant::now();
    let store = ResultStore::new(&config.results_file, config.decimals);

    match cli.command {
        Command::Gini {
            source,
            teams,
            all,
            append,
        } => {
            let source = source.unwrap_or_else(|| config.source_file.clone());
            let salaries = SalaryTable::load(&source, &config.columns)
                .with_context(|| format!("loading salaries from {}", source.display()))?;

            let teams: Vec<String> = if all {
                salaries.teams().into_iter().map(ToString::to_string).collect()
            } else if teams.is_empty() {
                config.roster.clone()
            } else {
                teams
            };
            let policy = if append {
                AppendPolicy::Append
            } else {
                config.policy
            };

            let summary = InequalityAggregator::new(&salaries, config.decimals)
                .append_gini(&store, &teams, policy)?;
            if !summary.skipped.is_empty() {
                info!("Teams without data: {}", summary.skipped.join(", "));
            }
        }
        Command::Ortega { folder } => {
            let folder = folder.unwrap_or_else(|| config.source_folder.clone());
            extend(&store, &config, &folder, ExtensionMeasure::OrtegaGamma)?;
        }
        Command::Atkinson { folder, epsilon } => {
            let folder = folder.unwrap_or_else(|| config.source_folder.clone());
            let epsilon = epsilon.unwrap_or(config.epsilon);
            extend(&store, &config, &folder, ExtensionMeasure::Atkinson { epsilon })?;
        }
        Command::Summary { source, output } => {
            let source = source.unwrap_or_else(|| config.source_file.clone());
            let output = output.unwrap_or_else(|| config.summary_file.clone());
            let salaries = SalaryTable::load(&source, &config.columns)
                .with_context(|| format!("loading salaries from {}", source.display()))?;
            let summaries = TeamSalarySummary::from_table(&salaries, config.summary_decimals);
            write_summary(&output, &summaries, config.summary_decimals)?;
            info!("Wrote summary for {} teams to {}", summaries.len(), output.display());
        }
        Command::Plot {
            measure,
            team,
            output,
        } => {
            plot_from_store(&store, team.as_deref(), measure, &output)?;
        }
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}

fn extend(
    store: &ResultStore,
    config: &AnalysisConfig,
    folder: &std::path::Path,
    measure: ExtensionMeasure,
) -> anyhow::Result<()> {
    let options = ExtensionOptions {
        columns: &config.columns,
        decimals: config.decimals,
        show_progress: config.show_progress,
    };
    let summary = extend_with_measure(store, folder, measure, &options).with_context(|| {
        format!(
            "extending {} with {}",
            store.path().display(),
            measure.measure()
        )
    })?;
    if summary.unmatched_rows > 0 {
        info!(
            "{} rows had no matching salary data",
            summary.unmatched_rows
        );
    }
    Ok(())
}
