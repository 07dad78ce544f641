//! Charts of a measure over seasons
//!
//! Charts are rendered with [`plotters`] to SVG, which needs no system fonts
//! and works headless.

use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{InequalityError, Result};
use crate::models::{Measure, ResultTable};
use crate::store::ResultStore;
use crate::utils::logging::log_warning;

/// Chart size in pixels
pub const CHART_SIZE: (u32, u32) = (1200, 600);

/// Vertical offset of point labels, in measure units
const LABEL_OFFSET: f64 = 0.002;

fn plot_error<E: std::fmt::Display>(err: E) -> InequalityError {
    InequalityError::Plot(err.to_string())
}

/// Season axis covering `years`, padded by half a season on each side
fn year_range(years: impl Iterator<Item = i32> + Clone) -> Range<f64> {
    let min = years.clone().min().unwrap_or(0);
    let max = years.max().unwrap_or(min);
    f64::from(min) - 0.5..f64::from(max) + 0.5
}

/// Value axis covering `values` with a 10% margin
fn value_range(values: impl Iterator<Item = f64> + Clone) -> Range<f64> {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let margin = ((max - min) * 0.1).max(0.01);
    (min - margin)..(max + margin)
}

/// Scatter `measure` by season for every team, one colour per team
///
/// Returns `Ok(false)` without drawing when no row carries the measure.
pub fn plot_all_teams(table: &ResultTable, measure: Measure, output: &Path) -> Result<bool> {
    let points: Vec<(&str, Vec<(i32, f64)>)> = table
        .teams()
        .into_iter()
        .map(|team| (team, table.series(team, measure)))
        .filter(|(_, series)| !series.is_empty())
        .collect();

    if points.is_empty() {
        log_warning(&format!("No {measure} values to plot"), None);
        return Ok(false);
    }

    let all = points.iter().flat_map(|(_, series)| series.iter().copied());
    let x_range = year_range(all.clone().map(|(year, _)| year));
    let y_range = value_range(all.map(|(_, value)| value));

    let root = SVGBackend::new(output, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{measure} by Team per Season"), ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Season")
        .y_desc(measure.column_name())
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()
        .map_err(plot_error)?;

    for (idx, (team, series)) in points.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.6);
        chart
            .draw_series(series.iter().map(|&(year, value)| {
                Circle::new((f64::from(year), value), 4, color.filled())
            }))
            .map_err(plot_error)?
            .label(*team)
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(true)
}

/// Plot one team's `measure` by season with each point labelled
///
/// Returns `Ok(false)` without drawing when the team has no values.
pub fn plot_team(table: &ResultTable, team: &str, measure: Measure, output: &Path) -> Result<bool> {
    let series = table.series(team, measure);
    if series.is_empty() {
        log_warning(&format!("No {measure} data found for team {team}"), None);
        return Ok(false);
    }

    let x_range = year_range(series.iter().map(|(year, _)| *year));
    let y_range = value_range(series.iter().map(|(_, value)| *value));
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|&(year, value)| (f64::from(year), value))
        .collect();

    let root = SVGBackend::new(output, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{measure} for {team} by Season"), ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Season")
        .y_desc(measure.column_name())
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE.mix(0.6)))
        .map_err(plot_error)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 5, GREEN.filled())),
        )
        .map_err(plot_error)?;
    chart
        .draw_series(points.iter().map(|&(x, y)| {
            Text::new(
                format!("{y:.3}"),
                (x, y + LABEL_OFFSET),
                ("sans-serif", 12).into_font(),
            )
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(true)
}

/// Load the stored result table and chart it
///
/// With `team` set only that team is drawn, otherwise every team. A missing
/// result file or an empty selection logs a warning and returns `Ok(None)`.
pub fn plot_from_store(
    store: &ResultStore,
    team: Option<&str>,
    measure: Measure,
    output: &Path,
) -> Result<Option<PathBuf>> {
    if !store.exists() {
        log_warning(
            "Result table does not exist, compute the measures first",
            Some(store.path()),
        );
        return Ok(None);
    }

    let table = store.load_existing()?;
    let drawn = match team {
        Some(team) => plot_team(&table, team, measure, output)?,
        None => plot_all_teams(&table, measure, output)?,
    };

    if drawn {
        log::info!("Saved chart to {}", output.display());
        Ok(Some(output.to_path_buf()))
    } else {
        Ok(None)
    }
}
