use cap_inequality::{AppendPolicy, Measure, ResultStore, plot_from_store};

use crate::utils::{gini_result, temp_dir};

#[test]
fn test_plot_missing_store_is_skipped() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    let output = dir.path().join("chart.svg");

    let drawn = plot_from_store(&store, None, Measure::RawGini, &output).unwrap();
    assert!(drawn.is_none());
    assert!(!output.exists());
}

#[test]
fn test_plot_all_teams_and_single_team() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    store
        .append(
            [
                gini_result("NYR", 2022, 0.41, 0.43, 22),
                gini_result("NYR", 2023, 0.44, 0.46, 22),
                gini_result("NYI", 2023, 0.39, 0.41, 23),
            ],
            AppendPolicy::Upsert,
        )
        .unwrap();

    let all = dir.path().join("all.svg");
    let drawn = plot_from_store(&store, None, Measure::AdjustedGini, &all).unwrap();
    assert_eq!(drawn.as_deref(), Some(all.as_path()));
    let svg = std::fs::read_to_string(&all).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("NYI"));

    let team = dir.path().join("nyr.svg");
    let drawn = plot_from_store(&store, Some("NYR"), Measure::RawGini, &team).unwrap();
    assert!(drawn.is_some());
    assert!(std::fs::read_to_string(&team).unwrap().contains("0.440"));
}

#[test]
fn test_plot_measure_not_computed() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    store
        .append([gini_result("NYR", 2022, 0.41, 0.43, 22)], AppendPolicy::Upsert)
        .unwrap();

    let output = dir.path().join("ortega.svg");
    let drawn = plot_from_store(&store, None, Measure::OrtegaGamma, &output).unwrap();
    assert!(drawn.is_none());

    let drawn = plot_from_store(&store, Some("SEA"), Measure::RawGini, &output).unwrap();
    assert!(drawn.is_none());
}
