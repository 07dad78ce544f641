use cap_inequality::algorithm::round_to;
use cap_inequality::{
    AppendPolicy, ExtensionMeasure, ExtensionOptions, InequalityAggregator, InequalityError,
    ResultStore, SalaryRecord, SalaryTable, SourceColumns, atkinson, extend_with_measure,
};

use crate::utils::{gini_result, read_results, season_2024, temp_dir, write_salaries};

fn options(columns: &SourceColumns) -> ExtensionOptions<'_> {
    ExtensionOptions {
        columns,
        decimals: 4,
        show_progress: false,
    }
}

#[test]
fn test_gini_from_parquet_source() {
    let dir = temp_dir();
    let source = write_salaries(dir.path(), "LWCH_202425.parquet", &season_2024());
    let salaries = SalaryTable::load(&source, &SourceColumns::default()).unwrap();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);

    let summary = InequalityAggregator::new(&salaries, 4)
        .append_gini(&store, &["ANA", "SEA", "BOS"], AppendPolicy::Upsert)
        .unwrap();
    assert_eq!(summary.written.len(), 2);
    assert_eq!(summary.skipped, vec!["SEA".to_string()]);

    let table = store.load_existing().unwrap();
    let ana = table.find("ANA", 2024).unwrap();
    assert_eq!(ana.raw_gini, Some(0.25));
    assert_eq!(ana.adjusted_gini, Some(0.4167));
    assert_eq!(ana.roster_size, Some(4));
    assert_eq!(table.find("BOS", 2024).unwrap().raw_gini, Some(0.0));
}

#[test]
fn test_gini_without_data_leaves_store_untouched() {
    let dir = temp_dir();
    let salaries = SalaryTable::new(season_2024()).unwrap();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);

    let summary = InequalityAggregator::new(&salaries, 4)
        .append_gini(&store, &["SEA", "VGK"], AppendPolicy::Upsert)
        .unwrap();
    assert!(summary.written.is_empty());
    assert!(!store.exists());
}

#[test]
fn test_rerun_gini_is_idempotent_under_upsert() {
    let dir = temp_dir();
    let salaries = SalaryTable::new(season_2024()).unwrap();
    let store = ResultStore::new(dir.path().join("results.csv"), 4);
    let aggregator = InequalityAggregator::new(&salaries, 4);

    aggregator
        .append_gini(&store, &["ANA", "BOS"], AppendPolicy::Upsert)
        .unwrap();
    let first = std::fs::read(store.path()).unwrap();
    aggregator
        .append_gini(&store, &["ANA", "BOS"], AppendPolicy::Upsert)
        .unwrap();
    let second = std::fs::read(store.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_extend_with_ortega_over_csv_folder() {
    let dir = temp_dir();
    let folder = dir.path().join("seasons");
    std::fs::create_dir(&folder).unwrap();
    write_salaries(&folder, "LWCH_202324.csv", &[
        SalaryRecord::new("ANA", 2023, 1.0),
        SalaryRecord::new("ANA", 2023, 1.0),
    ]);
    write_salaries(&folder, "LWCH_202425.csv", &season_2024());
    std::fs::write(folder.join("notes.txt"), "ignored").unwrap();

    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    store
        .append(
            [
                gini_result("ANA", 2024, 0.25, 0.4167, 4),
                gini_result("ANA", 2023, 0.0, 0.0, 2),
                gini_result("SEA", 2024, 0.3, 0.31, 22),
            ],
            AppendPolicy::Upsert,
        )
        .unwrap();

    let columns = SourceColumns::default();
    let summary = extend_with_measure(
        &store,
        &folder,
        ExtensionMeasure::OrtegaGamma,
        &options(&columns),
    )
    .unwrap();
    assert_eq!(summary.files, 2);
    assert_eq!(summary.matched_rows, 2);
    assert_eq!(summary.unmatched_rows, 1);

    let table = store.load_existing().unwrap();
    assert_eq!(table.find("ANA", 2024).unwrap().ortega_gamma, Some(0.2667));
    assert_eq!(table.find("ANA", 2023).unwrap().ortega_gamma, Some(0.0));
    assert_eq!(table.find("SEA", 2024).unwrap().ortega_gamma, Some(0.0));
    assert_eq!(table.find("ANA", 2024).unwrap().raw_gini, Some(0.25));
}

#[test]
fn test_extend_with_atkinson_is_idempotent() {
    let dir = temp_dir();
    let folder = dir.path().join("seasons");
    std::fs::create_dir(&folder).unwrap();
    write_salaries(&folder, "LWCH_202425.parquet", &season_2024());

    let store = ResultStore::new(dir.path().join("results.csv"), 4);
    store
        .append(
            [gini_result("ANA", 2024, 0.25, 0.4167, 4)],
            AppendPolicy::Upsert,
        )
        .unwrap();

    let columns = SourceColumns::default();
    let measure = ExtensionMeasure::Atkinson { epsilon: 0.5 };
    extend_with_measure(&store, &folder, measure, &options(&columns)).unwrap();
    let first = std::fs::read(store.path()).unwrap();
    extend_with_measure(&store, &folder, measure, &options(&columns)).unwrap();
    let second = std::fs::read(store.path()).unwrap();
    assert_eq!(first, second);

    let expected = round_to(atkinson(&[10.0, 20.0, 30.0, 40.0], 0.5).unwrap(), 4);
    let table = read_results(store.path());
    assert_eq!(table.rows()[0].atkinson_index, Some(expected));
    assert_eq!(table.rows()[0].ortega_gamma, None);
}

#[test]
fn test_later_file_wins_for_duplicate_group() {
    let dir = temp_dir();
    let folder = dir.path().join("seasons");
    std::fs::create_dir(&folder).unwrap();
    write_salaries(&folder, "a.csv", &[
        SalaryRecord::new("BOS", 2024, 5.0),
        SalaryRecord::new("BOS", 2024, 5.0),
    ]);
    write_salaries(&folder, "b.csv", &[
        SalaryRecord::new("BOS", 2024, 10.0),
        SalaryRecord::new("BOS", 2024, 30.0),
    ]);

    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    store
        .append([gini_result("BOS", 2024, 0.0, 0.0, 2)], AppendPolicy::Upsert)
        .unwrap();

    let columns = SourceColumns::default();
    extend_with_measure(
        &store,
        &folder,
        ExtensionMeasure::OrtegaGamma,
        &options(&columns),
    )
    .unwrap();

    // mean 20: (0.25 + 0.25) / 1
    let table = store.load_existing().unwrap();
    assert_eq!(table.rows()[0].ortega_gamma, Some(0.5));
}

#[test]
fn test_extend_requires_existing_results() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("missing.parquet"), 4);
    let columns = SourceColumns::default();

    let err = extend_with_measure(
        &store,
        dir.path(),
        ExtensionMeasure::OrtegaGamma,
        &options(&columns),
    )
    .unwrap_err();
    assert!(matches!(err, InequalityError::MissingInput(_)));
    assert!(!store.exists());
}

#[test]
fn test_extend_requires_existing_folder() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    store
        .append([gini_result("BOS", 2024, 0.0, 0.0, 2)], AppendPolicy::Upsert)
        .unwrap();
    let columns = SourceColumns::default();

    let err = extend_with_measure(
        &store,
        &dir.path().join("nowhere"),
        ExtensionMeasure::OrtegaGamma,
        &options(&columns),
    )
    .unwrap_err();
    assert!(matches!(err, InequalityError::MissingInput(_)));
}
