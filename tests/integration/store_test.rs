use cap_inequality::{AppendPolicy, InequalityError, Measure, ResultStore, ResultTable};

use crate::utils::{gini_result, read_results, temp_dir};

#[test]
fn test_missing_store_loads_empty() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);

    assert!(!store.exists());
    assert!(store.load().unwrap().is_empty());
    assert!(matches!(
        store.load_existing(),
        Err(InequalityError::MissingInput(_))
    ));
}

#[test]
fn test_parquet_round_trip() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    let mut row = gini_result("TOR", 2024, 0.4417, 0.4638, 21);
    row.ortega_gamma = Some(1.0231);
    let table = ResultTable::from_rows(vec![row, gini_result("MTL", 2024, 0.3912, 0.4108, 21)]);

    store.save(&table).unwrap();
    assert_eq!(store.load_existing().unwrap(), table);
}

#[test]
fn test_csv_fixed_point() {
    let dir = temp_dir();
    let path = dir.path().join("results.csv");
    let store = ResultStore::new(&path, 4);
    store
        .save(&ResultTable::from_rows(vec![gini_result(
            "ANA", 2024, 0.25, 0.4167, 4,
        )]))
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Team,Year,Raw Gini,Adjusted Gini,Roster Size")
    );
    assert_eq!(lines.next(), Some("ANA,2024,0.2500,0.4167,4"));

    let restored = read_results(&path);
    assert_eq!(restored.rows()[0].raw_gini, Some(0.25));
    assert_eq!(restored.rows()[0].roster_size, Some(4));
}

#[test]
fn test_append_upsert_replaces_key() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);

    store
        .append(
            [
                gini_result("BOS", 2024, 0.5, 0.52, 25),
                gini_result("BUF", 2024, 0.4, 0.42, 25),
            ],
            AppendPolicy::Upsert,
        )
        .unwrap();
    let table = store
        .append([gini_result("BOS", 2024, 0.6, 0.62, 25)], AppendPolicy::Upsert)
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.find("BOS", 2024).unwrap().raw_gini, Some(0.6));
    assert_eq!(store.load_existing().unwrap(), table);
}

#[test]
fn test_append_policy_keeps_duplicates() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);

    store
        .append([gini_result("CAR", 2024, 0.5, 0.52, 23)], AppendPolicy::Append)
        .unwrap();
    let table = store
        .append([gini_result("CAR", 2024, 0.5, 0.52, 23)], AppendPolicy::Append)
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.series("CAR", Measure::RawGini).len(), 2);
}

#[test]
fn test_save_replaces_atomically() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.parquet"), 4);
    store
        .save(&ResultTable::from_rows(vec![gini_result(
            "DAL", 2023, 0.3, 0.31, 22,
        )]))
        .unwrap();
    store
        .save(&ResultTable::from_rows(vec![gini_result(
            "DAL", 2024, 0.35, 0.36, 22,
        )]))
        .unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
    let table = store.load_existing().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].year, 2024);
}

#[test]
fn test_unsupported_extension() {
    let dir = temp_dir();
    let store = ResultStore::new(dir.path().join("results.xlsx"), 4);
    let err = store.save(&ResultTable::new()).unwrap_err();
    assert!(matches!(err, InequalityError::UnsupportedFormat(_)));
}
