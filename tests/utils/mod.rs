use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::record_batch::RecordBatch;
use cap_inequality::utils::io::write_table;
use cap_inequality::{
    InequalityResult, ResultTable, SalaryRecord, SourceColumns, utils::io::read_table,
};

/// A fresh temporary directory for one test
#[must_use]
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Salary rows as a record batch with the default source column names
#[must_use]
pub fn salary_batch(records: &[SalaryRecord]) -> RecordBatch {
    let schema = SalaryRecord::schema(&SourceColumns::default());
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.team.as_str()),
        )),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.year))),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| r.cap_hit),
        )),
    ];
    RecordBatch::try_new(Arc::new(schema), columns).expect("salary batch")
}

/// Write salary rows to `dir/name`, as Parquet or CSV by extension
pub fn write_salaries(dir: &Path, name: &str, records: &[SalaryRecord]) -> PathBuf {
    let path = dir.join(name);
    write_table(&path, &salary_batch(records), 2).expect("write salaries");
    path
}

/// Four ANA rows and two BOS rows for 2024
#[must_use]
pub fn season_2024() -> Vec<SalaryRecord> {
    vec![
        SalaryRecord::new("ANA", 2024, 10.0),
        SalaryRecord::new("ANA", 2024, 20.0),
        SalaryRecord::new("ANA", 2024, 30.0),
        SalaryRecord::new("ANA", 2024, 40.0),
        SalaryRecord::new("BOS", 2024, 5.0),
        SalaryRecord::new("BOS", 2024, 5.0),
    ]
}

/// A result row carrying only Gini values
#[must_use]
pub fn gini_result(team: &str, year: i32, raw: f64, adjusted: f64, n: usize) -> InequalityResult {
    InequalityResult {
        raw_gini: Some(raw),
        adjusted_gini: Some(adjusted),
        roster_size: Some(n),
        ..InequalityResult::new(team, year)
    }
}

/// Read a result file straight from disk
#[must_use]
pub fn read_results(path: &Path) -> ResultTable {
    let batches = read_table(path).expect("read results");
    ResultTable::from_record_batches(&batches, path).expect("decode results")
}
