use cap_inequality::{SalaryRecord, SalaryTable, SourceColumns, TeamSalarySummary, write_summary};

use crate::utils::{temp_dir, write_salaries};

#[test]
fn test_summary_csv_output() {
    let dir = temp_dir();
    let source = write_salaries(dir.path(), "LWCH_201516.parquet", &[
        SalaryRecord::new("WPG", 2015, 1_000_000.0),
        SalaryRecord::new("WPG", 2015, 3_000_000.0),
        SalaryRecord::new("ANA", 2015, 925_000.0),
        SalaryRecord::new("ANA", 2015, 950_000.0),
    ]);
    let salaries = SalaryTable::load(&source, &SourceColumns::default()).unwrap();
    let summaries = TeamSalarySummary::from_table(&salaries, 2);

    let output = dir.path().join("salary_stats_by_team.csv");
    write_summary(&output, &summaries, 2).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "Team,Average_Cap_Hit,Salary_Variation_PopSD");
    assert_eq!(lines[1], "ANA,937500.00,12500.00");
    assert_eq!(lines[2], "WPG,2000000.00,1000000.00");
}

#[test]
fn test_source_with_custom_columns_and_bad_rows() {
    let dir = temp_dir();
    let path = dir.path().join("cap.csv");
    std::fs::write(
        &path,
        "Club,Season,Hit\nTOR,2024,1000\nTOR,2024,\nTOR,2024,-5\nTOR,2024,3000\n",
    )
    .unwrap();

    let columns = SourceColumns {
        team: "Club".to_string(),
        year: "Season".to_string(),
        cap_hit: "Hit".to_string(),
    };
    let salaries = SalaryTable::load(&path, &columns).unwrap();
    assert_eq!(salaries.len(), 2);

    let summaries = TeamSalarySummary::from_table(&salaries, 2);
    assert_eq!(summaries[0].average_cap_hit, 2000.0);
}

#[test]
fn test_source_missing_column() {
    let dir = temp_dir();
    let path = dir.path().join("cap.csv");
    std::fs::write(&path, "Team,Year\nTOR,2024\n").unwrap();

    let err = SalaryTable::load(&path, &SourceColumns::default()).unwrap_err();
    assert!(matches!(
        err,
        cap_inequality::InequalityError::MissingColumn { ref column, .. } if column == "Cap Hit"
    ));
}
