use std::fs;

use sba_model::{IssueCategory, RowId, ValidationIssue, ValidationReport};
use sba_report::{write_issues_csv, write_summary_json};
use tempfile::TempDir;

fn sample_report() -> ValidationReport {
    let mut report = ValidationReport::new();
    report.push(ValidationIssue::error(
        IssueCategory::MissingRequired,
        1,
        RowId::positional(1),
        "Contact ID",
        "required value is missing",
    ));
    report.record_processed();
    report.push(ValidationIssue::warning(
        IssueCategory::BadFormat,
        2,
        RowId::new("C-2"),
        "Email",
        "not an email address, \"x\"",
    ));
    report.record_processed();
    report.record_input_defect(3, "invalid UTF-8 in column 'Email'");
    report
}

#[test]
fn issues_csv_lists_issues_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_issues_csv(&sample_report(), &dir.path().join("reports"))
        .expect("write")
        .expect("issues file");

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("validation_issues_") && name.ends_with(".csv"));

    let mut reader = csv::Reader::from_path(&path).expect("open");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["row_id", "severity", "category", "field", "message"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.expect("row")).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Row_1");
    assert_eq!(&rows[0][1], "error");
    assert_eq!(&rows[1][0], "C-2");
    assert_eq!(&rows[1][4], "not an email address, \"x\"");
}

#[test]
fn clean_run_writes_no_issues_file() {
    let dir = TempDir::new().expect("temp dir");
    let mut report = ValidationReport::new();
    report.record_processed();
    assert!(write_issues_csv(&report, dir.path()).expect("write").is_none());
    assert_eq!(fs::read_dir(dir.path()).expect("list").count(), 0);
}

#[test]
fn summary_json_carries_counts_and_defects() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_summary_json(&sample_report(), dir.path()).expect("write");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");

    assert_eq!(value["schema"], "sba-convert.run-summary");
    assert_eq!(value["rows_processed"], 2);
    assert_eq!(value["rows_with_issues"], 2);
    assert_eq!(value["errors"], 1);
    assert_eq!(value["warnings"], 1);
    assert_eq!(value["input_defects"], 1);
    assert_eq!(value["unreadable_rows"][0]["row_index"], 3);
}
