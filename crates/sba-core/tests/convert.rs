use std::fs;

use sba_core::{RunContext, convert_file, convert_records};
use sba_model::{ConversionOptions, DocumentKind, IssueCategory, Record, Severity};
use sba_xml::{order_violations, read_document};
use tempfile::TempDir;

const COUNSELING_CSV: &str = "\
Contact ID,Last Name,First Name,Email,Race,Date,Name of Counselor,Type of Session,Duration (hours),Currently In Business?
C-1,Rivera,Ana,ana@example.org,Asian,11/02/2023,Sam Lee,Telephone,1,No
,Lee,Kim,kim@example.org,White,11/03/2023,Sam Lee,Telephone,2,Yes
";

fn counseling() -> RunContext {
    RunContext::new(DocumentKind::Counseling, ConversionOptions::default()).expect("context")
}

fn training() -> RunContext {
    RunContext::new(DocumentKind::Training, ConversionOptions::default()).expect("context")
}

#[test]
fn counseling_file_converts_in_row_order() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("contacts.csv");
    let output = dir.path().join("out").join("counseling.xml");
    fs::write(&input, COUNSELING_CSV).expect("write csv");

    let ctx = counseling();
    let result = convert_file(&ctx, &input, &output).expect("convert");

    assert_eq!(result.document.name, "CounselingInformation");
    assert_eq!(result.record_count(), 2);
    assert_eq!(
        result.document.children[0].text_at("PartnerClientNumber"),
        Some("C-1")
    );
    assert_eq!(result.report.rows_processed(), 2);

    let missing_id = result
        .report
        .issues()
        .iter()
        .find(|issue| issue.field == "Contact ID")
        .expect("missing id issue");
    assert_eq!(missing_id.severity, Severity::Error);
    assert_eq!(missing_id.row_id.as_str(), "Row_2");

    let written = read_document(&output).expect("read back");
    assert_eq!(written, result.document);
    assert!(order_violations(&written, ctx.registry.contract()).is_empty());
}

const COMPLETE_CSV: &str = "\
Contact ID,Activity ID,Last Name,First Name,Race,Date,Name of Counselor,Services Provided,Type of Session,Duration (hours),Currently In Business?
C-1,A-1,Rivera,Ana,Asian,11/02/2023,Sam Lee,Business Plan,Telephone,1,No
C-2,,Lee,Kim,White,11/03/2023,Sam Lee,Business Plan,Telephone,2,No
C-3,A-3,Park,Jo,Black,11/04/2023,Sam Lee,Business Plan,Telephone,1,No
";

#[test]
fn one_missing_value_yields_one_issue_on_its_row() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("contacts.csv");
    let output = dir.path().join("counseling.xml");
    fs::write(&input, COMPLETE_CSV).expect("write csv");

    let result = convert_file(&counseling(), &input, &output).expect("convert");
    assert_eq!(result.record_count(), 3);
    assert_eq!(result.report.rows_processed(), 3);

    let missing: Vec<_> = result
        .report
        .issues()
        .iter()
        .filter(|issue| issue.category == IssueCategory::MissingRequired)
        .collect();
    assert_eq!(missing.len(), 1, "unexpected issues: {missing:#?}");
    assert_eq!(missing[0].row_id.as_str(), "C-2");
    assert_eq!(missing[0].row_index, 2);
    assert_eq!(missing[0].field, "Activity ID");
    assert_eq!(missing[0].severity, Severity::Error);
    assert_eq!(result.report.rows_with_issues(), 1);

    let third = &result.document.children[2];
    assert_eq!(
        third.text_at("CounselorRecord/PartnerSessionNumber"),
        Some("A-3")
    );
}

#[test]
fn sessions_of_one_contact_count_as_separate_rows() {
    let rows: Vec<Record> = (1..=2)
        .map(|row| {
            Record::new(row)
                .with_field("Contact ID", "C-1")
                .with_field("Last Name", "Rivera")
                .with_field("First Name", "Ana")
                .with_field("Date", "11/02/2023")
        })
        .collect();

    let result = convert_records(&counseling(), &rows);
    assert_eq!(result.report.rows_processed(), 2);
    assert_eq!(result.report.rows_with_issues(), 2);
    assert_eq!(result.report.summary().rows_with_issues, 2);

    let rows_missing_activity: Vec<_> = result
        .report
        .issues()
        .iter()
        .filter(|issue| issue.field == "Activity ID")
        .map(|issue| (issue.row_index, issue.row_id.as_str()))
        .collect();
    assert_eq!(rows_missing_activity, vec![(1, "C-1"), (2, "C-1")]);
}

#[test]
fn worker_count_does_not_change_the_result() {
    let rows: Vec<Record> = (1..=40)
        .map(|row| {
            Record::new(row)
                .with_field("Contact ID", format!("C-{row}"))
                .with_field("Last Name", if row % 3 == 0 { "" } else { "Rivera" })
                .with_field("Email", if row % 5 == 0 { "broken" } else { "a@b.org" })
                .with_field("Date", "11/02/2023")
        })
        .collect();

    let sequential = convert_records(&counseling().with_jobs(Some(1)), &rows);
    let parallel = convert_records(&counseling().with_jobs(Some(4)), &rows);
    assert_eq!(sequential.document, parallel.document);
    assert_eq!(sequential.report.issues(), parallel.report.issues());

    let ids: Vec<_> = parallel
        .document
        .children
        .iter()
        .filter_map(|record| record.text_at("PartnerClientNumber"))
        .collect();
    let expected: Vec<_> = (1..=40).map(|row| format!("C-{row}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn training_rows_roll_up_per_event() {
    let rows = vec![
        Record::new(1)
            .with_field("Class/Event ID", "E-1")
            .with_field("Class/Event Name", "Bookkeeping Basics")
            .with_field("Gender", "Female")
            .with_field("Race", "Asian"),
        Record::new(2)
            .with_field("Class/Event ID", "E-2")
            .with_field("Gender", "Male"),
        Record::new(3)
            .with_field("Class/Event ID", "E-1")
            .with_field("Gender", "Female")
            .with_field("Race", "White"),
        Record::new(4).with_field("Gender", "Male"),
    ];

    let result = convert_records(&training(), &rows);
    assert_eq!(result.document.name, "ManagementTrainingReport");
    assert_eq!(result.record_count(), 2);
    assert_eq!(result.report.rows_processed(), 2);

    let first = &result.document.children[0];
    assert_eq!(first.text_at("PartnerTrainingNumber"), Some("E-1"));
    assert_eq!(first.text_at("TrainingTitle"), Some("Bookkeeping Basics"));
    assert_eq!(first.text_at("NumberTrained/Total"), Some("2"));
    assert_eq!(first.text_at("NumberTrained/Female"), Some("2"));
    assert_eq!(first.text_at("NumberTrained/Race/Asian"), Some("1"));
    assert!(first.find("NumberTrained/Male").is_none());

    // A single attendee is still reported at the schema minimum.
    let second = &result.document.children[1];
    assert_eq!(second.text_at("NumberTrained/Total"), Some("2"));

    let skipped = result
        .report
        .issues()
        .iter()
        .find(|issue| issue.row_id.as_str() == "Row_4")
        .expect("row without event");
    assert_eq!(skipped.category, IssueCategory::MissingRequired);
    assert_eq!(skipped.severity, Severity::Error);
    assert_eq!(skipped.field, "Class/Event ID");
}

#[test]
fn unreadable_rows_are_counted_as_input_defects() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("contacts.csv");
    let output = dir.path().join("counseling.xml");
    let mut bytes = COUNSELING_CSV.as_bytes().to_vec();
    bytes.extend_from_slice(b"C-3,");
    bytes.extend_from_slice(&[0xff]);
    bytes.extend_from_slice(b",Jo\n");
    fs::write(&input, bytes).expect("write csv");

    let result = convert_file(&counseling(), &input, &output).expect("convert");
    assert_eq!(result.record_count(), 2);
    assert_eq!(result.report.input_defects().len(), 1);
    assert_eq!(result.report.input_defects()[0].row_index, 3);
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = convert_file(
        &counseling(),
        &dir.path().join("missing.csv"),
        &dir.path().join("out.xml"),
    )
    .expect_err("missing file");
    assert!(format!("{err:#}").contains("missing.csv"));
    assert!(!dir.path().join("out.xml").exists());
}
