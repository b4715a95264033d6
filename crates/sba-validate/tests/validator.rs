use sba_map::{clean_record, registry};
use sba_model::{
    ConversionOptions, DocumentKind, IssueCategory, Record, Severity, ValidationIssue,
    ValidationReport,
};
use sba_validate::Validator;

fn complete_row() -> Record {
    Record::from_pairs(
        2,
        [
            ("Contact ID", "C-1"),
            ("Activity ID", "A-1"),
            ("Last Name", "Rivera"),
            ("First Name", "Ana"),
            ("Email", "ana@example.org"),
            ("Race", "Asian"),
            ("Date", "11/02/2023"),
            ("Name of Counselor", "Sam Lee"),
            ("Services Provided", "Business Plan"),
            ("Type of Session", "Telephone"),
            ("Duration (hours)", "1"),
            ("Currently In Business?", "No"),
        ],
    )
}

fn issues_for(record: &Record) -> Vec<ValidationIssue> {
    let registry = registry(DocumentKind::Counseling).expect("registry");
    let options = ConversionOptions::default();
    let cleaned = clean_record(&registry, &options, record);
    Validator::new(&registry, &options).validate(&cleaned)
}

fn find<'a>(issues: &'a [ValidationIssue], field: &str) -> Option<&'a ValidationIssue> {
    issues.iter().find(|issue| issue.field == field)
}

#[test]
fn complete_row_has_no_issues() {
    let issues = issues_for(&complete_row());
    assert!(issues.is_empty(), "unexpected issues: {issues:#?}");
}

#[test]
fn missing_contact_id_is_an_error_on_positional_row() {
    let record = Record::from_pairs(
        7,
        complete_row()
            .columns()
            .filter(|(column, _)| *column != "Contact ID")
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect::<Vec<_>>(),
    );
    let issues = issues_for(&record);
    let issue = find(&issues, "Contact ID").expect("contact id issue");
    assert_eq!(issue.category, IssueCategory::MissingRequired);
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.row_id.as_str(), "Row_7");
}

#[test]
fn defaulted_required_values_are_warnings() {
    let record = complete_row().with_field("Type of Session", "");
    let issues = issues_for(&record);
    let issue = find(&issues, "Type of Session").expect("session issue");
    assert_eq!(issue.severity, Severity::Warning);
    assert!(issue.message.contains("default 'Telephone'"));
}

#[test]
fn conditional_requirement_follows_military_status() {
    let veteran = complete_row().with_field("Veteran Status", "Veteran");
    let issues = issues_for(&veteran);
    let issue = find(&issues, "Branch Of Service").expect("branch issue");
    assert_eq!(issue.severity, Severity::Error);

    let civilian = complete_row().with_field("Veteran Status", "Civilian");
    assert!(find(&issues_for(&civilian), "Branch Of Service").is_none());

    let unfamiliar = complete_row().with_field("Veteran Status", "Yes");
    let unfamiliar_issues = issues_for(&unfamiliar);
    let issue = find(&unfamiliar_issues, "Branch Of Service").expect("branch issue");
    assert_eq!(issue.category, IssueCategory::MissingRequired);
    assert_eq!(issue.severity, Severity::Error);
}

#[test]
fn cleaning_flags_become_warnings_on_source_column() {
    let record = complete_row()
        .with_field("Contact: Phone", "555-01")
        .with_field("Date", "sometime");
    let issues = issues_for(&record);

    let phone = find(&issues, "Contact: Phone").expect("phone issue");
    assert_eq!(phone.category, IssueCategory::BadFormat);
    assert_eq!(phone.severity, Severity::Warning);

    let dates: Vec<_> = issues.iter().filter(|issue| issue.field == "Date").collect();
    assert!(dates.iter().any(|issue| issue.category == IssueCategory::BadFormat));
    assert!(
        dates
            .iter()
            .any(|issue| issue.category == IssueCategory::MissingRequired
                && issue.severity == Severity::Error)
    );
}

#[test]
fn format_and_range_rules() {
    let record = complete_row()
        .with_field("Email", "ana at example")
        .with_field("Date", "2023-09-30");
    let issues = issues_for(&record);
    assert_eq!(
        find(&issues, "Email").map(|issue| issue.category),
        Some(IssueCategory::BadFormat)
    );
    assert_eq!(
        find(&issues, "Date").map(|issue| issue.category),
        Some(IssueCategory::OutOfRange)
    );
}

#[test]
fn contact_session_without_hours() {
    let record = complete_row().with_field("Duration (hours)", "0");
    let issues = issues_for(&record);
    let issue = find(&issues, "Duration (hours)").expect("hours issue");
    assert_eq!(issue.category, IssueCategory::OutOfRange);

    let update = complete_row()
        .with_field("Duration (hours)", "0")
        .with_field("Type of Session", "Update Only");
    assert!(find(&issues_for(&update), "Duration (hours)").is_none());
}

#[test]
fn other_code_without_detail_is_a_schema_risk() {
    let record = complete_row().with_field("Nature of the Counseling Seeking?", "Other");
    let issues = issues_for(&record);
    let issue = find(&issues, "Nature of the Counseling Seeking - Other Detail")
        .expect("detail issue");
    assert_eq!(issue.category, IssueCategory::SchemaViolationRisk);

    let detailed = record.with_field(
        "Nature of the Counseling Seeking - Other Detail",
        "Grant writing",
    );
    assert!(
        issues_for(&detailed)
            .iter()
            .all(|issue| issue.category != IssueCategory::SchemaViolationRisk)
    );
}

#[test]
fn validate_into_appends_to_report() {
    let registry = registry(DocumentKind::Counseling).expect("registry");
    let options = ConversionOptions::default();
    let validator = Validator::new(&registry, &options);
    let mut report = ValidationReport::new();
    for record in [complete_row(), complete_row().with_field("Activity ID", "")] {
        let cleaned = clean_record(&registry, &options, &record);
        validator.validate_into(&cleaned, &mut report);
        report.record_processed();
    }
    assert_eq!(report.rows_processed(), 2);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.rows_with_issues(), 1);
}
