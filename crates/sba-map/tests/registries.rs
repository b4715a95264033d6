use sba_map::{Requirement, clean_record, counseling, registry, training};
use sba_model::{CleanedValue, ConversionOptions, DocumentKind, Record};

fn counseling_row() -> Record {
    Record::from_pairs(
        1,
        [
            ("Contact ID", "C-100"),
            ("Last Name", "Rivera"),
            ("First Name", "Ana"),
            ("Middle Name", "maria"),
            ("Contact: Phone", "(515) 555-0100"),
            ("Mailing Zip/Postal Code", "50312-1234"),
            ("Race", "Asian; White"),
            ("Veteran Status", "Veteran"),
            ("Currently In Business?", "yes"),
            ("Type of Session", "Phone"),
        ],
    )
}

#[test]
fn both_registries_validate() {
    for kind in [DocumentKind::Counseling, DocumentKind::Training] {
        let registry = registry(kind).expect("registry");
        assert_eq!(registry.kind(), kind);
        assert!(!registry.is_empty());
        assert!(registry.contract().is_group(registry.record_root().path));
    }
}

#[test]
fn counseling_record_parts_are_ordered() {
    let registry = registry(DocumentKind::Counseling).expect("registry");
    assert_eq!(registry.document_root(), counseling::DOCUMENT_ROOT);
    assert_eq!(registry.record_root().path, counseling::RECORD_ROOT);

    let group = registry.contract().group("CounselingRecord").expect("group");
    assert_eq!(
        group.children(),
        vec![
            "PartnerClientNumber",
            "Location",
            "ClientRequest",
            "ClientIntake",
            "CounselorRecord"
        ]
    );
    assert_eq!(
        registry.contract().order_of(counseling::DOCUMENT_ROOT, "CounselingRecord"),
        Some(0)
    );

    let first = registry.fields()[0];
    assert_eq!(first.path, "CounselingRecord/PartnerClientNumber");
    assert_eq!(first.requirement, Requirement::Required);
}

#[test]
fn shared_group_names_agree() {
    let registry = registry(DocumentKind::Counseling).expect("registry");
    let country = registry.contract().group("Country").expect("country");
    assert_eq!(country.children(), vec!["Code"]);
    let hours = registry.contract().group("CounselingHours").expect("hours");
    assert_eq!(hours.children(), vec!["Contact", "Prepare", "Travel"]);
}

#[test]
fn counseling_row_is_cleaned() {
    let registry = registry(DocumentKind::Counseling).expect("registry");
    let options = ConversionOptions::default();
    let cleaned = clean_record(&registry, &options, &counseling_row());

    assert_eq!(cleaned.row_id().as_str(), "C-100");
    assert_eq!(
        cleaned.text("CounselingRecord/ClientRequest/PhonePart1/Primary"),
        Some("5155550100")
    );
    assert_eq!(
        cleaned.text("CounselingRecord/ClientRequest/AddressPart1/ZipCode"),
        Some("50312")
    );
    assert_eq!(
        cleaned.text("CounselingRecord/ClientRequest/AddressPart1/Zip4Code"),
        Some("1234")
    );
    assert_eq!(
        cleaned.text("CounselingRecord/ClientRequest/ClientNamePart1/Middle"),
        Some("M")
    );
    assert_eq!(
        cleaned.value("CounselingRecord/ClientIntake/Race/Code"),
        &CleanedValue::List(vec!["Asian".to_string(), "White".to_string()])
    );
    assert_eq!(cleaned.text(counseling::SESSION_TYPE), Some("Telephone"));
    let source = cleaned
        .field(counseling::SESSION_TYPE)
        .and_then(|field| field.source.as_deref());
    assert_eq!(source, Some("Type of Session"));
    assert!(cleaned.is_absent("CounselingRecord/ClientRequest/Email"));
}

#[test]
fn conditions_follow_cleaned_values() {
    let registry = registry(DocumentKind::Counseling).expect("registry");
    let options = ConversionOptions::default();

    let cleaned = clean_record(&registry, &options, &counseling_row());
    assert!(counseling::has_served(&cleaned));
    assert!(counseling::is_in_business(&cleaned));
    assert!(registry.is_applicable(counseling::BRANCH_OF_SERVICE, &cleaned));
    assert!(registry.is_applicable(counseling::LEGAL_ENTITY_CODE, &cleaned));
    assert!(!counseling::is_rural_or_urban(&cleaned));
    assert!(!registry.is_applicable(counseling::FIPS_CODE, &cleaned));

    let civilian = Record::from_pairs(
        2,
        [
            ("Contact ID", "C-200"),
            ("Veteran Status", "No military service"),
            ("Currently In Business?", "No"),
            ("Rural_vs_Urban", "Rural"),
        ],
    );
    let cleaned = clean_record(&registry, &options, &civilian);
    assert!(!counseling::has_served(&cleaned));
    assert!(!registry.is_applicable(counseling::BRANCH_OF_SERVICE, &cleaned));
    // LegalEntity/Code inherits the group's condition.
    assert!(!registry.is_applicable(counseling::LEGAL_ENTITY_CODE, &cleaned));
    assert!(registry.is_applicable(counseling::FIPS_CODE, &cleaned));
}

#[test]
fn unfamiliar_military_status_counts_as_service() {
    let registry = registry(DocumentKind::Counseling).expect("registry");
    let options = ConversionOptions::default();
    let served = |status: &str| {
        let record =
            Record::from_pairs(3, [("Contact ID", "C-300"), ("Veteran Status", status)]);
        counseling::has_served(&clean_record(&registry, &options, &record))
    };

    assert!(served("Yes"));
    assert!(served("Spouse of service member"));
    assert!(!served("Civilian"));
    assert!(!served("PREFER NOT TO SAY"));
    assert!(!served(""));
}

#[test]
fn training_number_trained_starts_with_total() {
    let registry = registry(DocumentKind::Training).expect("registry");
    assert_eq!(registry.id_source(), training::ID_SOURCE);
    let number_trained = registry.contract().group("NumberTrained").expect("group");
    let children = number_trained.children();
    assert_eq!(children.first(), Some(&"Total"));
    assert_eq!(children.last(), Some(&"Ethnicity"));
    assert_eq!(
        registry.contract().order_of("Race", "NorthAfrican"),
        Some(6)
    );
    let mapping = registry
        .mapping_for(training::NUMBER_TRAINED_TOTAL)
        .expect("total");
    assert_eq!(mapping.requirement, Requirement::Required);
}
