//! Cross-field checks for counseling records.

use sba_map::{MappingRegistry, counseling};
use sba_model::{CleanedRecord, ConversionOptions, IssueCategory, ValidationIssue};
use sba_transform::{NO_CONTACT_SESSION_TYPES, parse_f64};

use super::field_name;

/// A check spanning more than one field.
#[derive(Debug, Clone, Copy)]
pub struct CrossFieldRule {
    pub name: &'static str,
    pub check: fn(&MappingRegistry, &ConversionOptions, &CleanedRecord) -> Option<ValidationIssue>,
}

pub static COUNSELING_RULES: &[CrossFieldRule] = &[
    CrossFieldRule {
        name: "contact hours for contact sessions",
        check: contact_hours,
    },
    CrossFieldRule {
        name: "other counseling sought needs detail",
        check: seeking_other_detail,
    },
    CrossFieldRule {
        name: "other legal entity needs detail",
        check: legal_entity_other_detail,
    },
];

/// Sessions with client contact must log contact time.
fn contact_hours(
    registry: &MappingRegistry,
    options: &ConversionOptions,
    cleaned: &CleanedRecord,
) -> Option<ValidationIssue> {
    let session = cleaned
        .text(counseling::SESSION_TYPE)
        .unwrap_or(options.session_type.as_str());
    if NO_CONTACT_SESSION_TYPES.contains(&session) {
        return None;
    }
    let hours = cleaned
        .text(counseling::CONTACT_HOURS)
        .and_then(parse_f64)
        .unwrap_or(0.0);
    if hours > 0.0 {
        return None;
    }
    Some(ValidationIssue::warning(
        IssueCategory::OutOfRange,
        cleaned.row_index(),
        cleaned.row_id().clone(),
        field_name(registry, cleaned, counseling::CONTACT_HOURS),
        format!("{session} session has no contact hours"),
    ))
}

fn seeking_other_detail(
    registry: &MappingRegistry,
    _options: &ConversionOptions,
    cleaned: &CleanedRecord,
) -> Option<ValidationIssue> {
    other_without_detail(
        registry,
        cleaned,
        counseling::SEEKING_CODE,
        counseling::SEEKING_OTHER,
    )
}

fn legal_entity_other_detail(
    registry: &MappingRegistry,
    _options: &ConversionOptions,
    cleaned: &CleanedRecord,
) -> Option<ValidationIssue> {
    other_without_detail(
        registry,
        cleaned,
        counseling::LEGAL_ENTITY_CODE,
        counseling::LEGAL_ENTITY_OTHER,
    )
}

/// A code of `Other` without its free-text companion risks schema rejection.
fn other_without_detail(
    registry: &MappingRegistry,
    cleaned: &CleanedRecord,
    code_path: &str,
    other_path: &str,
) -> Option<ValidationIssue> {
    if !registry.is_applicable(code_path, cleaned) || !cleaned.is_absent(other_path) {
        return None;
    }
    let has_other = cleaned
        .value(code_path)
        .values()
        .iter()
        .any(|code| code.eq_ignore_ascii_case("other"));
    has_other.then(|| {
        ValidationIssue::warning(
            IssueCategory::SchemaViolationRisk,
            cleaned.row_index(),
            cleaned.row_id().clone(),
            field_name(registry, cleaned, other_path),
            "code 'Other' given without a description",
        )
    })
}
