//! Missing required and recommended values.

use sba_map::{MappingRegistry, Requirement};
use sba_model::{CleanedRecord, ConversionOptions, IssueCategory, Severity, ValidationIssue};

use super::field_name;

/// Reports every applicable required or recommended field whose cleaned
/// value is absent.
///
/// A required field without a fallback is an error; with a fallback the
/// default is written and the finding is a warning. Recommended fields are
/// always warnings.
pub fn check(
    registry: &MappingRegistry,
    options: &ConversionOptions,
    cleaned: &CleanedRecord,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for mapping in registry.fields() {
        if mapping.requirement == Requirement::Optional || !cleaned.is_absent(mapping.path) {
            continue;
        }
        if !registry.is_applicable(mapping.path, cleaned) {
            continue;
        }

        let field = field_name(registry, cleaned, mapping.path);
        let default = mapping
            .fallback
            .map(|fallback| fallback.resolve(options, cleaned.row_id()));
        let (severity, message) = match (mapping.requirement, default) {
            (Requirement::Required, None) => (
                Severity::Error,
                format!("required value for {} is missing", mapping.element_name()),
            ),
            (Requirement::Required, Some(default)) => (
                Severity::Warning,
                format!(
                    "required value for {} is missing; default '{default}' used",
                    mapping.element_name()
                ),
            ),
            (_, Some(default)) => (
                Severity::Warning,
                format!(
                    "recommended value for {} is missing; default '{default}' used",
                    mapping.element_name()
                ),
            ),
            (_, None) => (
                Severity::Warning,
                format!("recommended value for {} is missing", mapping.element_name()),
            ),
        };
        issues.push(ValidationIssue::new(
            IssueCategory::MissingRequired,
            severity,
            cleaned.row_index(),
            cleaned.row_id().clone(),
            field,
            message,
        ));
    }
    issues
}
