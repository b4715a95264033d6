//! Cleaning flags turned into warnings.

use sba_map::MappingRegistry;
use sba_model::{CleanedRecord, Severity, ValidationIssue};

use super::field_name;

pub fn check(registry: &MappingRegistry, cleaned: &CleanedRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (path, field) in cleaned.fields() {
        if field.flags.is_empty() || !registry.is_applicable(path, cleaned) {
            continue;
        }
        let name = field_name(registry, cleaned, path);
        for flag in &field.flags {
            issues.push(ValidationIssue::new(
                flag.category(),
                Severity::Warning,
                cleaned.row_index(),
                cleaned.row_id().clone(),
                name.clone(),
                flag.to_string(),
            ));
        }
    }
    issues
}
