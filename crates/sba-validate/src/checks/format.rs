//! Format and range rules on cleaned values.

use std::sync::LazyLock;

use regex::Regex;
use sba_map::MappingRegistry;
use sba_model::{CleanedRecord, ConversionOptions, IssueCategory, ValidationIssue};
use sba_transform::is_on_or_after;

use super::field_name;

pub(crate) static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("Invalid email regex")
});

/// A declarative rule bound to one target path.
#[derive(Debug, Clone, Copy)]
pub enum FormatRule {
    /// Value must match `pattern`.
    Pattern {
        path: &'static str,
        pattern: &'static LazyLock<Regex>,
        expected: &'static str,
    },
    /// Date must not precede `ConversionOptions::min_counseling_date`.
    DateNotBefore { path: &'static str },
}

pub fn check(
    rules: &[FormatRule],
    registry: &MappingRegistry,
    options: &ConversionOptions,
    cleaned: &CleanedRecord,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for rule in rules {
        match *rule {
            FormatRule::Pattern {
                path,
                pattern,
                expected,
            } => {
                let Some(value) = cleaned.text(path) else {
                    continue;
                };
                if !pattern.is_match(value) {
                    issues.push(ValidationIssue::warning(
                        IssueCategory::BadFormat,
                        cleaned.row_index(),
                        cleaned.row_id().clone(),
                        field_name(registry, cleaned, path),
                        format!("'{value}' is not {expected}"),
                    ));
                }
            }
            FormatRule::DateNotBefore { path } => {
                let Some(value) = cleaned.text(path) else {
                    continue;
                };
                if is_on_or_after(value, &options.min_counseling_date) == Some(false) {
                    issues.push(ValidationIssue::warning(
                        IssueCategory::OutOfRange,
                        cleaned.row_index(),
                        cleaned.row_id().clone(),
                        field_name(registry, cleaned, path),
                        format!(
                            "{value} is before the reporting minimum {}",
                            options.min_counseling_date
                        ),
                    ));
                }
            }
        }
    }
    issues
}
