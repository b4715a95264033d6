use sba_map::{MappingRegistry, counseling};
use sba_model::{CleanedRecord, ConversionOptions, DocumentKind, ValidationIssue, ValidationReport};
use tracing::trace;

use crate::checks::consistency::{COUNSELING_RULES, CrossFieldRule};
use crate::checks::format::{self, EMAIL_REGEX, FormatRule};
use crate::checks::{flags, required};

static COUNSELING_FORMAT_RULES: &[FormatRule] = &[
    FormatRule::Pattern {
        path: counseling::EMAIL,
        pattern: &EMAIL_REGEX,
        expected: "an email address",
    },
    FormatRule::Pattern {
        path: "CounselingRecord/CounselorRecord/Email",
        pattern: &EMAIL_REGEX,
        expected: "an email address",
    },
    FormatRule::DateNotBefore {
        path: counseling::DATE_COUNSELED,
    },
];

/// Runs every check for one document kind against cleaned records.
///
/// The validator only reads shared state, so one instance can be used
/// from many worker threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a MappingRegistry,
    options: &'a ConversionOptions,
    format_rules: &'static [FormatRule],
    cross_field_rules: &'static [CrossFieldRule],
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a MappingRegistry, options: &'a ConversionOptions) -> Self {
        let (format_rules, cross_field_rules): (&'static [FormatRule], &'static [CrossFieldRule]) =
            match registry.kind() {
                DocumentKind::Counseling => (COUNSELING_FORMAT_RULES, COUNSELING_RULES),
                DocumentKind::Training => (&[], &[]),
            };
        Self {
            registry,
            options,
            format_rules,
            cross_field_rules,
        }
    }

    /// Issues for one record, in check order: missing values, cleaning
    /// flags, format rules, cross-field rules.
    pub fn validate(&self, cleaned: &CleanedRecord) -> Vec<ValidationIssue> {
        let mut issues = required::check(self.registry, self.options, cleaned);
        issues.extend(flags::check(self.registry, cleaned));
        issues.extend(format::check(
            self.format_rules,
            self.registry,
            self.options,
            cleaned,
        ));
        for rule in self.cross_field_rules {
            if let Some(issue) = (rule.check)(self.registry, self.options, cleaned) {
                trace!(rule = rule.name, row = %cleaned.row_id(), "cross-field rule failed");
                issues.push(issue);
            }
        }
        issues
    }

    pub fn validate_into(&self, cleaned: &CleanedRecord, report: &mut ValidationReport) {
        report.extend(self.validate(cleaned));
    }
}
