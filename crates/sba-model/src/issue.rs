use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::RowId;

/// Fixed set of issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    MissingRequired,
    BadFormat,
    OutOfRange,
    SchemaViolationRisk,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 4] = [
        IssueCategory::MissingRequired,
        IssueCategory::BadFormat,
        IssueCategory::OutOfRange,
        IssueCategory::SchemaViolationRisk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::MissingRequired => "missing-required",
            IssueCategory::BadFormat => "bad-format",
            IssueCategory::OutOfRange => "out-of-range",
            IssueCategory::SchemaViolationRisk => "schema-violation-risk",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown issue category: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data-quality finding tied to one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub category: IssueCategory,
    pub severity: Severity,
    /// 1-based position of the record the issue was found in.
    pub row_index: usize,
    /// Display identifier of that record.
    pub row_id: RowId,
    /// Input column (or target element when no column applies).
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        category: IssueCategory,
        severity: Severity,
        row_index: usize,
        row_id: RowId,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            row_index,
            row_id,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error(
        category: IssueCategory,
        row_index: usize,
        row_id: RowId,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, Severity::Error, row_index, row_id, field, message)
    }

    pub fn warning(
        category: IssueCategory,
        row_index: usize,
        row_id: RowId,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, Severity::Warning, row_index, row_id, field, message)
    }
}

/// A row the reader could not turn into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDefect {
    pub row_index: usize,
    pub message: String,
}

/// Run-scoped, append-only collection of issues.
///
/// Counts are derived from the issue list so they cannot drift from it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
    input_defects: Vec<InputDefect>,
    rows_processed: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    pub fn record_processed(&mut self) {
        self.rows_processed += 1;
    }

    pub fn record_input_defect(&mut self, row_index: usize, message: impl Into<String>) {
        self.input_defects.push(InputDefect {
            row_index,
            message: message.into(),
        });
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn input_defects(&self) -> &[InputDefect] {
        &self.input_defects
    }

    pub fn rows_processed(&self) -> usize {
        self.rows_processed
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.input_defects.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn count(&self, category: IssueCategory, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.category == category && issue.severity == severity)
            .count()
    }

    pub fn counts_by_category(&self) -> BTreeMap<IssueCategory, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.category).or_insert(0) += 1;
        }
        counts
    }

    /// Number of distinct rows with at least one issue.
    ///
    /// Rows are told apart by position, since several rows can share one id
    /// (sessions of the same contact). The id is part of the key so a
    /// rolled-up event and a skipped source row at the same position stay
    /// distinct.
    pub fn rows_with_issues(&self) -> usize {
        self.issues
            .iter()
            .map(|issue| (issue.row_index, &issue.row_id))
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            rows_processed: self.rows_processed,
            rows_with_issues: self.rows_with_issues(),
            input_defects: self.input_defects.len(),
            errors: self.error_count(),
            warnings: self.warning_count(),
            by_category: self
                .counts_by_category()
                .into_iter()
                .map(|(category, count)| (category.as_str().to_string(), count))
                .collect(),
        }
    }
}

/// Aggregate counts written at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub rows_processed: usize,
    pub rows_with_issues: usize,
    pub input_defects: usize,
    pub errors: usize,
    pub warnings: usize,
    pub by_category: BTreeMap<String, usize>,
}
