//! Cleaned values and the per-row map the builder and validator read from.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::issue::IssueCategory;
use crate::record::RowId;

/// Output of a cleaning function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CleanedValue {
    #[default]
    Absent,
    Text(String),
    List(Vec<String>),
}

impl CleanedValue {
    /// Wraps text, mapping empty strings to `Absent`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Absent
        } else {
            Self::Text(value)
        }
    }

    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// The single text value, or the first list item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Text(text) => Some(text.as_str()),
            Self::List(items) => items.first().map(String::as_str),
        }
    }

    /// Every value carried, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Absent => Vec::new(),
            Self::Text(text) => vec![text.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// Why a cleaning function could not keep a value as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CleanFlag {
    /// Input could not be parsed at all (dates, numbers).
    Unparsable { raw: String },
    /// Input parsed but has the wrong shape (digit counts, ZIP layout).
    Malformed { raw: String, reason: String },
    /// Numeric input outside its bounds; the kept value was clamped.
    OutOfRange { raw: String, kept: String },
    /// Text exceeded its length bound.
    Truncated { from: usize, to: usize },
    /// Input is not one of the recognized codes or names.
    Unrecognized { raw: String },
}

impl CleanFlag {
    pub fn category(&self) -> IssueCategory {
        match self {
            Self::Unparsable { .. } | Self::Malformed { .. } => IssueCategory::BadFormat,
            Self::OutOfRange { .. } | Self::Truncated { .. } | Self::Unrecognized { .. } => {
                IssueCategory::OutOfRange
            }
        }
    }
}

impl fmt::Display for CleanFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparsable { raw } => write!(f, "could not parse '{raw}'"),
            Self::Malformed { raw, reason } => write!(f, "'{raw}' is malformed: {reason}"),
            Self::OutOfRange { raw, kept } => {
                write!(f, "'{raw}' is out of range; kept '{kept}'")
            }
            Self::Truncated { from, to } => {
                write!(f, "truncated from {from} to {to} characters")
            }
            Self::Unrecognized { raw } => write!(f, "'{raw}' is not a recognized value"),
        }
    }
}

/// A cleaned value plus an optional flag explaining any loss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cleaned {
    pub value: CleanedValue,
    pub flag: Option<CleanFlag>,
}

impl Cleaned {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: CleanedValue::text(value),
            flag: None,
        }
    }

    pub fn list(values: Vec<String>) -> Self {
        Self {
            value: CleanedValue::List(values),
            flag: None,
        }
    }

    pub fn flagged(value: CleanedValue, flag: CleanFlag) -> Self {
        Self {
            value,
            flag: Some(flag),
        }
    }
}

/// Cleaned result for one mapping within one row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedField {
    pub value: CleanedValue,
    pub flags: Vec<CleanFlag>,
    /// Input column that supplied the raw value, if any did.
    pub source: Option<String>,
}

/// Cleaned values for one row, keyed by target element path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedRecord {
    row_index: usize,
    row_id: RowId,
    fields: BTreeMap<String, CleanedField>,
}

impl CleanedRecord {
    pub fn new(row_index: usize, row_id: RowId) -> Self {
        Self {
            row_index,
            row_id,
            fields: BTreeMap::new(),
        }
    }

    /// 1-based position of the source record.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn row_id(&self) -> &RowId {
        &self.row_id
    }

    pub fn insert(&mut self, path: impl Into<String>, field: CleanedField) {
        self.fields.insert(path.into(), field);
    }

    pub fn field(&self, path: &str) -> Option<&CleanedField> {
        self.fields.get(path)
    }

    pub fn value(&self, path: &str) -> &CleanedValue {
        const ABSENT: &CleanedValue = &CleanedValue::Absent;
        self.fields.get(path).map_or(ABSENT, |field| &field.value)
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        self.value(path).as_text()
    }

    pub fn is_absent(&self, path: &str) -> bool {
        self.value(path).is_absent()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &CleanedField)> {
        self.fields.iter().map(|(path, field)| (path.as_str(), field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_absent() {
        assert_eq!(CleanedValue::text(""), CleanedValue::Absent);
        assert!(CleanedValue::List(Vec::new()).is_absent());
        assert!(!CleanedValue::text("x").is_absent());
    }

    #[test]
    fn missing_paths_read_as_absent() {
        let record = CleanedRecord::new(1, RowId::new("C-1"));
        assert!(record.is_absent("CounselingRecord/PartnerClientNumber"));
        assert_eq!(record.text("CounselingRecord/PartnerClientNumber"), None);
    }

    #[test]
    fn flags_map_to_categories() {
        let flag = CleanFlag::Truncated { from: 90, to: 80 };
        assert_eq!(flag.category(), IssueCategory::OutOfRange);
        assert_eq!(flag.to_string(), "truncated from 90 to 80 characters");
        let flag = CleanFlag::Unparsable {
            raw: "someday".to_string(),
        };
        assert_eq!(flag.category(), IssueCategory::BadFormat);
    }
}
