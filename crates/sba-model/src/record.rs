use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier used to trace issues back to a source row.
///
/// The identifier is the value of the document's id column when present,
/// otherwise a positional `Row_{n}` label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Positional identifier for a row with no usable id column.
    pub fn positional(row_index: usize) -> Self {
        Self(format!("Row_{row_index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true for cell values that carry no data.
///
/// CRM exports write `nan`/`null` placeholders for cleared fields, which are
/// treated the same as empty cells.
pub fn is_missing_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
}

/// One input row: column name to raw cell text.
///
/// Records are assembled once by the reader (or by the training roll-up) and
/// are read-only for the rest of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    row_index: usize,
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Creates an empty record for the 1-based data row `row_index`.
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            fields: BTreeMap::new(),
        }
    }

    pub fn from_pairs<I, K, V>(row_index: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row_index,
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Raw cell text exactly as read.
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Trimmed cell text, or `None` when the cell is missing or blank.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .filter(|value| !is_missing_value(value))
            .map(|value| value.trim())
    }

    /// First non-blank value among `columns`, with the column that supplied it.
    pub fn first_value<'a>(&'a self, columns: &[&'a str]) -> Option<(&'a str, &'a str)> {
        columns
            .iter()
            .find_map(|column| self.value(column).map(|value| (*column, value)))
    }

    /// Identifier for this row based on the given id column.
    pub fn row_id(&self, id_column: &str) -> RowId {
        match self.value(id_column) {
            Some(id) => RowId::new(id),
            None => RowId::positional(self.row_index),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_placeholder_cells_are_missing() {
        let record = Record::new(1)
            .with_field("A", "  ")
            .with_field("B", "nan")
            .with_field("C", " value ");
        assert_eq!(record.value("A"), None);
        assert_eq!(record.value("B"), None);
        assert_eq!(record.value("C"), Some("value"));
        assert_eq!(record.raw("C"), Some(" value "));
    }

    #[test]
    fn first_value_skips_blank_columns() {
        let record = Record::new(1)
            .with_field("Phone", "")
            .with_field("Contact: Phone", "515-555-0100");
        assert_eq!(
            record.first_value(&["Phone", "Contact: Phone"]),
            Some(("Contact: Phone", "515-555-0100"))
        );
    }

    #[test]
    fn row_id_falls_back_to_position() {
        let record = Record::new(7).with_field("Contact ID", "");
        assert_eq!(record.row_id("Contact ID").as_str(), "Row_7");
        let record = Record::new(7).with_field("Contact ID", "C-100");
        assert_eq!(record.row_id("Contact ID").as_str(), "C-100");
    }
}
