//! Declarative mapping entries.
//!
//! Each entry binds one target element path to its schema position and,
//! for fields, to the input columns and cleaner that produce its value.
//! Entries are `const`-constructed so a whole registry is a static table.

use sba_model::{CleanedRecord, ConversionOptions, RowId, Setting};

use crate::cleaner::Cleaner;

/// Whether a mapping produces a container or a text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Container element; emitted when a child is emitted or `keep_empty` is set.
    Group { keep_empty: bool },
    Field,
}

/// How strongly the schema wants a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Requirement {
    Optional,
    /// Absence is reported as a warning.
    Recommended,
    /// Absence is reported as an error unless a fallback is declared.
    Required,
}

/// Value substituted when the cleaned value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Literal(&'static str),
    Setting(Setting),
    /// The setting followed by the row id, e.g. `Training Event EV-12`.
    SettingWithRowId(Setting),
}

impl Fallback {
    pub fn resolve(self, options: &ConversionOptions, row_id: &RowId) -> String {
        match self {
            Fallback::Literal(value) => value.to_string(),
            Fallback::Setting(setting) => options.setting(setting).to_string(),
            Fallback::SettingWithRowId(setting) => {
                format!("{}{}", options.setting(setting), row_id)
            }
        }
    }
}

/// Single value or contiguous repeated siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    Single,
    Repeated { delimiters: &'static [char] },
}

/// Predicate deciding whether a mapping applies to a row.
#[derive(Debug, Clone, Copy)]
pub struct Condition {
    pub name: &'static str,
    pub test: fn(&CleanedRecord) -> bool,
}

impl Condition {
    pub fn holds(&self, record: &CleanedRecord) -> bool {
        (self.test)(record)
    }
}

/// One entry of a mapping registry.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    /// `/`-separated element path starting at the record root.
    pub path: &'static str,
    /// Position among the parent's children.
    pub order: u16,
    pub role: Role,
    /// Input columns tried in order; the first non-blank one wins.
    pub sources: &'static [&'static str],
    pub cleaner: Cleaner,
    pub requirement: Requirement,
    pub fallback: Option<Fallback>,
    pub multiplicity: Multiplicity,
    pub condition: Option<Condition>,
}

impl FieldMapping {
    pub const fn group(path: &'static str, order: u16) -> Self {
        Self {
            path,
            order,
            role: Role::Group { keep_empty: false },
            sources: &[],
            cleaner: Cleaner::Text { max_len: None },
            requirement: Requirement::Optional,
            fallback: None,
            multiplicity: Multiplicity::Single,
            condition: None,
        }
    }

    pub const fn field(
        path: &'static str,
        order: u16,
        sources: &'static [&'static str],
        cleaner: Cleaner,
    ) -> Self {
        Self {
            path,
            order,
            role: Role::Field,
            sources,
            cleaner,
            requirement: Requirement::Optional,
            fallback: None,
            multiplicity: Multiplicity::Single,
            condition: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    pub const fn recommended(mut self) -> Self {
        self.requirement = Requirement::Recommended;
        self
    }

    pub const fn or_literal(mut self, value: &'static str) -> Self {
        self.fallback = Some(Fallback::Literal(value));
        self
    }

    pub const fn or_setting(mut self, setting: Setting) -> Self {
        self.fallback = Some(Fallback::Setting(setting));
        self
    }

    pub const fn or_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub const fn repeated(mut self, delimiters: &'static [char]) -> Self {
        self.multiplicity = Multiplicity::Repeated { delimiters };
        self
    }

    pub const fn keep_empty(mut self) -> Self {
        self.role = Role::Group { keep_empty: true };
        self
    }

    pub const fn when(mut self, name: &'static str, test: fn(&CleanedRecord) -> bool) -> Self {
        self.condition = Some(Condition { name, test });
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.role, Role::Group { .. })
    }

    /// Last path segment, used as the element name.
    pub fn element_name(&self) -> &'static str {
        self.path
            .rsplit_once('/')
            .map_or(self.path, |(_, name)| name)
    }

    /// Path of the enclosing group, or `None` for the record root.
    pub fn parent_path(&self) -> Option<&'static str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// Column reported in issues about this mapping.
    pub fn primary_source(&self) -> &'static str {
        self.sources.first().copied().unwrap_or(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let mapping = FieldMapping::field(
            "CounselingRecord/ClientIntake/Sex",
            2,
            &["Gender"],
            Cleaner::Gender,
        );
        assert_eq!(mapping.element_name(), "Sex");
        assert_eq!(mapping.parent_path(), Some("CounselingRecord/ClientIntake"));
        assert_eq!(mapping.primary_source(), "Gender");

        let root = FieldMapping::group("CounselingRecord", 0);
        assert_eq!(root.parent_path(), None);
        assert_eq!(root.element_name(), "CounselingRecord");
    }

    #[test]
    fn fallback_with_row_id() {
        let options = ConversionOptions::default();
        let fallback = Fallback::SettingWithRowId(Setting::TrainingTitlePrefix);
        assert_eq!(
            fallback.resolve(&options, &RowId::new("EV-12")),
            "Training Event EV-12"
        );
    }
}
