use sba_model::{Cleaned, ConversionOptions, Record};
use sba_transform::{
    AliasTable, clean_notes, clean_numeric, clean_percentage, clean_phone, format_date, initial,
    map_alias, map_gender_to_sex, standardize_country, standardize_state, truncate_text,
    yes_no_flag, zip4, zip5,
};

/// Cleaning function applied to a mapping's raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cleaner {
    /// Trimmed text, bounded to `max_len` characters at a word boundary.
    Text { max_len: Option<usize> },
    /// Counselor notes, bounded by `ConversionOptions::notes_max_len`.
    Notes,
    Initial,
    Date,
    /// Phone digits; the country is read from the first non-blank column.
    Phone { country_sources: &'static [&'static str] },
    State,
    Country,
    Zip5,
    Zip4,
    Numeric { min: Option<f64>, max: Option<f64> },
    Percentage,
    Gender,
    YesNo,
    Alias(&'static AliasTable),
}

impl Cleaner {
    pub const COUNT: Cleaner = Cleaner::Numeric {
        min: Some(0.0),
        max: None,
    };

    pub const AMOUNT: Cleaner = Cleaner::Numeric {
        min: None,
        max: None,
    };

    pub const fn text(max_len: usize) -> Self {
        Cleaner::Text {
            max_len: Some(max_len),
        }
    }

    /// Cleans one raw value. `record` supplies sibling columns for cleaners
    /// that need them.
    pub fn apply(&self, raw: &str, record: &Record, options: &ConversionOptions) -> Cleaned {
        match *self {
            Cleaner::Text { max_len: None } => Cleaned::text(raw.trim()),
            Cleaner::Text {
                max_len: Some(max_len),
            } => truncate_text(raw, max_len),
            Cleaner::Notes => clean_notes(raw, options.notes_max_len),
            Cleaner::Initial => initial(raw),
            Cleaner::Date => format_date(raw),
            Cleaner::Phone { country_sources } => {
                let country = record.first_value(country_sources).map(|(_, value)| value);
                clean_phone(raw, country)
            }
            Cleaner::State => standardize_state(raw),
            Cleaner::Country => standardize_country(raw),
            Cleaner::Zip5 => zip5(raw),
            Cleaner::Zip4 => zip4(raw),
            Cleaner::Numeric { min, max } => clean_numeric(raw, min, max),
            Cleaner::Percentage => clean_percentage(raw),
            Cleaner::Gender => map_gender_to_sex(raw),
            Cleaner::YesNo => yes_no_flag(raw),
            Cleaner::Alias(table) => map_alias(raw, table),
        }
    }
}
