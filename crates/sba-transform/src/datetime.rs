//! Date parsing for CRM export cells.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use sba_model::{CleanFlag, Cleaned, CleanedValue};

/// Date layouts accepted on input, tried in order.
///
/// Four-digit-year layouts come before their two-digit twins so that
/// `08/15/2023` is never read as year 20.
pub const DATE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d-%m-%Y", "%Y/%m/%d", "%y/%m/%d", "%m-%d-%y",
];

const DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

/// Parses a date in any accepted layout.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_date(trimmed)
        .or_else(|| try_parse_datetime(trimmed))
        .or_else(|| {
            // Exports sometimes append a time we do not model.
            let head = trimmed.split([' ', 'T']).next()?;
            (head != trimmed).then(|| try_parse_date(head)).flatten()
        })
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_INPUT_FORMATS.iter().find_map(|fmt| {
        let date = NaiveDate::parse_from_str(value, fmt).ok()?;
        // `%Y` happily accepts "23"; only the `%y` layouts may yield short years.
        (fmt.contains("%y") || date.year() >= 1000).then_some(date)
    })
}

fn try_parse_datetime(value: &str) -> Option<NaiveDate> {
    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|datetime| datetime.date())
        .filter(|date| date.year() >= 1000)
}

pub fn format_iso8601_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalizes a date cell to `YYYY-MM-DD`.
///
/// Blank input is absent without a flag; unparsable input is absent and
/// flagged so it surfaces as a bad-format issue.
pub fn format_date(raw: &str) -> Cleaned {
    if raw.trim().is_empty() {
        return Cleaned::absent();
    }
    match parse_date(raw) {
        Some(date) => Cleaned::text(format_iso8601_date(date)),
        None => Cleaned::flagged(
            CleanedValue::Absent,
            CleanFlag::Unparsable {
                raw: raw.trim().to_string(),
            },
        ),
    }
}

/// True when `date` (already normalized) is on or after `minimum`.
///
/// Returns `None` when either side does not parse.
pub fn is_on_or_after(date: &str, minimum: &str) -> Option<bool> {
    Some(parse_date(date)? >= parse_date(minimum)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_common_layouts() {
        for raw in ["2023-08-15", "08/15/2023", "8/15/2023", "08-15-2023", "08/15/23", "2023/08/15"] {
            assert_eq!(
                format_date(raw),
                Cleaned::text("2023-08-15"),
                "layout {raw}"
            );
        }
    }

    #[test]
    fn strips_trailing_time() {
        assert_eq!(format_date("08/15/2023 10:30 AM"), Cleaned::text("2023-08-15"));
        assert_eq!(format_date("2023-08-15T10:30:00"), Cleaned::text("2023-08-15"));
    }

    #[test]
    fn unparsable_is_flagged_absent() {
        let cleaned = format_date("next tuesday");
        assert!(cleaned.value.is_absent());
        assert!(matches!(cleaned.flag, Some(CleanFlag::Unparsable { .. })));
    }

    #[test]
    fn blank_is_absent_without_flag() {
        assert_eq!(format_date("   "), Cleaned::absent());
    }

    #[test]
    fn compares_against_minimum() {
        assert_eq!(is_on_or_after("2023-10-01", "2023-10-01"), Some(true));
        assert_eq!(is_on_or_after("2023-09-30", "2023-10-01"), Some(false));
        assert_eq!(is_on_or_after("garbage", "2023-10-01"), None);
    }
}
