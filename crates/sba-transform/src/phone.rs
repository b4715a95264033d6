use sba_model::{CleanFlag, Cleaned, CleanedValue};

use crate::region::is_united_states;

const MIN_INTERNATIONAL_DIGITS: usize = 7;
const MAX_INTERNATIONAL_DIGITS: usize = 15;

fn malformed(raw: &str, reason: &str) -> Cleaned {
    Cleaned::flagged(
        CleanedValue::Absent,
        CleanFlag::Malformed {
            raw: raw.to_string(),
            reason: reason.to_string(),
        },
    )
}

/// Reduces a phone number to digits.
///
/// US numbers (the default when `country` is unknown) must have ten digits
/// once a leading country code `1` is dropped. Other countries keep
/// 7 to 15 digits as given.
pub fn clean_phone(raw: &str, country: Option<&str>) -> Cleaned {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cleaned::absent();
    }
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return malformed(trimmed, "no digits");
    }

    let domestic = country.is_none_or(is_united_states);
    if domestic {
        let national = match digits.strip_prefix('1') {
            Some(rest) if digits.len() == 11 => rest,
            _ => digits.as_str(),
        };
        if national.len() == 10 {
            Cleaned::text(national)
        } else {
            malformed(trimmed, "expected 10 digits")
        }
    } else if (MIN_INTERNATIONAL_DIGITS..=MAX_INTERNATIONAL_DIGITS).contains(&digits.len()) {
        Cleaned::text(digits)
    } else {
        malformed(trimmed, "expected 7 to 15 digits")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_country_code() {
        assert_eq!(clean_phone("(515) 555-0100", None), Cleaned::text("5155550100"));
        assert_eq!(clean_phone("+1 515.555.0100", Some("USA")), Cleaned::text("5155550100"));
    }

    #[test]
    fn short_us_numbers_are_flagged() {
        let cleaned = clean_phone("555-0100", None);
        assert!(cleaned.value.is_absent());
        assert!(matches!(cleaned.flag, Some(CleanFlag::Malformed { .. })));
    }

    #[test]
    fn international_numbers_keep_digits() {
        assert_eq!(
            clean_phone("+44 20 7946 0958", Some("United Kingdom")),
            Cleaned::text("442079460958")
        );
    }
}
