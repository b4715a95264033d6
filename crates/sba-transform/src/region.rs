//! State and country standardization.

use sba_model::{CleanFlag, Cleaned, CleanedValue};

/// Postal abbreviation to the state name the schema expects.
pub const STATE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
    ("AS", "American Samoa"),
    ("GU", "Guam"),
    ("MP", "Northern Mariana Islands"),
    ("PR", "Puerto Rico"),
    ("VI", "U.S. Virgin Islands"),
];

/// Valid state names with no postal abbreviation in the table above.
const OTHER_STATE_NAMES: &[&str] = &[
    "Armed Forces Europe",
    "Armed Forces Pacific",
    "Armed Forces the Americas",
    "Federated States of Micronesia",
    "Marshall Islands",
    "Republic of Palau",
    "United States Minor Outlying Islands",
];

const UNITED_STATES: &str = "United States";

/// Country aliases, matched case-insensitively.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("US", UNITED_STATES),
    ("USA", UNITED_STATES),
    ("U.S.", UNITED_STATES),
    ("U.S.A.", UNITED_STATES),
    ("UNITED STATES", UNITED_STATES),
    ("UNITED STATES OF AMERICA", UNITED_STATES),
    ("AMERICA", UNITED_STATES),
    ("CA", "Canada"),
    ("CAN", "Canada"),
    ("CANADA", "Canada"),
    ("MX", "Mexico"),
    ("MEX", "Mexico"),
    ("MEXICO", "Mexico"),
    ("UK", "United Kingdom"),
    ("GB", "United Kingdom"),
    ("GBR", "United Kingdom"),
    ("GREAT BRITAIN", "United Kingdom"),
    ("ENGLAND", "United Kingdom"),
    ("UNITED KINGDOM", "United Kingdom"),
];

fn unrecognized(raw: &str) -> Cleaned {
    Cleaned::flagged(
        CleanedValue::text(raw),
        CleanFlag::Unrecognized {
            raw: raw.to_string(),
        },
    )
}

/// Expands abbreviations and fixes casing of state names.
///
/// Unknown values pass through unchanged with an `Unrecognized` flag.
pub fn standardize_state(raw: &str) -> Cleaned {
    let state = raw.trim();
    if state.is_empty() {
        return Cleaned::absent();
    }
    let by_abbreviation = STATE_ABBREVIATIONS
        .iter()
        .find(|(abbreviation, _)| abbreviation.eq_ignore_ascii_case(state))
        .map(|(_, name)| *name);
    let by_name = || {
        STATE_ABBREVIATIONS
            .iter()
            .map(|(_, name)| *name)
            .chain(OTHER_STATE_NAMES.iter().copied())
            .find(|name| name.eq_ignore_ascii_case(state))
    };
    match by_abbreviation.or_else(by_name) {
        Some(name) => Cleaned::text(name),
        None => unrecognized(state),
    }
}

/// Maps country codes and spellings onto schema country names.
///
/// Unknown values pass through unchanged with an `Unrecognized` flag.
pub fn standardize_country(raw: &str) -> Cleaned {
    let country = raw.trim();
    if country.is_empty() {
        return Cleaned::absent();
    }
    match COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(country))
    {
        Some((_, name)) => Cleaned::text(*name),
        None => unrecognized(country),
    }
}

/// True when `country` (raw or standardized) names the United States.
pub fn is_united_states(country: &str) -> bool {
    standardize_country(country).value.as_text() == Some(UNITED_STATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_abbreviations() {
        assert_eq!(standardize_state("ia"), Cleaned::text("Iowa"));
        assert_eq!(standardize_state("PR"), Cleaned::text("Puerto Rico"));
    }

    #[test]
    fn fixes_name_casing() {
        assert_eq!(standardize_state("new york"), Cleaned::text("New York"));
        assert_eq!(
            standardize_state("marshall islands"),
            Cleaned::text("Marshall Islands")
        );
    }

    #[test]
    fn unknown_state_passes_through_flagged() {
        let cleaned = standardize_state("Ontario");
        assert_eq!(cleaned.value, CleanedValue::text("Ontario"));
        assert!(matches!(cleaned.flag, Some(CleanFlag::Unrecognized { .. })));
    }

    #[test]
    fn country_aliases() {
        assert_eq!(standardize_country("usa"), Cleaned::text("United States"));
        assert_eq!(standardize_country("England"), Cleaned::text("United Kingdom"));
        assert_eq!(standardize_country(""), Cleaned::absent());
        assert!(is_united_states("U.S.A."));
        assert!(!is_united_states("Canada"));
    }
}
