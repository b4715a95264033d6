//! Alias tables and small enumerated-value mappers.

use sba_model::{CleanFlag, Cleaned, CleanedValue};

/// Case-insensitive alias table onto a closed set of schema values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasTable {
    pub name: &'static str,
    /// `(alias, canonical)` pairs.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Every value the schema accepts.
    pub canonical: &'static [&'static str],
}

impl AliasTable {
    /// Canonical value for `value`, or `None` when it is not recognized.
    pub fn lookup(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        self.canonical
            .iter()
            .copied()
            .find(|canonical| canonical.eq_ignore_ascii_case(value))
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(value))
                    .map(|(_, canonical)| *canonical)
            })
    }

    pub fn contains(&self, value: &str) -> bool {
        self.canonical.contains(&value)
    }
}

/// Maps `raw` through `table`.
///
/// Unrecognized input is absent and flagged, so a declared default can take
/// its place.
pub fn map_alias(raw: &str, table: &AliasTable) -> Cleaned {
    let value = raw.trim();
    if value.is_empty() {
        return Cleaned::absent();
    }
    match table.lookup(value) {
        Some(canonical) => Cleaned::text(canonical),
        None => Cleaned::flagged(
            CleanedValue::Absent,
            CleanFlag::Unrecognized {
                raw: value.to_string(),
            },
        ),
    }
}

pub static SESSION_TYPES: AliasTable = AliasTable {
    name: "session type",
    aliases: &[
        ("Update", "Update Only"),
        ("Prepare", "Prepare Only"),
        ("Phone", "Telephone"),
        ("Face to face", "Face-to-face"),
        ("In person", "Face-to-face"),
        ("In-person", "Face-to-face"),
        ("Virtual", "Online"),
        ("Video", "Online"),
    ],
    canonical: &[
        "Face-to-face",
        "Online",
        "Prepare Only",
        "Telephone",
        "Training",
        "Update Only",
    ],
};

/// Session types that carry no client contact time.
pub const NO_CONTACT_SESSION_TYPES: &[&str] = &["Prepare Only", "Training", "Update Only"];

pub static TRAINING_TOPICS: AliasTable = AliasTable {
    name: "training topic",
    aliases: &[
        ("Tech", "Technology"),
        ("IT", "Technology"),
        ("Computer", "Technology"),
        ("Software", "Technology"),
        ("Marketing", "Marketing/Sales"),
        ("Sales", "Marketing/Sales"),
        ("Advertising", "Marketing/Sales"),
        ("Start-up", "Business Start-up/Preplanning"),
        ("Startup", "Business Start-up/Preplanning"),
        ("Starting a Business", "Business Start-up/Preplanning"),
        ("Planning", "Business Plan"),
        ("Financing", "Business Financing/Capital Sources"),
        ("Capital", "Business Financing/Capital Sources"),
        ("Funding", "Business Financing/Capital Sources"),
        ("International", "International Trade"),
        ("Global", "International Trade"),
        ("Export", "International Trade"),
        ("E-Commerce", "eCommerce"),
        ("Online Business", "eCommerce"),
        ("Legal", "Legal Issues"),
        ("Law", "Legal Issues"),
        ("Compliance", "Legal Issues"),
        ("Tax", "Tax Planning"),
        ("Taxes", "Tax Planning"),
        ("Contracting", "Government Contracting"),
        ("Government", "Government Contracting"),
        ("Federal", "Government Contracting"),
        ("Cyber", "Cyber Security/Cyber Awareness"),
        ("Security", "Cyber Security/Cyber Awareness"),
        ("HR", "Human Resources/Managing Employees"),
        ("Human Resources", "Human Resources/Managing Employees"),
        ("Employee", "Human Resources/Managing Employees"),
        ("Accounting", "Business Accounting/Budget"),
        ("Budget", "Business Accounting/Budget"),
        ("Finance", "Business Accounting/Budget"),
        ("Cash Flow", "Business Financial/Cash Flow"),
        ("Financial", "Business Financial/Cash Flow"),
        ("Customer", "Customer Relations"),
        ("Service", "Customer Relations"),
        ("Disaster", "Disaster Planning/Recovery"),
        ("Recovery", "Disaster Planning/Recovery"),
        ("Emergency", "Disaster Planning/Recovery"),
        ("Buy/Sell", "Buy/Sell Business"),
        ("Acquisition", "Buy/Sell Business"),
        ("Merger", "Buy/Sell Business"),
        ("Franchise", "Franchising"),
        ("IP", "Intellectual Property Training"),
        ("Patent", "Intellectual Property Training"),
        ("Trademark", "Intellectual Property Training"),
        ("Credit", "Credit Counseling"),
        ("Loan", "Credit Counseling"),
        ("Operations", "Business Operations/Management"),
        ("Management", "Business Operations/Management"),
    ],
    canonical: &[
        "Business Accounting/Budget",
        "Business Financial/Cash Flow",
        "Business Financing/Capital Sources",
        "Business Operations/Management",
        "Business Plan",
        "Business Start-up/Preplanning",
        "Buy/Sell Business",
        "Credit Counseling",
        "Customer Relations",
        "Cyber Security/Cyber Awareness",
        "Disaster Planning/Recovery",
        "eCommerce",
        "Franchising",
        "Government Contracting",
        "Human Resources/Managing Employees",
        "Intellectual Property Training",
        "International Trade",
        "Legal Issues",
        "Marketing/Sales",
        "Tax Planning",
        "Technology",
        "Other",
    ],
};

pub static PROGRAM_FORMATS: AliasTable = AliasTable {
    name: "program format",
    aliases: &[
        ("Seminar", "In-person"),
        ("Course", "In-person"),
        ("In person", "In-person"),
        ("Face-to-face", "In-person"),
        ("F2F", "In-person"),
        ("Classroom", "In-person"),
        ("Teleconference", "Online"),
        ("On-line Course", "Online"),
        ("Webinar", "Online"),
        ("Virtual", "Online"),
        ("Remote", "Online"),
        ("Zoom", "Online"),
        ("Teams", "Online"),
        ("Blended", "Hybrid"),
        ("On-Demand", "On Demand"),
        ("Self-paced", "On Demand"),
        ("Recording", "On Demand"),
    ],
    canonical: &["Hybrid", "In-person", "On Demand", "Online"],
};

/// Collapses free-form gender answers onto the schema's `Sex` values.
///
/// Anything other than female or male is absent without a flag; the
/// schema has no slot for it.
pub fn map_gender_to_sex(raw: &str) -> Cleaned {
    let value = raw.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Cleaned::absent();
    }
    if value == "f" || value.contains("female") || value.contains("woman") {
        Cleaned::text("Female")
    } else if value == "m" || value.contains("male") || value == "man" {
        Cleaned::text("Male")
    } else {
        Cleaned::absent()
    }
}

/// Normalizes yes/no style answers to `Yes`/`No`.
pub fn yes_no_flag(raw: &str) -> Cleaned {
    let value = raw.trim();
    if value.is_empty() {
        return Cleaned::absent();
    }
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "on file" | "checked" => Cleaned::text("Yes"),
        "no" | "n" | "false" | "0" | "unchecked" => Cleaned::text("No"),
        _ => Cleaned::flagged(
            CleanedValue::Absent,
            CleanFlag::Unrecognized {
                raw: value.to_string(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_type_aliases() {
        assert_eq!(map_alias("Update", &SESSION_TYPES), Cleaned::text("Update Only"));
        assert_eq!(map_alias("telephone", &SESSION_TYPES), Cleaned::text("Telephone"));
        let cleaned = map_alias("Carrier pigeon", &SESSION_TYPES);
        assert!(cleaned.value.is_absent());
        assert!(cleaned.flag.is_some());
    }

    #[test]
    fn topic_and_format_aliases() {
        assert_eq!(map_alias("Webinar", &PROGRAM_FORMATS), Cleaned::text("Online"));
        assert_eq!(map_alias("taxes", &TRAINING_TOPICS), Cleaned::text("Tax Planning"));
        assert_eq!(map_alias("ecommerce", &TRAINING_TOPICS), Cleaned::text("eCommerce"));
    }

    #[test]
    fn female_is_not_counted_as_male() {
        assert_eq!(map_gender_to_sex("Female"), Cleaned::text("Female"));
        assert_eq!(map_gender_to_sex("male"), Cleaned::text("Male"));
        assert_eq!(map_gender_to_sex("Prefer not to say"), Cleaned::absent());
    }

    #[test]
    fn yes_no_answers() {
        assert_eq!(yes_no_flag("TRUE"), Cleaned::text("Yes"));
        assert_eq!(yes_no_flag("n"), Cleaned::text("No"));
        assert!(yes_no_flag("maybe").flag.is_some());
    }
}
