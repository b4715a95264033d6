//! Training event roll-up.
//!
//! Training exports carry one row per attendee. The management training
//! report wants one record per event with attendee counts, so rows are
//! grouped by event id and folded into a synthetic [`Record`] whose columns
//! are the `fields::*` names below. That record then goes through the same
//! cleaning, validation and building as any counseling row.

use std::collections::HashMap;

use sba_model::Record;
use tracing::debug;

use crate::lookup::{map_gender_to_sex, yes_no_flag};
use crate::text::zip5;

/// Column names of the synthetic per-event record.
pub mod fields {
    pub const EVENT_ID: &str = "Class/Event ID";
    pub const CITY: &str = "Event: City";
    pub const STATE: &str = "Event: State";
    pub const ZIP: &str = "Event: Zip";
    pub const COSPONSOR: &str = "Event: Cosponsor";

    pub const TOTAL: &str = "Attendees: Total";
    pub const IN_BUSINESS: &str = "Attendees: Currently In Business";
    pub const NOT_IN_BUSINESS: &str = "Attendees: Not Yet In Business";
    pub const DISABILITY: &str = "Attendees: Person With Disabilities";
    pub const FEMALE: &str = "Attendees: Female";
    pub const MALE: &str = "Attendees: Male";
    pub const ACTIVE_DUTY: &str = "Attendees: Active Duty";
    pub const VETERAN: &str = "Attendees: Veterans";
    pub const SERVICE_DISABLED_VETERAN: &str = "Attendees: Service Disabled Veterans";
    pub const RESERVE_GUARD: &str = "Attendees: Reserve Or National Guard";
    pub const MILITARY_SPOUSE: &str = "Attendees: Spouse Of Military Member";
    pub const ASIAN: &str = "Attendees: Asian";
    pub const BLACK: &str = "Attendees: Black Or African American";
    pub const NATIVE_AMERICAN: &str = "Attendees: Native American Or Alaska Native";
    pub const PACIFIC_ISLANDER: &str = "Attendees: Native Hawaiian Or Pacific Islander";
    pub const WHITE: &str = "Attendees: White";
    pub const MIDDLE_EASTERN: &str = "Attendees: Middle Eastern";
    pub const NORTH_AFRICAN: &str = "Attendees: North African";
    pub const HISPANIC: &str = "Attendees: Hispanic Or Latino";
    pub const NON_HISPANIC: &str = "Attendees: Non Hispanic Or Latino";
    pub const UNDERSERVED: &str = "Attendees: Underserved";
}

const CITY_COLUMNS: &[&str] = &["City", "Mailing City"];
const STATE_COLUMNS: &[&str] = &["State/Province", "State", "Mailing State/Province"];
const ZIP_COLUMNS: &[&str] = &[
    "Zip/Postal Code",
    "Zip",
    "ZipCode",
    "Zip code",
    "Mailing Zip/Postal Code",
];
const COSPONSOR_COLUMNS: &[&str] = &["Cosponsor", "CosponsorsName", "Partner Organization"];
const BUSINESS_STATUS_COLUMNS: &[&str] = &[
    "Currently in Business?",
    "Currently In Business?",
    "Currently in Business",
    "In Business",
];
const GENDER_COLUMNS: &[&str] = &["Gender", "Sex"];
const DISABILITY_COLUMNS: &[&str] = &["Disabilities", "Disability", "Has Disability"];
const MILITARY_COLUMNS: &[&str] = &["Military Status", "Military", "Veteran Status"];
const RACE_COLUMNS: &[&str] = &["Race", "Racial Background"];
const ETHNICITY_COLUMNS: &[&str] = &["Ethnicity", "Ethnicity:", "Ethnic Background"];

/// Smallest attendee total the report schema accepts.
pub const MIN_REPORTED_TOTAL: usize = 2;

/// Race categories: synthetic column, keywords, counts toward underserved.
const RACE_KEYWORDS: &[(&str, &[&str], bool)] = &[
    (fields::ASIAN, &["asian"], true),
    (fields::BLACK, &["black", "african american"], true),
    (
        fields::NATIVE_AMERICAN,
        &["american indian", "alaska native", "native american"],
        true,
    ),
    (fields::PACIFIC_ISLANDER, &["hawaiian", "pacific islander"], true),
    (fields::WHITE, &["white", "caucasian"], false),
    (fields::MIDDLE_EASTERN, &["middle east"], true),
    (fields::NORTH_AFRICAN, &["north africa"], true),
];

const MILITARY_KEYWORDS: &[(&str, &[&str])] = &[
    (fields::ACTIVE_DUTY, &["active duty", "active-duty"]),
    (fields::VETERAN, &["veteran"]),
    (
        fields::SERVICE_DISABLED_VETERAN,
        &["service disabled", "service-disabled", "disabled vet"],
    ),
    (fields::RESERVE_GUARD, &["reserve", "guard"]),
    (fields::MILITARY_SPOUSE, &["spouse"]),
];

/// Attendee counts for one event, keyed by synthetic column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub attendees: usize,
    counts: HashMap<&'static str, usize>,
}

impl Demographics {
    pub fn count(&self, field: &str) -> usize {
        self.counts.get(field).copied().unwrap_or(0)
    }

    fn bump(&mut self, field: &'static str) {
        *self.counts.entry(field).or_insert(0) += 1;
    }

    fn tally(&mut self, row: &Record) {
        self.attendees += 1;

        if let Some((_, status)) = row.first_value(BUSINESS_STATUS_COLUMNS) {
            if yes_no_flag(status).value.as_text() == Some("Yes") {
                self.bump(fields::IN_BUSINESS);
            } else {
                self.bump(fields::NOT_IN_BUSINESS);
            }
        }

        if let Some((_, gender)) = row.first_value(GENDER_COLUMNS) {
            match map_gender_to_sex(gender).value.as_text() {
                Some("Female") => self.bump(fields::FEMALE),
                Some("Male") => self.bump(fields::MALE),
                _ => {}
            }
        }

        if let Some((_, disability)) = row.first_value(DISABILITY_COLUMNS)
            && yes_no_flag(disability).value.as_text() == Some("Yes")
        {
            self.bump(fields::DISABILITY);
        }

        if let Some((_, military)) = row.first_value(MILITARY_COLUMNS) {
            let military = military.to_ascii_lowercase();
            for (field, keywords) in MILITARY_KEYWORDS {
                if keywords.iter().any(|keyword| military.contains(keyword)) {
                    self.bump(*field);
                }
            }
        }

        let mut underserved = false;
        if let Some((_, race)) = row.first_value(RACE_COLUMNS) {
            let race = race.to_ascii_lowercase();
            for (field, keywords, counts_underserved) in RACE_KEYWORDS {
                if keywords.iter().any(|keyword| race.contains(keyword)) {
                    self.bump(*field);
                    underserved |= *counts_underserved;
                }
            }
        }

        if let Some((_, ethnicity)) = row.first_value(ETHNICITY_COLUMNS)
            && !is_undisclosed(ethnicity)
        {
            if is_hispanic(ethnicity) {
                self.bump(fields::HISPANIC);
                underserved = true;
            } else {
                self.bump(fields::NON_HISPANIC);
            }
        }

        if underserved {
            self.bump(fields::UNDERSERVED);
        }
    }
}

fn is_undisclosed(answer: &str) -> bool {
    let answer = answer.to_ascii_lowercase();
    answer.contains("prefer not") || answer.contains("unknown") || answer.contains("declined")
}

fn is_hispanic(ethnicity: &str) -> bool {
    let ethnicity = ethnicity.to_ascii_lowercase();
    let negated = ["non-hispanic", "non hispanic", "not hispanic", "not latino"]
        .iter()
        .any(|negation| ethnicity.contains(negation));
    !negated && (ethnicity.contains("hispanic") || ethnicity.contains("latino"))
}

/// One training event folded from its attendee rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRollup {
    pub event_id: String,
    /// Data row index of the first attendee row.
    pub first_row: usize,
    pub demographics: Demographics,
    /// Synthetic record fed to the training registry.
    pub record: Record,
}

/// Events in first-appearance order plus rows that had no event id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollupResult {
    pub events: Vec<EventRollup>,
    pub rows_without_event: Vec<usize>,
}

/// Groups attendee rows by event id and builds one synthetic record each.
pub fn roll_up_events(rows: &[Record]) -> RollupResult {
    let mut result = RollupResult::default();
    let mut groups: Vec<(String, Vec<&Record>)> = Vec::new();
    let mut index_by_id: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let Some(event_id) = row.value(fields::EVENT_ID) else {
            result.rows_without_event.push(row.row_index());
            continue;
        };
        match index_by_id.get(event_id) {
            Some(&index) => groups[index].1.push(row),
            None => {
                index_by_id.insert(event_id, groups.len());
                groups.push((event_id.to_string(), vec![row]));
            }
        }
    }

    for (ordinal, (event_id, members)) in groups.into_iter().enumerate() {
        let Some(first) = members.first().copied() else {
            continue;
        };
        let mut demographics = Demographics::default();
        for row in &members {
            demographics.tally(row);
        }
        debug!(
            event_id = %event_id,
            attendees = demographics.attendees,
            "rolled up training event"
        );
        let record = event_record(ordinal + 1, first, &demographics);
        result.events.push(EventRollup {
            event_id,
            first_row: first.row_index(),
            demographics,
            record,
        });
    }
    result
}

fn event_record(ordinal: usize, first: &Record, demographics: &Demographics) -> Record {
    let mut record = Record::from_pairs(ordinal, first.columns());

    // Location is all-or-nothing: a partial address falls back to defaults.
    let city = first.first_value(CITY_COLUMNS).map(|(_, v)| v);
    let state = first.first_value(STATE_COLUMNS).map(|(_, v)| v);
    let zip = first
        .first_value(ZIP_COLUMNS)
        .and_then(|(_, v)| zip5(v).value.as_text().map(str::to_string));
    if let (Some(city), Some(state), Some(zip)) = (city, state, zip) {
        record = record
            .with_field(fields::CITY, city)
            .with_field(fields::STATE, state)
            .with_field(fields::ZIP, zip);
    }

    if let Some((_, cosponsor)) = first.first_value(COSPONSOR_COLUMNS)
        && !cosponsor.eq_ignore_ascii_case("n/a")
    {
        record = record.with_field(fields::COSPONSOR, cosponsor);
    }

    let total = demographics.attendees.max(MIN_REPORTED_TOTAL);
    record = record.with_field(fields::TOTAL, total.to_string());
    for (field, count) in &demographics.counts {
        if *count > 0 {
            record = record.with_field(*field, count.to_string());
        }
    }
    record
}
