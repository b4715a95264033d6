//! Management training report registry.
//!
//! Training input is rolled up per event before mapping, so most sources
//! here are the synthetic columns produced by [`sba_transform::rollup`].

use sba_model::{DocumentKind, Setting};
use sba_transform::rollup::fields;
use sba_transform::{DEFAULT_DELIMITERS, PROGRAM_FORMATS, TRAINING_TOPICS};

use crate::cleaner::Cleaner;
use crate::mapping::{Fallback, FieldMapping};
use crate::registry::RegistryDefinition;

pub const DOCUMENT_ROOT: &str = "ManagementTrainingReport";
pub const RECORD_ROOT: &str = "ManagementTrainingRecord";
pub const ID_SOURCE: &str = fields::EVENT_ID;

pub const NUMBER_TRAINED_TOTAL: &str = "ManagementTrainingRecord/NumberTrained/Total";

const TEXT: Cleaner = Cleaner::Text { max_len: None };
const SESSIONS: Cleaner = Cleaner::Numeric {
    min: Some(1.0),
    max: None,
};

pub static MAPPINGS: &[FieldMapping] = &[
    FieldMapping::group("ManagementTrainingRecord", 0),
    FieldMapping::field(
        "ManagementTrainingRecord/PartnerTrainingNumber",
        0,
        &[fields::EVENT_ID],
        Cleaner::text(20),
    )
    .required(),
    FieldMapping::group("ManagementTrainingRecord/Location", 1),
    FieldMapping::field(
        "ManagementTrainingRecord/Location/LocationCode",
        0,
        &["LocationCode", "Location Code"],
        TEXT,
    )
    .or_setting(Setting::LocationCode),
    FieldMapping::field(
        "ManagementTrainingRecord/FundingSource",
        2,
        &["Funding Source"],
        TEXT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/DateTrainingStarted",
        3,
        &["Start Date", "Event: Start Date"],
        Cleaner::Date,
    )
    .required()
    .or_setting(Setting::TrainingStartDate),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberOfSessions",
        4,
        &["Number of Sessions"],
        SESSIONS,
    )
    .or_setting(Setting::TrainingSessions),
    FieldMapping::field(
        "ManagementTrainingRecord/TotalTrainingHours",
        5,
        &["Total Training Hours", "Duration (hours)"],
        Cleaner::COUNT,
    )
    .or_setting(Setting::TrainingHours),
    FieldMapping::field(
        "ManagementTrainingRecord/TrainingTitle",
        6,
        &["Class/Event Name", "Event Name"],
        Cleaner::text(80),
    )
    .recommended()
    .or_fallback(Fallback::SettingWithRowId(Setting::TrainingTitlePrefix)),
    FieldMapping::group("ManagementTrainingRecord/TrainingLocation", 7),
    FieldMapping::field(
        "ManagementTrainingRecord/TrainingLocation/City",
        0,
        &[fields::CITY],
        Cleaner::text(80),
    )
    .or_setting(Setting::TrainingCity),
    FieldMapping::field(
        "ManagementTrainingRecord/TrainingLocation/State",
        1,
        &[fields::STATE],
        Cleaner::State,
    )
    .or_setting(Setting::TrainingState),
    FieldMapping::field(
        "ManagementTrainingRecord/TrainingLocation/ZipCode",
        2,
        &[fields::ZIP],
        Cleaner::Zip5,
    )
    .or_setting(Setting::TrainingZip),
    FieldMapping::group("ManagementTrainingRecord/TrainingLocation/Country", 3),
    FieldMapping::field(
        "ManagementTrainingRecord/TrainingLocation/Country/Code",
        0,
        &["Event Country", "Event: Country"],
        Cleaner::Country,
    )
    .or_setting(Setting::TrainingCountry),
    FieldMapping::group("ManagementTrainingRecord/NumberTrained", 8),
    FieldMapping::field(NUMBER_TRAINED_TOTAL, 0, &[fields::TOTAL], Cleaner::COUNT).required(),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/CurrentlyInBusiness",
        1,
        &[fields::IN_BUSINESS],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/NotYetInBusiness",
        2,
        &[fields::NOT_IN_BUSINESS],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/PersonWithDisabilities",
        3,
        &[fields::DISABILITY],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Female",
        4,
        &[fields::FEMALE],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Male",
        5,
        &[fields::MALE],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/ActiveDuty",
        6,
        &[fields::ACTIVE_DUTY],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Veterans",
        7,
        &[fields::VETERAN],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/ServiceDisabledVeterans",
        8,
        &[fields::SERVICE_DISABLED_VETERAN],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/MemberOfReserveOrNationalGuard",
        9,
        &[fields::RESERVE_GUARD],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/SpouseOfMilitaryMember",
        10,
        &[fields::MILITARY_SPOUSE],
        Cleaner::COUNT,
    ),
    FieldMapping::group("ManagementTrainingRecord/NumberTrained/Race", 11),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Race/Asian",
        0,
        &[fields::ASIAN],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Race/BlackOrAfricanAmerican",
        1,
        &[fields::BLACK],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Race/NativeAmericanOrAlaskaNative",
        2,
        &[fields::NATIVE_AMERICAN],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Race/NativeHawaiianOrPacificIslander",
        3,
        &[fields::PACIFIC_ISLANDER],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Race/White",
        4,
        &[fields::WHITE],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Race/MiddleEastern",
        5,
        &[fields::MIDDLE_EASTERN],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Race/NorthAfrican",
        6,
        &[fields::NORTH_AFRICAN],
        Cleaner::COUNT,
    ),
    FieldMapping::group("ManagementTrainingRecord/NumberTrained/Ethnicity", 12),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Ethnicity/HispanicOrLatinoOrigin",
        0,
        &[fields::HISPANIC],
        Cleaner::COUNT,
    ),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberTrained/Ethnicity/NonHispanicOrLatinoOrigin",
        1,
        &[fields::NON_HISPANIC],
        Cleaner::COUNT,
    ),
    FieldMapping::group("ManagementTrainingRecord/NumberUnderservedTrained", 9),
    FieldMapping::field(
        "ManagementTrainingRecord/NumberUnderservedTrained/Total",
        0,
        &[fields::UNDERSERVED],
        Cleaner::COUNT,
    ),
    FieldMapping::group("ManagementTrainingRecord/TrainingTopic", 10),
    FieldMapping::field(
        "ManagementTrainingRecord/TrainingTopic/Code",
        0,
        &["Training Topic", "Topic"],
        Cleaner::Alias(&TRAINING_TOPICS),
    )
    .or_setting(Setting::TrainingTopic),
    FieldMapping::group("ManagementTrainingRecord/TrainingPartners", 11),
    FieldMapping::field(
        "ManagementTrainingRecord/TrainingPartners/Code",
        0,
        &["Training Partner"],
        TEXT,
    )
    .repeated(DEFAULT_DELIMITERS)
    .or_setting(Setting::TrainingPartner),
    FieldMapping::field(
        "ManagementTrainingRecord/ProgramFormatType",
        12,
        &["Class/Event Type", "Program Format"],
        Cleaner::Alias(&PROGRAM_FORMATS),
    )
    .or_setting(Setting::ProgramFormat),
    FieldMapping::field(
        "ManagementTrainingRecord/DollarAmountOfFees",
        13,
        &["Fees", "Event Fee"],
        Cleaner::COUNT,
    )
    .or_setting(Setting::TrainingFees),
    FieldMapping::group("ManagementTrainingRecord/Language", 14),
    FieldMapping::field(
        "ManagementTrainingRecord/Language/Code",
        0,
        &["Language(s) Used", "Language"],
        TEXT,
    )
    .repeated(DEFAULT_DELIMITERS)
    .or_setting(Setting::Language),
    FieldMapping::field(
        "ManagementTrainingRecord/CosponsorsName",
        15,
        &[fields::COSPONSOR],
        Cleaner::text(80),
    ),
];

pub static DEFINITION: RegistryDefinition = RegistryDefinition {
    kind: DocumentKind::Training,
    document_root: DOCUMENT_ROOT,
    id_source: ID_SOURCE,
    mappings: MAPPINGS,
};
