//! Form 641 counseling information registry.

use sba_model::{CleanedRecord, DocumentKind, Setting};
use sba_transform::{DEFAULT_DELIMITERS, SESSION_TYPES};

use crate::cleaner::Cleaner;
use crate::mapping::FieldMapping;
use crate::registry::RegistryDefinition;

pub const DOCUMENT_ROOT: &str = "CounselingInformation";
pub const RECORD_ROOT: &str = "CounselingRecord";
pub const ID_SOURCE: &str = "Contact ID";

pub const MILITARY_STATUS: &str = "CounselingRecord/ClientIntake/MilitaryStatus";
pub const BRANCH_OF_SERVICE: &str = "CounselingRecord/ClientIntake/BranchOfService";
pub const CURRENTLY_IN_BUSINESS: &str = "CounselingRecord/ClientIntake/CurrentlyInBusiness";
pub const RURAL_VS_URBAN: &str = "CounselingRecord/ClientIntake/Rural_vs_Urban";
pub const FIPS_CODE: &str = "CounselingRecord/ClientIntake/FIPS_Code";
pub const LEGAL_ENTITY_CODE: &str = "CounselingRecord/ClientIntake/LegalEntity/Code";
pub const LEGAL_ENTITY_OTHER: &str = "CounselingRecord/ClientIntake/LegalEntity/Other";
pub const SEEKING_CODE: &str = "CounselingRecord/ClientIntake/CounselingSeeking/Code";
pub const SEEKING_OTHER: &str = "CounselingRecord/ClientIntake/CounselingSeeking/Other";
pub const EMAIL: &str = "CounselingRecord/ClientRequest/Email";
pub const SESSION_TYPE: &str = "CounselingRecord/CounselorRecord/SessionType";
pub const DATE_COUNSELED: &str = "CounselingRecord/CounselorRecord/DateCounseled";
pub const CONTACT_HOURS: &str = "CounselingRecord/CounselorRecord/CounselingHours/Contact";

const COUNTRY_SOURCES: &[&str] = &["Mailing Country"];
const PHONE: Cleaner = Cleaner::Phone {
    country_sources: COUNTRY_SOURCES,
};
const TEXT: Cleaner = Cleaner::Text { max_len: None };

const NO_SERVICE: &[&str] = &[
    "prefer not to say",
    "no military service",
    "no",
    "none",
    "civilian",
    "n/a",
];

/// Military status indicates current or former service.
///
/// Any status other than an explicit non-service answer counts, so an
/// unfamiliar value still requires a branch instead of dropping it silently.
pub fn has_served(record: &CleanedRecord) -> bool {
    record.text(MILITARY_STATUS).is_some_and(|status| {
        !NO_SERVICE
            .iter()
            .any(|answer| status.trim().eq_ignore_ascii_case(answer))
    })
}

pub fn is_in_business(record: &CleanedRecord) -> bool {
    record.text(CURRENTLY_IN_BUSINESS) == Some("Yes")
}

pub fn is_rural_or_urban(record: &CleanedRecord) -> bool {
    record
        .text(RURAL_VS_URBAN)
        .is_some_and(|value| value.eq_ignore_ascii_case("rural") || value.eq_ignore_ascii_case("urban"))
}

pub static MAPPINGS: &[FieldMapping] = &[
    FieldMapping::group("CounselingRecord", 0),
    FieldMapping::field(
        "CounselingRecord/PartnerClientNumber",
        0,
        &["Contact ID"],
        Cleaner::text(20),
    )
    .required(),
    FieldMapping::group("CounselingRecord/Location", 1),
    FieldMapping::field(
        "CounselingRecord/Location/LocationCode",
        0,
        &["LocationCode", "Location Code"],
        TEXT,
    )
    .or_setting(Setting::LocationCode),
    // Part 1: client request.
    FieldMapping::group("CounselingRecord/ClientRequest", 2),
    FieldMapping::group("CounselingRecord/ClientRequest/ClientNamePart1", 0),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/ClientNamePart1/Last",
        0,
        &["Last Name"],
        Cleaner::text(40),
    )
    .recommended(),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/ClientNamePart1/First",
        1,
        &["First Name"],
        Cleaner::text(40),
    )
    .recommended(),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/ClientNamePart1/Middle",
        2,
        &["Middle Name"],
        Cleaner::Initial,
    ),
    FieldMapping::field(EMAIL, 1, &["Email"], Cleaner::text(80)),
    FieldMapping::group("CounselingRecord/ClientRequest/PhonePart1", 2),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/PhonePart1/Primary",
        0,
        &["Contact: Phone", "Phone"],
        PHONE,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/PhonePart1/Secondary",
        1,
        &["Secondary Phone", "Mobile"],
        PHONE,
    ),
    FieldMapping::group("CounselingRecord/ClientRequest/AddressPart1", 3),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/AddressPart1/Street1",
        0,
        &["Mailing Street"],
        Cleaner::text(80),
    ),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/AddressPart1/Street2",
        1,
        &["Mailing Street 2"],
        Cleaner::text(80),
    ),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/AddressPart1/City",
        2,
        &["Mailing City"],
        Cleaner::text(80),
    ),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/AddressPart1/State",
        3,
        &["Mailing State/Province"],
        Cleaner::State,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/AddressPart1/ZipCode",
        4,
        &["Mailing Zip/Postal Code"],
        Cleaner::Zip5,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/AddressPart1/Zip4Code",
        5,
        &["Mailing Zip/Postal Code"],
        Cleaner::Zip4,
    ),
    FieldMapping::group("CounselingRecord/ClientRequest/AddressPart1/Country", 6),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/AddressPart1/Country/Code",
        0,
        COUNTRY_SOURCES,
        Cleaner::Country,
    )
    .or_literal("United States"),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/SurveyAgreement",
        4,
        &["Agree to Impact Survey"],
        Cleaner::YesNo,
    )
    .or_setting(Setting::SurveyAgreement),
    FieldMapping::group("CounselingRecord/ClientRequest/ClientSignature", 5),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/ClientSignature/Date",
        0,
        &["Client Signature - Date"],
        Cleaner::Date,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientRequest/ClientSignature/OnFile",
        1,
        &["Client Signature(On File)"],
        Cleaner::YesNo,
    )
    .or_literal("No"),
    // Part 2: client intake.
    FieldMapping::group("CounselingRecord/ClientIntake", 3),
    FieldMapping::group("CounselingRecord/ClientIntake/Race", 0),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Race/Code",
        0,
        &["Race"],
        TEXT,
    )
    .repeated(DEFAULT_DELIMITERS)
    .recommended()
    .or_literal("Prefer not to say"),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Race/SelfDescribedRace",
        1,
        &["Self-Described Race"],
        TEXT,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Ethnicity",
        1,
        &["Ethnicity:", "Ethnicity::", "Ethnicity"],
        TEXT,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Sex",
        2,
        &["Gender", "Sex"],
        Cleaner::Gender,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Disability",
        3,
        &["Disability"],
        TEXT,
    ),
    FieldMapping::field(MILITARY_STATUS, 4, &["Veteran Status", "Military Status"], TEXT),
    FieldMapping::field(BRANCH_OF_SERVICE, 5, &["Branch Of Service"], TEXT)
        .required()
        .when("military status indicates service", has_served),
    FieldMapping::group("CounselingRecord/ClientIntake/Media", 6),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Media/Code",
        0,
        &["What Prompted you to contact us?"],
        TEXT,
    )
    .repeated(DEFAULT_DELIMITERS),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Media/Other",
        1,
        &["Internet (specify)"],
        TEXT,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Internet",
        7,
        &["InternetUsage"],
        TEXT,
    ),
    FieldMapping::field(
        CURRENTLY_IN_BUSINESS,
        8,
        &["Currently In Business?", "Currently in Business?"],
        Cleaner::YesNo,
    )
    .or_setting(Setting::BusinessStatus),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/CurrentlyExporting",
        9,
        &["Are you currently exporting?", "Are you currently exporting?(old)"],
        Cleaner::YesNo,
    )
    .or_setting(Setting::BusinessStatus),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/CompanyName",
        10,
        &["Account Name"],
        Cleaner::text(80),
    ),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/BusinessType",
        11,
        &["Type of Business"],
        TEXT,
    ),
    FieldMapping::group("CounselingRecord/ClientIntake/BusinessOwnership", 12),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/BusinessOwnership/Female",
        0,
        &[
            "Business Ownership - % Female",
            "Business Ownership - % Female(old)",
        ],
        Cleaner::Percentage,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/ConductingBusinessOnline",
        13,
        &["Conduct Business Online?"],
        Cleaner::YesNo,
    )
    .or_setting(Setting::BusinessStatus),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/ClientIntake_Certified8a",
        14,
        &["8(a) Certified?", "8(a) Certified?(old)"],
        Cleaner::YesNo,
    )
    .or_setting(Setting::BusinessStatus),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/Employee_Owned",
        15,
        &["Employee Owned?"],
        Cleaner::YesNo,
    ),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/TotalNumberOfEmployees",
        16,
        &["Total Number of Employees"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/NumberOfEmployeesInExportingBusiness",
        17,
        &["Employees in Exporting Business"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::group("CounselingRecord/ClientIntake/ClientAnnualIncomePart2", 18),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/ClientAnnualIncomePart2/GrossRevenues",
        0,
        &["Gross Revenues/Sales"],
        Cleaner::AMOUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/ClientAnnualIncomePart2/ProfitLoss",
        1,
        &["Profits/Losses"],
        Cleaner::AMOUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/ClientAnnualIncomePart2/ExportGrossRevenuesOrSales",
        2,
        &["Export Gross Revenues"],
        Cleaner::AMOUNT,
    )
    .or_literal("0"),
    FieldMapping::group("CounselingRecord/ClientIntake/LegalEntity", 19)
        .when("client is in business", is_in_business),
    FieldMapping::field(LEGAL_ENTITY_CODE, 0, &["Legal Entity of Business"], TEXT)
        .repeated(DEFAULT_DELIMITERS)
        .required()
        .or_literal("Other"),
    FieldMapping::field(
        LEGAL_ENTITY_OTHER,
        1,
        &["Other legal entity (specify)"],
        TEXT,
    ),
    FieldMapping::field(RURAL_VS_URBAN, 20, &["Rural_vs_Urban"], TEXT)
        .or_setting(Setting::UrbanRural),
    FieldMapping::field(FIPS_CODE, 21, &["FIPS_Code"], TEXT)
        .required()
        .when("rural or urban designation", is_rural_or_urban),
    FieldMapping::group("CounselingRecord/ClientIntake/CounselingSeeking", 22),
    FieldMapping::field(
        SEEKING_CODE,
        0,
        &["Nature of the Counseling Seeking?"],
        TEXT,
    )
    .repeated(DEFAULT_DELIMITERS),
    FieldMapping::field(
        SEEKING_OTHER,
        1,
        &["Nature of the Counseling Seeking - Other Detail"],
        TEXT,
    ),
    FieldMapping::group("CounselingRecord/ClientIntake/ExportCountries", 23),
    FieldMapping::field(
        "CounselingRecord/ClientIntake/ExportCountries/Code",
        0,
        &["Export Countries"],
        Cleaner::Country,
    )
    .repeated(DEFAULT_DELIMITERS),
    // Part 3: counselor record.
    FieldMapping::group("CounselingRecord/CounselorRecord", 4),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/PartnerSessionNumber",
        0,
        &["Activity ID"],
        Cleaner::text(20),
    )
    .required(),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/FundingSource",
        1,
        &["Funding Source"],
        TEXT,
    ),
    FieldMapping::group("CounselingRecord/CounselorRecord/ClientNamePart3", 2),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ClientNamePart3/Last",
        0,
        &["Last Name"],
        Cleaner::text(40),
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ClientNamePart3/First",
        1,
        &["First Name"],
        Cleaner::text(40),
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ClientNamePart3/Middle",
        2,
        &["Middle Name"],
        Cleaner::Initial,
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/Email",
        3,
        &["Email"],
        Cleaner::text(80),
    ),
    FieldMapping::group("CounselingRecord/CounselorRecord/PhonePart3", 4),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/PhonePart3/Primary",
        0,
        &["Contact: Phone", "Phone"],
        PHONE,
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/PhonePart3/Secondary",
        1,
        &["Secondary Phone", "Mobile"],
        PHONE,
    ),
    FieldMapping::group("CounselingRecord/CounselorRecord/AddressPart3", 5),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/AddressPart3/Street1",
        0,
        &["Mailing Street"],
        Cleaner::text(80),
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/AddressPart3/Street2",
        1,
        &["Mailing Street 2"],
        Cleaner::text(80),
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/AddressPart3/City",
        2,
        &["Mailing City"],
        Cleaner::text(80),
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/AddressPart3/State",
        3,
        &["Mailing State/Province"],
        Cleaner::State,
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/AddressPart3/ZipCode",
        4,
        &["Mailing Zip/Postal Code"],
        Cleaner::Zip5,
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/AddressPart3/Zip4Code",
        5,
        &["Mailing Zip/Postal Code"],
        Cleaner::Zip4,
    ),
    FieldMapping::group("CounselingRecord/CounselorRecord/AddressPart3/Country", 6),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/AddressPart3/Country/Code",
        0,
        COUNTRY_SOURCES,
        Cleaner::Country,
    )
    .or_literal("United States"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/VerifiedToBeInBusiness",
        6,
        &["Verified To Be In Business"],
        TEXT,
    )
    .or_literal("Undetermined"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ReportableImpact",
        7,
        &["Reportable Impact"],
        Cleaner::YesNo,
    )
    .or_setting(Setting::BusinessStatus),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/DateOfReportableImpact",
        8,
        &["Reportable Impact Date"],
        Cleaner::Date,
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/CurrentlyExporting",
        9,
        &["Currently Exporting (Meeting)"],
        Cleaner::YesNo,
    )
    .or_setting(Setting::BusinessStatus),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/BusinessStartDatePart3",
        10,
        &["Business Start Date", "Date Started (Meeting)"],
        Cleaner::Date,
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/TotalNumberOfEmployees",
        11,
        &["Total No. of Employees (Meeting)", "Total Number of Employees"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/NumberOfEmployeesInExportingBusiness",
        12,
        &["Employees in Exporting Business (Meeting)"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::group("CounselingRecord/CounselorRecord/ClientAnnualIncomePart3", 13),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ClientAnnualIncomePart3/GrossRevenues",
        0,
        &["Gross Revenues/Sales (Meeting)", "Gross Revenues/Sales"],
        Cleaner::AMOUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ClientAnnualIncomePart3/ProfitLoss",
        1,
        &["Profit & Loss (Meeting)", "Profits/Losses"],
        Cleaner::AMOUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ClientAnnualIncomePart3/ExportGrossRevenuesOrSales",
        2,
        &["Export Gross Revenues (Meeting)"],
        Cleaner::AMOUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/ClientAnnualIncomePart3/GrowthIndicator",
        3,
        &["Growth Indicator"],
        TEXT,
    ),
    FieldMapping::group("CounselingRecord/CounselorRecord/CounselingProvided", 14),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/CounselingProvided/Code",
        0,
        &["Services Provided"],
        TEXT,
    )
    .repeated(DEFAULT_DELIMITERS)
    .required()
    .or_setting(Setting::CounselingType),
    FieldMapping::field(
        SESSION_TYPE,
        15,
        &["Type of Session"],
        Cleaner::Alias(&SESSION_TYPES),
    )
    .required()
    .or_setting(Setting::SessionType),
    FieldMapping::group("CounselingRecord/CounselorRecord/Language", 16),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/Language/Code",
        0,
        &["Language(s) Used"],
        TEXT,
    )
    .repeated(DEFAULT_DELIMITERS)
    .or_setting(Setting::Language),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/Language/Other",
        1,
        &["Language(s) Used (Other)"],
        TEXT,
    ),
    FieldMapping::field(DATE_COUNSELED, 17, &["Date"], Cleaner::Date).required(),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/CounselorName",
        18,
        &["Name of Counselor"],
        Cleaner::text(80),
    )
    .recommended(),
    FieldMapping::group("CounselingRecord/CounselorRecord/CounselingHours", 19),
    FieldMapping::field(CONTACT_HOURS, 0, &["Duration (hours)"], Cleaner::COUNT).or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/CounselingHours/Prepare",
        1,
        &["Prep Hours"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/CounselingHours/Travel",
        2,
        &["Travel Hours"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/CounselorNotes",
        20,
        &["Comments"],
        Cleaner::Notes,
    ),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/SBALoanAmount",
        21,
        &["SBA Loan Amount"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/NonSBALoanAmount",
        22,
        &["Non-SBA Loan Amount"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
    FieldMapping::field(
        "CounselingRecord/CounselorRecord/EquityCapitalReceived",
        23,
        &["Amount of Equity Capital Received"],
        Cleaner::COUNT,
    )
    .or_literal("0"),
];

pub static DEFINITION: RegistryDefinition = RegistryDefinition {
    kind: DocumentKind::Counseling,
    document_root: DOCUMENT_ROOT,
    id_source: ID_SOURCE,
    mappings: MAPPINGS,
};
