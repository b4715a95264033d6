//! Run configuration: defaults substituted for absent values and fixer policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which SBA report a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Form 641 counseling information report.
    #[default]
    Counseling,
    /// Management training report.
    Training,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Counseling => "counseling",
            DocumentKind::Training => "training",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counseling" | "641" => Ok(DocumentKind::Counseling),
            "training" => Ok(DocumentKind::Training),
            _ => Err(format!("unknown document kind: {s}")),
        }
    }
}

/// What the reorderer does with children a known group does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownChildPolicy {
    /// Keep them after all known children, in their original relative order.
    #[default]
    AppendAfterKnown,
    /// Refuse to reorder a document that contains them.
    Reject,
}

impl UnknownChildPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            UnknownChildPolicy::AppendAfterKnown => "append-after-known",
            UnknownChildPolicy::Reject => "reject",
        }
    }
}

/// Named default substituted when a mapped value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    LocationCode,
    Language,
    SessionType,
    BusinessStatus,
    SurveyAgreement,
    UrbanRural,
    CounselingType,
    TrainingSessions,
    TrainingHours,
    TrainingTitlePrefix,
    TrainingTopic,
    ProgramFormat,
    TrainingPartner,
    TrainingFees,
    TrainingStartDate,
    TrainingCity,
    TrainingState,
    TrainingZip,
    TrainingCountry,
}

/// Defaults specific to the management training report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingDefaults {
    pub sessions: String,
    pub hours: String,
    pub title_prefix: String,
    pub topic: String,
    pub program_format: String,
    pub partner: String,
    pub fees: String,
    pub start_date: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Default for TrainingDefaults {
    fn default() -> Self {
        Self {
            sessions: "1".to_string(),
            hours: "1.5".to_string(),
            title_prefix: "Training Event ".to_string(),
            topic: "Technology".to_string(),
            program_format: "In-person".to_string(),
            partner: "Women's Business Center".to_string(),
            fees: "0".to_string(),
            start_date: "2023-12-12".to_string(),
            city: "Des Moines".to_string(),
            state: "Iowa".to_string(),
            zip: "50312".to_string(),
            country: "United States".to_string(),
        }
    }
}

/// Options controlling a conversion run.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub location_code: String,
    pub language: String,
    pub session_type: String,
    pub business_status: String,
    pub survey_agreement: String,
    pub urban_rural: String,
    pub counseling_type: String,
    /// Earliest acceptable counseling date, `YYYY-MM-DD`.
    pub min_counseling_date: String,
    pub notes_max_len: usize,
    pub unknown_children: UnknownChildPolicy,
    pub training: TrainingDefaults,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            location_code: "249003".to_string(),
            language: "English".to_string(),
            session_type: "Telephone".to_string(),
            business_status: "No".to_string(),
            survey_agreement: "No".to_string(),
            urban_rural: "Undetermined".to_string(),
            counseling_type: "Business Start-up/Preplanning".to_string(),
            min_counseling_date: "2023-10-01".to_string(),
            notes_max_len: 1000,
            unknown_children: UnknownChildPolicy::default(),
            training: TrainingDefaults::default(),
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location_code(mut self, code: impl Into<String>) -> Self {
        self.location_code = code.into();
        self
    }

    pub fn with_min_counseling_date(mut self, date: impl Into<String>) -> Self {
        self.min_counseling_date = date.into();
        self
    }

    pub fn with_unknown_children(mut self, policy: UnknownChildPolicy) -> Self {
        self.unknown_children = policy;
        self
    }

    /// Resolves a named default.
    pub fn setting(&self, setting: Setting) -> &str {
        match setting {
            Setting::LocationCode => &self.location_code,
            Setting::Language => &self.language,
            Setting::SessionType => &self.session_type,
            Setting::BusinessStatus => &self.business_status,
            Setting::SurveyAgreement => &self.survey_agreement,
            Setting::UrbanRural => &self.urban_rural,
            Setting::CounselingType => &self.counseling_type,
            Setting::TrainingSessions => &self.training.sessions,
            Setting::TrainingHours => &self.training.hours,
            Setting::TrainingTitlePrefix => &self.training.title_prefix,
            Setting::TrainingTopic => &self.training.topic,
            Setting::ProgramFormat => &self.training.program_format,
            Setting::TrainingPartner => &self.training.partner,
            Setting::TrainingFees => &self.training.fees,
            Setting::TrainingStartDate => &self.training.start_date,
            Setting::TrainingCity => &self.training.city,
            Setting::TrainingState => &self.training.state,
            Setting::TrainingZip => &self.training.zip,
            Setting::TrainingCountry => &self.training.country,
        }
    }
}
