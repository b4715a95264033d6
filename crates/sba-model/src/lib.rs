pub mod error;
pub mod issue;
pub mod node;
pub mod options;
pub mod record;
pub mod value;

pub use error::{ContractError, Result};
pub use issue::{
    InputDefect, IssueCategory, ReportSummary, Severity, ValidationIssue, ValidationReport,
};
pub use node::ElementNode;
pub use options::{ConversionOptions, DocumentKind, Setting, TrainingDefaults, UnknownChildPolicy};
pub use record::{Record, RowId, is_missing_value};
pub use value::{CleanFlag, Cleaned, CleanedField, CleanedRecord, CleanedValue};
