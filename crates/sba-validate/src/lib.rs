//! Validation engine for cleaned SBA records.
//!
//! Every finding is a [`sba_model::ValidationIssue`]; data problems never
//! abort a run. Checks:
//!
//! - **required**: missing required or recommended values, respecting
//!   mapping conditions and declared defaults
//! - **flags**: losses reported by the cleaning functions
//! - **format**: email layout and the counseling date floor
//! - **consistency**: cross-field rules such as contact hours per session type

pub mod checks;
mod validator;

pub use checks::consistency::CrossFieldRule;
pub use checks::format::FormatRule;
pub use validator::Validator;
