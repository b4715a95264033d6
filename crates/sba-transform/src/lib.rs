//! Cleaning and normalization for SBA CRM export values.
//!
//! Every cleaning function is pure and returns a [`sba_model::Cleaned`]:
//! the normalized value plus an optional flag describing any loss. Flags
//! are turned into validation issues downstream; nothing here logs or
//! records issues itself.
//!
//! - **datetime**: multi-layout date parsing to `YYYY-MM-DD`
//! - **numeric**: currency, counts and percentages with clamping
//! - **text**: whitespace cleanup, word-boundary truncation, ZIP codes
//! - **phone**: country-aware digit normalization
//! - **region**: state and country standardization
//! - **lookup**: alias tables onto closed schema vocabularies
//! - **multi**: multi-value cell splitting
//! - **rollup**: training attendee rows folded into per-event records

pub mod datetime;
pub mod lookup;
pub mod multi;
pub mod numeric;
pub mod phone;
pub mod region;
pub mod rollup;
pub mod text;

pub use datetime::{format_date, is_on_or_after, parse_date};
pub use lookup::{
    AliasTable, NO_CONTACT_SESSION_TYPES, PROGRAM_FORMATS, SESSION_TYPES, TRAINING_TOPICS,
    map_alias, map_gender_to_sex, yes_no_flag,
};
pub use multi::{DEFAULT_DELIMITERS, split_multi_value};
pub use numeric::{clean_numeric, clean_percentage, format_numeric, parse_f64};
pub use phone::clean_phone;
pub use region::{is_united_states, standardize_country, standardize_state};
pub use rollup::{Demographics, EventRollup, RollupResult, roll_up_events};
pub use text::{clean_notes, clean_whitespace, initial, truncate_text, zip4, zip5};
