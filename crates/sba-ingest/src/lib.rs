//! CSV ingestion for SBA CRM exports.
//!
//! Rows become [`sba_model::Record`]s keyed by normalized header names.
//! Malformed rows are reported per row and never stop the read.

pub mod error;
mod reader;

pub use error::IngestError;
pub use reader::{RecordBatch, read_records, read_records_from_reader};
