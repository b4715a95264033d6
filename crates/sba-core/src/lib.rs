//! Conversion and fix pipelines.
//!
//! A [`RunContext`] is built once per run and shared read-only by every row.
//! Rows are processed in parallel and collected back in input order.

pub mod context;
pub mod convert;
pub mod fix;

pub use context::RunContext;
pub use convert::{ConversionOutput, convert_batch, convert_file, convert_records};
pub use fix::{
    DEFAULT_PATTERN, DirectoryFix, DocumentFixer, FileCheck, FileFix, FixFailure, FixOptions,
    backup_path, detect_kind,
};
