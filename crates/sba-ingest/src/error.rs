//! Error types for CSV ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a file from being read at all.
///
/// Problems confined to a single row are not errors; they are returned as
/// [`sba_model::InputDefect`]s alongside the rows that did load.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// No header row was found.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },
}
