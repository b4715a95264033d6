//! On-disk reports for a conversion run.
//!
//! - **issues CSV**: one line per validation issue, in row order
//! - **summary JSON**: run counts plus unreadable input rows

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use sba_model::{InputDefect, ReportSummary, ValidationReport};
use serde::Serialize;

const SUMMARY_SCHEMA: &str = "sba-convert.run-summary";
const SUMMARY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct IssueRow<'a> {
    row_id: &'a str,
    severity: &'a str,
    category: &'a str,
    field: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct SummaryPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    #[serde(flatten)]
    summary: ReportSummary,
    unreadable_rows: &'a [InputDefect],
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Writes `validation_issues_<timestamp>.csv` into `dir`.
///
/// Returns `None` without creating a file when the run had no issues.
pub fn write_issues_csv(report: &ValidationReport, dir: &Path) -> Result<Option<PathBuf>> {
    if report.issues().is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(format!("validation_issues_{}.csv", timestamp()));
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("create {}", path.display()))?;
    for issue in report.issues() {
        writer.serialize(IssueRow {
            row_id: issue.row_id.as_str(),
            severity: issue.severity.as_str(),
            category: issue.category.as_str(),
            field: &issue.field,
            message: &issue.message,
        })?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(Some(path))
}

/// Writes `run_summary_<timestamp>.json` into `dir`.
pub fn write_summary_json(report: &ValidationReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(format!("run_summary_{}.json", timestamp()));
    let payload = SummaryPayload {
        schema: SUMMARY_SCHEMA,
        schema_version: SUMMARY_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        summary: report.summary(),
        unreadable_rows: report.input_defects(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(&path, format!("{json}\n")).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
