use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use sba_model::{InputDefect, Record};
use tracing::{debug, info, warn};

use crate::error::IngestError;

/// Rows read from one CSV export.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub headers: Vec<String>,
    /// Loaded rows in file order.
    pub records: Vec<Record>,
    /// Rows that could not be turned into records.
    pub rejected: Vec<InputDefect>,
}

impl RecordBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads a CRM export.
///
/// The first non-blank row is the header. Data rows are numbered from 1 in
/// the order they appear; blank rows are skipped without using a number.
pub fn read_records(path: &Path) -> Result<RecordBatch, IngestError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => IngestError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let batch = read_records_from_reader(file).map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    if batch.headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    info!(
        path = %path.display(),
        columns = batch.headers.len(),
        rows = batch.records.len(),
        rejected = batch.rejected.len(),
        "read CSV export"
    );
    Ok(batch)
}

/// Reads CSV from any source. Only I/O failures are errors; malformed rows
/// are collected in [`RecordBatch::rejected`].
pub fn read_records_from_reader<R: Read>(input: R) -> Result<RecordBatch, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut batch = RecordBatch::default();
    let mut columns: Vec<Option<String>> = Vec::new();
    let mut row_index = 0usize;
    let mut raw = ByteRecord::new();

    loop {
        match reader.read_byte_record(&mut raw) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => {
                row_index += 1;
                batch.rejected.push(InputDefect {
                    row_index,
                    message: err.to_string(),
                });
                continue;
            }
        }
        if raw.iter().all(|cell| cell.iter().all(u8::is_ascii_whitespace)) {
            continue;
        }

        if batch.headers.is_empty() {
            batch.headers = raw
                .iter()
                .map(|cell| normalize_header(&String::from_utf8_lossy(cell)))
                .collect();
            columns = unique_columns(&batch.headers);
            continue;
        }

        row_index += 1;
        match row_to_record(row_index, &columns, &raw) {
            Ok(record) => batch.records.push(record),
            Err(message) => {
                debug!(row = row_index, %message, "row rejected");
                batch.rejected.push(InputDefect { row_index, message });
            }
        }
    }
    Ok(batch)
}

fn decode_cells(raw: &ByteRecord) -> Result<Vec<&str>, usize> {
    raw.iter()
        .enumerate()
        .map(|(index, cell)| std::str::from_utf8(cell).map_err(|_| index))
        .collect()
}

/// Header names with repeats blanked out; the first occurrence wins.
fn unique_columns(headers: &[String]) -> Vec<Option<String>> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .map(|header| {
            if header.is_empty() {
                None
            } else if seen.insert(header.as_str()) {
                Some(header.clone())
            } else {
                warn!(column = %header, "duplicate column ignored");
                None
            }
        })
        .collect()
}

fn row_to_record(
    row_index: usize,
    columns: &[Option<String>],
    raw: &ByteRecord,
) -> Result<Record, String> {
    let cells = decode_cells(raw).map_err(|index| {
        let column = columns
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or("<unnamed>");
        format!("invalid UTF-8 in column '{column}'")
    })?;
    if cells.len() > columns.len()
        && cells[columns.len()..].iter().any(|cell| !cell.trim().is_empty())
    {
        return Err(format!(
            "row has {} cells but the header has {}",
            cells.len(),
            columns.len()
        ));
    }
    let pairs = columns
        .iter()
        .zip(cells.iter().copied().chain(std::iter::repeat("")))
        .filter_map(|(column, cell)| column.as_ref().map(|column| (column.clone(), cell)));
    Ok(Record::from_pairs(row_index, pairs))
}
