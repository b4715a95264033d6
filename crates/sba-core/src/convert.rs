//! CSV rows to a schema-ordered XML document.

use std::path::Path;

use anyhow::{Context, Result};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use sba_ingest::{RecordBatch, read_records};
use sba_map::clean_record;
use sba_model::{
    DocumentKind, ElementNode, IssueCategory, Record, RowId, ValidationIssue, ValidationReport,
};
use sba_transform::roll_up_events;
use sba_transform::rollup::fields;
use sba_validate::Validator;
use sba_xml::{OrderedBuilder, write_document_file};
use tracing::{debug, info, info_span, warn};

use crate::context::RunContext;

/// Built document plus the run's validation report.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub document: ElementNode,
    pub report: ValidationReport,
}

impl ConversionOutput {
    pub fn record_count(&self) -> usize {
        self.document.children.len()
    }
}

/// Converts records into one document.
///
/// Training rows are first rolled up per event. Rows are cleaned,
/// validated and built in parallel; records and issues are then collected
/// in input order so the result matches a sequential run.
pub fn convert_records(ctx: &RunContext, records: &[Record]) -> ConversionOutput {
    let span = info_span!("convert", kind = %ctx.kind, rows = records.len());
    let _guard = span.enter();

    let mut report = ValidationReport::new();
    let rolled_up;
    let rows: &[Record] = match ctx.kind {
        DocumentKind::Counseling => records,
        DocumentKind::Training => {
            let rollup = roll_up_events(records);
            for row_index in &rollup.rows_without_event {
                report.push(ValidationIssue::error(
                    IssueCategory::MissingRequired,
                    *row_index,
                    RowId::positional(*row_index),
                    fields::EVENT_ID,
                    "row has no event id and was left out of the roll-up",
                ));
            }
            info!(
                events = rollup.events.len(),
                skipped = rollup.rows_without_event.len(),
                "training rows rolled up"
            );
            rolled_up = rollup
                .events
                .into_iter()
                .map(|event| event.record)
                .collect::<Vec<_>>();
            &rolled_up
        }
    };

    let results = run_rows(ctx, rows);
    let builder = OrderedBuilder::new(&ctx.registry, &ctx.options);
    let mut elements = Vec::with_capacity(results.len());
    for (element, issues) in results {
        report.extend(issues);
        report.record_processed();
        elements.push(element);
    }

    info!(
        records = elements.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "conversion finished"
    );
    ConversionOutput {
        document: builder.build_document(elements),
        report,
    }
}

/// Converts a batch read from CSV, carrying its rejected rows into the
/// report as input defects.
pub fn convert_batch(ctx: &RunContext, batch: &RecordBatch) -> ConversionOutput {
    let mut output = convert_records(ctx, &batch.records);
    for defect in &batch.rejected {
        warn!(row = defect.row_index, message = %defect.message, "row could not be read");
        output
            .report
            .record_input_defect(defect.row_index, defect.message.clone());
    }
    output
}

/// Reads `input`, converts it and writes the document to `output`.
pub fn convert_file(ctx: &RunContext, input: &Path, output: &Path) -> Result<ConversionOutput> {
    let batch = read_records(input).with_context(|| format!("read {}", input.display()))?;
    let result = convert_batch(ctx, &batch);
    write_document_file(&result.document, output)
        .with_context(|| format!("write {}", output.display()))?;
    info!(path = %output.display(), records = result.record_count(), "document written");
    Ok(result)
}

fn run_rows(ctx: &RunContext, rows: &[Record]) -> Vec<(ElementNode, Vec<ValidationIssue>)> {
    let work = || -> Vec<(ElementNode, Vec<ValidationIssue>)> {
        let mut results: Vec<_> = rows
            .par_iter()
            .enumerate()
            .map(|(ordinal, row)| (ordinal, process_row(ctx, row)))
            .collect();
        results.sort_by_key(|(ordinal, _)| *ordinal);
        results.into_iter().map(|(_, result)| result).collect()
    };

    let Some(jobs) = ctx.jobs else {
        return work();
    };
    match ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(work),
        Err(err) => {
            warn!(jobs, error = %err, "could not build worker pool; using the global pool");
            work()
        }
    }
}

fn process_row(ctx: &RunContext, row: &Record) -> (ElementNode, Vec<ValidationIssue>) {
    let cleaned = clean_record(&ctx.registry, &ctx.options, row);
    let issues = Validator::new(&ctx.registry, &ctx.options).validate(&cleaned);
    let element = OrderedBuilder::new(&ctx.registry, &ctx.options).build_record(&cleaned);
    debug!(row = row.row_index(), issues = issues.len(), "row converted");
    (element, issues)
}
