use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use sba_cli::config::{default_options_toml, load_options, unknown_child_policy};
use sba_cli::logging::redact_value;
use sba_core::{
    ConversionOutput, DirectoryFix, DocumentFixer, FileCheck, FileFix, FixOptions, RunContext,
    convert_file,
};
use sba_map::MappingRegistry;
use sba_model::{DocumentKind, UnknownChildPolicy, ValidationReport};
use sba_report::{write_issues_csv, write_summary_json};
use tracing::{info, info_span, trace};

use crate::cli::{CheckArgs, ContractArgs, ConvertArgs, FixArgs};

pub struct ConvertRun {
    pub kind: DocumentKind,
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: ConversionOutput,
    pub issues_csv: Option<PathBuf>,
    pub summary_json: PathBuf,
}

pub enum FixRun {
    File(FileFix),
    Directory(DirectoryFix),
}

impl FixRun {
    pub fn has_failures(&self) -> bool {
        match self {
            FixRun::File(_) => false,
            FixRun::Directory(result) => !result.failed.is_empty(),
        }
    }
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertRun> {
    let kind = DocumentKind::from(args.kind);
    let span = info_span!("convert", kind = %kind, input = %args.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let mut options = load_options(args.config.as_deref())?;
    if let Some(code) = &args.location_code {
        options.location_code = code.clone();
    }
    let ctx = RunContext::new(kind, options)
        .context("mapping registry is inconsistent")?
        .with_jobs(args.jobs);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("xml"));
    let result = convert_file(&ctx, &args.input, &output)?;
    trace_issues(&result.report);

    let report_dir = args
        .report_dir
        .clone()
        .unwrap_or_else(|| parent_dir(&output));
    let issues_csv = write_issues_csv(&result.report, &report_dir).context("write issues CSV")?;
    let summary_json =
        write_summary_json(&result.report, &report_dir).context("write run summary")?;

    info!(
        records = result.record_count(),
        elapsed_ms = started.elapsed().as_millis(),
        "convert complete"
    );
    Ok(ConvertRun {
        kind,
        input: args.input.clone(),
        output,
        result,
        issues_csv,
        summary_json,
    })
}

pub fn run_fix(args: &FixArgs) -> Result<FixRun> {
    let policy = unknown_child_policy(
        args.config.as_deref(),
        args.unknown_children.map(UnknownChildPolicy::from),
    )?;
    let options = FixOptions {
        policy,
        backup: !args.no_backup,
        recursive: args.recursive,
        pattern: args.pattern.clone(),
        kind: args.kind.map(DocumentKind::from),
    };
    let fixer = DocumentFixer::new(options).context("mapping registry is inconsistent")?;
    if let Some(dir) = &args.dir {
        return Ok(FixRun::Directory(
            fixer.fix_directory(dir, args.output.as_deref())?,
        ));
    }
    let file = args
        .file
        .as_deref()
        .context("either --file or --dir is required")?;
    Ok(FixRun::File(fixer.fix_file(file, args.output.as_deref())?))
}

pub fn run_check(args: &CheckArgs) -> Result<FileCheck> {
    let fixer = DocumentFixer::new(FixOptions {
        kind: args.kind.map(DocumentKind::from),
        ..FixOptions::default()
    })
    .context("mapping registry is inconsistent")?;
    fixer.check_file(&args.file)
}

pub fn run_contract(args: &ContractArgs) -> Result<MappingRegistry> {
    sba_map::registry(args.kind.into()).context("mapping registry is inconsistent")
}

pub fn run_config() -> Result<()> {
    print!("{}", default_options_toml()?);
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn trace_issues(report: &ValidationReport) {
    for issue in report.issues() {
        trace!(
            row = redact_value(issue.row_id.as_str()),
            severity = %issue.severity,
            category = %issue.category,
            field = %issue.field,
            message = redact_value(&issue.message),
            "validation issue"
        );
    }
}
