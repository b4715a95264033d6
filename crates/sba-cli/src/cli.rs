//! Command-line arguments for `sba-convert`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sba_core::DEFAULT_PATTERN;
use sba_model::{DocumentKind, UnknownChildPolicy};

#[derive(Parser)]
#[command(
    name = "sba-convert",
    version,
    about = "Convert SBA CRM exports to schema-ordered XML and repair element order",
    long_about = "Convert CRM CSV exports into SBA counseling (Form 641) and management\n\
                  training XML documents whose elements follow the schema's required\n\
                  order, and reorder existing documents that do not."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row values (names, emails, phones) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a CSV export into an XML report.
    Convert(ConvertArgs),

    /// Reorder existing XML reports into schema order.
    Fix(FixArgs),

    /// List order violations in an XML report without changing it.
    Check(CheckArgs),

    /// Print the element order a document kind must follow.
    Contract(ContractArgs),

    /// Print the default conversion options as TOML.
    Config,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// CSV export to convert.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// XML file to write (default: INPUT with an .xml extension).
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory for the issues CSV and run summary (default: next to OUTPUT).
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// TOML file with conversion options.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Worker threads for row processing (default: one per core).
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Override the configured SBA location code.
    #[arg(long = "location-code", value_name = "CODE")]
    pub location_code: Option<String>,

    /// Exit with status 1 when any error-severity issue was recorded.
    #[arg(long = "fail-on-errors")]
    pub fail_on_errors: bool,
}

#[derive(Args)]
pub struct FixArgs {
    /// Fix a single XML file.
    #[arg(long, value_name = "FILE", conflicts_with = "dir", required_unless_present = "dir")]
    pub file: Option<PathBuf>,

    /// Fix every matching file in a directory.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output file (with --file) or directory (with --dir). Fixes in place
    /// when omitted.
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// Descend into subdirectories.
    #[arg(long)]
    pub recursive: bool,

    /// File name suffix to match in directory mode.
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Do not keep a timestamped .bak copy when fixing in place.
    #[arg(long = "no-backup")]
    pub no_backup: bool,

    /// Document kind (default: detected from the root element).
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// What to do with children the schema does not list (default: the
    /// config's `unknown_children`, else append).
    #[arg(long = "unknown-children", value_enum)]
    pub unknown_children: Option<UnknownChildrenArg>,

    /// TOML file with conversion options; only `unknown_children` applies.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
}

#[derive(Args)]
pub struct ContractArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Form 641 counseling information.
    Counseling,
    /// Management training report.
    Training,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Counseling => DocumentKind::Counseling,
            KindArg::Training => DocumentKind::Training,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnknownChildrenArg {
    /// Keep them after the known children.
    Append,
    /// Leave the document untouched and report it.
    Reject,
}

impl From<UnknownChildrenArg> for UnknownChildPolicy {
    fn from(policy: UnknownChildrenArg) -> Self {
        match policy {
            UnknownChildrenArg::Append => UnknownChildPolicy::AppendAfterKnown,
            UnknownChildrenArg::Reject => UnknownChildPolicy::Reject,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fix_needs_a_file_or_a_directory() {
        assert!(Cli::try_parse_from(["sba-convert", "fix"]).is_err());
        assert!(
            Cli::try_parse_from(["sba-convert", "fix", "--file", "a.xml", "--dir", "d"]).is_err()
        );

        let cli = Cli::try_parse_from(["sba-convert", "fix", "--dir", "reports", "--recursive"])
            .expect("parse");
        let Command::Fix(args) = cli.command else {
            panic!("expected fix");
        };
        assert!(args.recursive);
        assert_eq!(args.pattern, "*.xml");
        assert!(args.unknown_children.is_none());
        assert!(args.config.is_none());

        let cli = Cli::try_parse_from([
            "sba-convert",
            "fix",
            "--file",
            "a.xml",
            "--config",
            "sba.toml",
            "--unknown-children",
            "reject",
        ])
        .expect("parse");
        let Command::Fix(args) = cli.command else {
            panic!("expected fix");
        };
        assert!(matches!(args.unknown_children, Some(UnknownChildrenArg::Reject)));
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("sba.toml")));
    }

    #[test]
    fn convert_requires_a_kind() {
        assert!(Cli::try_parse_from(["sba-convert", "convert", "in.csv"]).is_err());
        let cli = Cli::try_parse_from([
            "sba-convert",
            "convert",
            "--kind",
            "training",
            "in.csv",
            "--jobs",
            "2",
            "-v",
        ])
        .expect("parse");
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(DocumentKind::from(args.kind), DocumentKind::Training);
        assert_eq!(args.jobs, Some(2));
    }
}
