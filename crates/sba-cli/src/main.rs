//! `sba-convert`: CRM exports to SBA XML, plus an order fixer for existing
//! reports.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use sba_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_check, run_config, run_contract, run_convert, run_fix};
use crate::summary::{print_check, print_contract, print_convert_summary, print_fix_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Convert(args) => match run_convert(&args) {
            Ok(run) => {
                print_convert_summary(&run);
                if args.fail_on_errors && run.result.report.has_errors() {
                    1
                } else {
                    0
                }
            }
            Err(error) => report_error(&error),
        },
        Command::Fix(args) => match run_fix(&args) {
            Ok(run) => {
                print_fix_summary(&run);
                if run.has_failures() { 1 } else { 0 }
            }
            Err(error) => report_error(&error),
        },
        Command::Check(args) => match run_check(&args) {
            Ok(check) => {
                print_check(&check);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Contract(args) => match run_contract(&args) {
            Ok(registry) => {
                print_contract(&registry);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Config => match run_config() {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Logging settings from the global flags. `--log-level` beats `-v`/`-q`,
/// and either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level(cli.verbosity.tracing_level_filter())
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        });
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
