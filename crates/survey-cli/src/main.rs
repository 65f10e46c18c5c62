//! Survey analysis CLI.

use chrono::Local;
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use survey_cli::commands::{default_output_dir, run_analyze, run_questions};
use survey_cli::logging::{LogConfig, LogFormat, init_logging};
use survey_cli::types::AnalyzeOptions;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{AnalyzeArgs, Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_inventory, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Analyze(args) => match run_analyze(&analyze_options(args)) {
            Ok(result) => {
                print_summary(&result);
                if result.has_failures() { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Questions(args) => match run_questions(
            &args.csv,
            args.config.as_deref(),
            args.max_categorical_values,
        ) {
            Ok(rows) => {
                print_inventory(&rows);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn analyze_options(args: AnalyzeArgs) -> AnalyzeOptions {
    AnalyzeOptions {
        output_dir: args
            .output_dir
            .unwrap_or_else(|| default_output_dir(Local::now())),
        csv: args.csv,
        config: args.config,
        max_categorical_values: args.max_categorical_values,
        charts: !args.no_charts,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level_filter(cli.verbosity.tracing_level_filter());
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
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone())
}
