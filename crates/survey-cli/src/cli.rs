//! CLI argument definitions for survey analysis.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-analysis",
    version,
    about = "Classify survey questions and chart their answers",
    long_about = "Classify the questions of a survey results export and chart their answers.\n\n\
                  Columns are grouped into questions by their header, classified as ranking,\n\
                  categorical, multiple-choice or free-text, and written out as SVG charts,\n\
                  a Markdown question inventory and a JSON report."
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

    /// Log output format (pretty for human, json for machine parsing).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify questions, render charts and write the report.
    Analyze(AnalyzeArgs),

    /// List every question with its type and number of distinct answers.
    Questions(QuestionsArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Survey results export (CSV with one header row).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// YAML file with answer orders, exclusions and thresholds.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output directory (default: plots/<timestamp>).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Largest number of distinct answers of a categorical question.
    #[arg(long = "max-categorical-values", value_name = "N")]
    pub max_categorical_values: Option<usize>,

    /// Write the inventory and JSON report without rendering charts.
    #[arg(long = "no-charts")]
    pub no_charts: bool,
}

#[derive(Parser)]
pub struct QuestionsArgs {
    /// Survey results export (CSV with one header row).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// YAML file with exclusions and thresholds.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Largest number of distinct answers of a categorical question.
    #[arg(long = "max-categorical-values", value_name = "N")]
    pub max_categorical_values: Option<usize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "survey-analysis",
            "-v",
            "analyze",
            "results.csv",
            "--config",
            "survey.yaml",
            "--max-categorical-values",
            "12",
            "--no-charts",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.csv, PathBuf::from("results.csv"));
        assert_eq!(args.config, Some(PathBuf::from("survey.yaml")));
        assert_eq!(args.max_categorical_values, Some(12));
        assert!(args.no_charts);
        assert!(args.output_dir.is_none());
        assert!(cli.verbosity.is_present());
    }

    #[test]
    fn log_flags_are_global() {
        let cli = Cli::try_parse_from([
            "survey-analysis",
            "questions",
            "results.csv",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
    }
}
