use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{info, info_span};

use survey_core::{analyze_table, classify_table, question_inventory};
use survey_ingest::{load_survey_config, read_survey_csv};
use survey_model::{InventoryRow, SurveyConfig};
use survey_report::{ReportOptions, write_report};

use crate::types::{AnalyzeOptions, AnalyzeResult};

/// Folder that holds one timestamped subfolder per run.
pub const PLOTS_DIR: &str = "plots";

/// Default output folder for a run started at `now`.
pub fn default_output_dir(now: DateTime<Local>) -> PathBuf {
    Path::new(PLOTS_DIR).join(now.format("%Y-%m-%dT%H-%M-%S").to_string())
}

/// Loads the optional config file and applies command line overrides.
pub fn load_config(path: Option<&Path>, max_categorical_values: Option<usize>) -> Result<SurveyConfig> {
    let mut config = match path {
        Some(path) => load_survey_config(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => SurveyConfig::default(),
    };
    if let Some(max) = max_categorical_values {
        config.classification = config.classification.with_max_categorical_values(max);
    }
    Ok(config)
}

pub fn run_analyze(options: &AnalyzeOptions) -> Result<AnalyzeResult> {
    let span = info_span!("analyze_survey", csv = %options.csv.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = load_config(options.config.as_deref(), options.max_categorical_values)?;
    let df = read_survey_csv(&options.csv)
        .with_context(|| format!("read {}", options.csv.display()))?;
    let analysis = analyze_table(&df, &config)
        .with_context(|| format!("analyze {}", options.csv.display()))?;

    let mut report = analysis.report;
    let written = write_report(
        &mut report,
        &options.output_dir,
        ReportOptions {
            charts: options.charts,
        },
    )?;

    info!(
        respondents = report.respondents,
        questions = report.inventory.len(),
        charts = written.charts.len(),
        failures = report.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "survey analysis complete"
    );
    Ok(AnalyzeResult {
        csv: options.csv.clone(),
        output_dir: options.output_dir.clone(),
        report,
        written,
    })
}

pub fn run_questions(
    csv: &Path,
    config: Option<&Path>,
    max_categorical_values: Option<usize>,
) -> Result<Vec<InventoryRow>> {
    let config = load_config(config, max_categorical_values)?;
    let df = read_survey_csv(csv).with_context(|| format!("read {}", csv.display()))?;
    let classified =
        classify_table(&df, &config).with_context(|| format!("classify {}", csv.display()))?;
    question_inventory(&classified, &df).context("build question inventory")
}
