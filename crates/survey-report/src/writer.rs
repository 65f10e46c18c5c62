//! Output folder layout and report writing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use survey_model::{FailureKind, QuestionFailure, QuestionType, SurveyReport};

use crate::markdown::inventory_markdown;
use crate::plots::{PlotError, categorical_chart_svg, multiple_choice_chart_svg, write_svg};

/// Folder holding categorical charts.
pub const CATEGORICAL_DIR: &str = "categorical";
/// Folder holding multiple-choice charts.
pub const MULTIPLE_CHOICE_DIR: &str = "multiple_choices";
pub const INVENTORY_FILE: &str = "questions.md";
pub const REPORT_FILE: &str = "report.json";

/// What to write besides the Markdown inventory and the JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Render one SVG chart per categorical and multiple-choice question.
    pub charts: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { charts: true }
    }
}

/// Paths written by [`write_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReport {
    pub charts: Vec<PathBuf>,
    pub inventory: PathBuf,
    pub report: PathBuf,
    /// Charts that could not be rendered; also recorded as report failures.
    pub render_failures: usize,
}

fn file_stem(question_id: &str) -> String {
    question_id.replace(['/', '\\'], "_")
}

/// Path of the chart for a question inside an output folder.
pub fn chart_path(out_dir: &Path, question_type: QuestionType, question_id: &str) -> PathBuf {
    let folder = match question_type {
        QuestionType::MultipleChoice => MULTIPLE_CHOICE_DIR,
        _ => CATEGORICAL_DIR,
    };
    out_dir
        .join(folder)
        .join(format!("{}.svg", file_stem(question_id)))
}

fn render_failure(question_id: &str, question_type: QuestionType, error: &PlotError) -> QuestionFailure {
    warn!(
        question_id = %question_id,
        %question_type,
        error = %error,
        "failed to render chart"
    );
    QuestionFailure {
        question_id: question_id.to_string(),
        question_type,
        kind: FailureKind::Render,
        message: error.to_string(),
    }
}

/// Renders every chart of the report into `out_dir`.
///
/// Rendering errors only skip the affected chart; they are appended to the
/// report's failures.
pub fn write_charts(report: &mut SurveyReport, out_dir: &Path) -> Vec<PathBuf> {
    let mut written = Vec::new();
    let mut failures = Vec::new();

    for chart in &report.categorical {
        let path = chart_path(out_dir, QuestionType::Categorical, &chart.question_id);
        match categorical_chart_svg(chart).and_then(|svg| write_svg(&svg, &path)) {
            Ok(()) => {
                debug!(question_id = %chart.question_id, path = %path.display(), "wrote chart");
                written.push(path);
            }
            Err(e) => failures.push(render_failure(
                &chart.question_id,
                QuestionType::Categorical,
                &e,
            )),
        }
    }

    for chart in &report.multiple_choice {
        let path = chart_path(out_dir, QuestionType::MultipleChoice, &chart.question_id);
        match multiple_choice_chart_svg(chart).and_then(|svg| write_svg(&svg, &path)) {
            Ok(()) => {
                debug!(question_id = %chart.question_id, path = %path.display(), "wrote chart");
                written.push(path);
            }
            Err(e) => failures.push(render_failure(
                &chart.question_id,
                QuestionType::MultipleChoice,
                &e,
            )),
        }
    }

    report.failures.extend(failures);
    written
}

/// Writes charts, `questions.md` and `report.json` into `out_dir`.
pub fn write_report(
    report: &mut SurveyReport,
    out_dir: &Path,
    options: ReportOptions,
) -> Result<WrittenReport> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let failures_before = report.failures.len();
    let charts = if options.charts {
        write_charts(report, out_dir)
    } else {
        Vec::new()
    };
    let render_failures = report.failures.len() - failures_before;

    let inventory = out_dir.join(INVENTORY_FILE);
    fs::write(&inventory, inventory_markdown(&report.inventory))
        .with_context(|| format!("write {}", inventory.display()))?;

    let report_path = out_dir.join(REPORT_FILE);
    let json = serde_json::to_string_pretty(report).context("serialize survey report")?;
    fs::write(&report_path, json).with_context(|| format!("write {}", report_path.display()))?;

    info!(
        out_dir = %out_dir.display(),
        charts = charts.len(),
        render_failures,
        "report written"
    );
    Ok(WrittenReport {
        charts,
        inventory,
        report: report_path,
        render_failures,
    })
}
