use std::path::PathBuf;

use survey_model::SurveyReport;
use survey_report::WrittenReport;

/// Inputs of the `analyze` command.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub csv: PathBuf,
    pub config: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Overrides the configured categorical cap.
    pub max_categorical_values: Option<usize>,
    pub charts: bool,
}

#[derive(Debug)]
pub struct AnalyzeResult {
    pub csv: PathBuf,
    pub output_dir: PathBuf,
    pub report: SurveyReport,
    pub written: WrittenReport,
}

impl AnalyzeResult {
    pub fn has_failures(&self) -> bool {
        self.report.has_failures()
    }
}
