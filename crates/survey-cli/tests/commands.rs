//! Integration tests for the analyze and questions commands.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};
use survey_cli::commands::{default_output_dir, load_config, run_analyze, run_questions};
use survey_cli::types::AnalyzeOptions;
use survey_model::{FailureKind, QuestionType};
use tempfile::TempDir;

const SURVEY_CSV: &str = "\
\"id|Response ID\",\"A|Favourite colour\",\"B[1]|Pets[Dog]\",\"B[2]|Pets[Cat]\",\"C|Comments\"
1,red,Yes,No,great
2,blue,No,Yes,
3,red,N/A,Yes,more plots please
";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn options(dir: &Path, csv: PathBuf, config: Option<PathBuf>) -> AnalyzeOptions {
    AnalyzeOptions {
        csv,
        config,
        output_dir: dir.join("out"),
        max_categorical_values: Some(2),
        charts: true,
    }
}

#[test]
fn analyze_writes_charts_and_report() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_file(dir.path(), "results.csv", SURVEY_CSV);

    let result = run_analyze(&options(dir.path(), csv, None)).expect("analyze");

    assert_eq!(result.report.respondents, 3);
    assert!(!result.has_failures());
    assert_eq!(result.report.count_of(QuestionType::Categorical), 1);
    assert_eq!(result.report.count_of(QuestionType::MultipleChoice), 1);
    assert_eq!(result.report.count_of(QuestionType::Other), 1);

    let out = dir.path().join("out");
    assert!(out.join("categorical/A.svg").is_file());
    assert!(out.join("multiple_choices/B.svg").is_file());
    assert!(out.join("questions.md").is_file());
    assert!(out.join("report.json").is_file());
    assert_eq!(result.written.charts.len(), 2);

    let colours = &result.report.categorical[0];
    assert_eq!(colours.count_of("red"), Some(2));
    assert_eq!(colours.count_of("blue"), Some(1));
}

#[test]
fn analyze_records_unknown_order_label() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_file(dir.path(), "results.csv", SURVEY_CSV);
    let config = write_file(
        dir.path(),
        "survey.yaml",
        "questions:\n  A:\n    order: [red, green]\n",
    );

    let result = run_analyze(&options(dir.path(), csv, Some(config))).expect("analyze");

    assert!(result.has_failures());
    let failure = &result.report.failures[0];
    assert_eq!(failure.question_id, "A");
    assert_eq!(failure.kind, FailureKind::UnknownAnswerLabel);
    assert!(!dir.path().join("out/categorical/A.svg").exists());
    assert!(dir.path().join("out/multiple_choices/B.svg").is_file());
}

#[test]
fn analyze_without_charts() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_file(dir.path(), "results.csv", SURVEY_CSV);
    let mut options = options(dir.path(), csv, None);
    options.charts = false;

    let result = run_analyze(&options).expect("analyze");

    assert!(result.written.charts.is_empty());
    assert!(dir.path().join("out/report.json").is_file());
    assert!(!dir.path().join("out/categorical").exists());
}

#[test]
fn analyze_fails_on_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("missing.csv");

    let error = run_analyze(&options(dir.path(), missing, None)).unwrap_err();

    assert!(format!("{error:#}").contains("missing.csv"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn questions_lists_inventory() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_file(dir.path(), "results.csv", SURVEY_CSV);

    let rows = run_questions(&csv, None, Some(2)).expect("questions");

    let ids: Vec<&str> = rows.iter().map(|row| row.question_id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    let comments = rows.iter().find(|row| row.question_id == "C").unwrap();
    assert_eq!(comments.question_type, QuestionType::Other);
    assert_eq!(comments.unique_answers, 2);
}

#[test]
fn config_override_replaces_threshold() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        dir.path(),
        "survey.yaml",
        "classification:\n  max_categorical_values: 20\n",
    );

    let from_file = load_config(Some(&path), None).expect("config");
    assert_eq!(from_file.classification.max_categorical_values, 20);

    let overridden = load_config(Some(&path), Some(4)).expect("config");
    assert_eq!(overridden.classification.max_categorical_values, 4);
}

#[test]
fn invalid_config_is_reported_with_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(dir.path(), "survey.yaml", "unknown_key: 1\n");

    let error = load_config(Some(&path), None).unwrap_err();

    assert!(format!("{error:#}").contains("survey.yaml"));
}

#[test]
fn default_output_dir_is_timestamped() {
    let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
    assert_eq!(
        default_output_dir(now),
        Path::new("plots").join("2024-03-09T14-05-07")
    );
}
