//! End-to-end analysis of one survey table.
//!
//! Steps run in order: group headers, apply exclusions, classify, then
//! aggregate every question of the categorical, multiple-choice and other
//! buckets. Parse errors and classification invariant violations abort the
//! run; everything question-scoped is recorded as a [`QuestionFailure`] and
//! the remaining questions still complete.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use survey_model::{
    ClassifiedQuestions, FreeTextAnswers, QuestionFailure, QuestionGroup, QuestionType,
    SurveyConfig, SurveyReport,
};

use crate::answers::{aggregate_multiple_choice, categorical_answers, unfold_answers};
use crate::charts::{categorical_chart, multiple_choice_chart};
use crate::classify::classify_questions;
use crate::error::Result;
use crate::grouping::{apply_exclusions, group_columns};
use crate::inventory::question_inventory;

/// Result of [`analyze_table`].
#[derive(Debug, Clone)]
pub struct Analysis {
    pub classified: ClassifiedQuestions,
    pub report: SurveyReport,
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Groups, filters and classifies the questions of a table.
pub fn classify_table(df: &DataFrame, config: &SurveyConfig) -> Result<ClassifiedQuestions> {
    let grouped = group_columns(&column_names(df))?;
    let grouped = apply_exclusions(grouped, config);
    classify_questions(&grouped, df, &config.classification)
}

/// Runs the full analysis and collects per-question failures.
pub fn analyze_table(df: &DataFrame, config: &SurveyConfig) -> Result<Analysis> {
    let span = info_span!("analyze", rows = df.height(), columns = df.width());
    let _guard = span.enter();
    let start = Instant::now();

    let classified = info_span!("classify").in_scope(|| classify_table(df, config))?;
    let mut report = SurveyReport {
        respondents: df.height(),
        inventory: question_inventory(&classified, df)?,
        ..SurveyReport::default()
    };

    for group in &classified.categorical {
        let chart = categorical_answers(group, df).and_then(|answers| {
            categorical_chart(group, &answers, config.answer_order(&group.question_id))
        });
        if let Some(chart) = isolate(group, QuestionType::Categorical, chart, &mut report)? {
            report.categorical.push(chart);
        }
    }

    for group in &classified.multiple_choice {
        let chart = aggregate_multiple_choice(group, df)
            .map(|answers| multiple_choice_chart(group, &answers));
        if let Some(chart) = isolate(group, QuestionType::MultipleChoice, chart, &mut report)? {
            report.multiple_choice.push(chart);
        }
    }

    for group in &classified.other {
        let unfolded = unfold_answers(group, df)?;
        report.free_text.push(FreeTextAnswers {
            question_id: group.question_id.clone(),
            question_text: group.question_text().to_string(),
            entries: unfolded.into_entries(),
        });
    }

    info!(
        questions = classified.len(),
        categorical = report.categorical.len(),
        multiple_choice = report.multiple_choice.len(),
        free_text = report.free_text.len(),
        failures = report.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(Analysis { classified, report })
}

/// Records a question-scoped error as a failure; other errors propagate.
fn isolate<T>(
    group: &QuestionGroup,
    question_type: QuestionType,
    result: Result<T>,
    report: &mut SurveyReport,
) -> Result<Option<T>> {
    match result {
        Ok(value) => {
            debug!(question_id = %group.question_id, %question_type, "aggregated question");
            Ok(Some(value))
        }
        Err(error) => {
            let Some(kind) = error.failure_kind() else {
                return Err(error);
            };
            warn!(
                question_id = %group.question_id,
                %question_type,
                error = %error,
                "skipping question"
            );
            report.failures.push(QuestionFailure {
                question_id: group.question_id.clone(),
                question_type,
                kind,
                message: error.to_string(),
            });
            Ok(None)
        }
    }
}
