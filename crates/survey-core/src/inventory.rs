//! Question inventory listing.

use std::collections::HashSet;

use polars::prelude::DataFrame;

use survey_common::column_strings;
use survey_model::{ClassifiedQuestions, InventoryRow, QuestionGroup};

use crate::error::Result;

/// Distinct non-empty values across all columns of a question.
pub fn unique_answer_count(group: &QuestionGroup, df: &DataFrame) -> Result<usize> {
    let mut seen = HashSet::new();
    for choice in &group.choices {
        seen.extend(
            column_strings(df, &choice.column)?
                .into_iter()
                .filter(|value| !value.is_empty()),
        );
    }
    Ok(seen.len())
}

/// One row per classified question, bucket by bucket.
pub fn question_inventory(
    classified: &ClassifiedQuestions,
    df: &DataFrame,
) -> Result<Vec<InventoryRow>> {
    classified
        .iter()
        .map(|(question_type, group)| {
            Ok(InventoryRow {
                question_type,
                question_id: group.question_id.clone(),
                question_text: group.question_text().to_string(),
                unique_answers: unique_answer_count(group, df)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use survey_common::test_frame;
    use survey_model::{ClassificationOptions, QuestionType};

    use super::*;
    use crate::classify::classify_questions;
    use crate::grouping::group_columns;

    #[test]
    fn rows_follow_bucket_order() {
        let columns = ["A|Color", "B[1]|Pets[Dog]", "B[2]|Pets[Cat]", "R[1]|Order[Rank 1]"];
        let df = test_frame(vec![
            (columns[0], vec!["red", "", "red"]),
            (columns[1], vec!["Yes", "No", "Yes"]),
            (columns[2], vec!["No", "N/A", ""]),
            (columns[3], vec!["x", "y", "z"]),
        ])
        .unwrap();
        let grouped = group_columns(&columns).unwrap();
        let classified =
            classify_questions(&grouped, &df, &ClassificationOptions::default()).unwrap();

        let rows = question_inventory(&classified, &df).unwrap();
        let summary: Vec<(QuestionType, &str, usize)> = rows
            .iter()
            .map(|row| (row.question_type, row.question_id.as_str(), row.unique_answers))
            .collect();
        assert_eq!(
            summary,
            vec![
                (QuestionType::Ranking, "R", 3),
                (QuestionType::Categorical, "A", 1),
                (QuestionType::MultipleChoice, "B", 3),
            ]
        );
        assert_eq!(rows[1].question_text, "Color");
    }
}
