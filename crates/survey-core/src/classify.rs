//! Question type classification.
//!
//! Every grouped question lands in exactly one bucket. Rules are evaluated in
//! precedence order and the first match wins:
//!
//! 1. **Ranking**: every choice is labelled `"Rank " + choice_id`.
//! 2. **Multiple choice**: more than one choice and none is `other`, or more
//!    than two choices.
//! 3. **Categorical**: one choice, or two choices where one is `other`, and the
//!    first column holds at most `max_categorical_values` distinct values.
//! 4. **Other**: everything else, typically free text.
//!
//! The cardinality cap is a property of the export vintage, not a universal
//! rule, so it comes from [`ClassificationOptions`].

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::debug;

use survey_common::distinct_count;
use survey_model::{
    ClassificationOptions, ClassifiedQuestions, GroupedQuestions, QuestionGroup, QuestionType,
};

use crate::error::{AnalysisError, Result};

/// Prefix of the choice text in a rank-per-option layout.
pub const RANK_TEXT_PREFIX: &str = "Rank ";

/// Number of choices of a categorical question that has an "other" column.
const CATEGORICAL_WITH_OTHER_CHOICES: usize = 2;

/// Classifies every grouped question, then verifies the result is a partition.
pub fn classify_questions(
    grouped: &GroupedQuestions,
    df: &DataFrame,
    options: &ClassificationOptions,
) -> Result<ClassifiedQuestions> {
    let mut classified = ClassifiedQuestions::default();
    for group in grouped {
        let kind = classify_question(group, df, options)?;
        classified.bucket_mut(kind).push(group.clone());
    }
    check_partition(grouped, &classified)?;
    debug!(
        ranking = classified.ranking.len(),
        categorical = classified.categorical.len(),
        multiple_choice = classified.multiple_choice.len(),
        other = classified.other.len(),
        "classified questions"
    );
    Ok(classified)
}

/// Bucket of a single question.
pub fn classify_question(
    group: &QuestionGroup,
    df: &DataFrame,
    options: &ClassificationOptions,
) -> Result<QuestionType> {
    let kind = if is_ranking(group) {
        QuestionType::Ranking
    } else if is_multiple_choice(group) {
        QuestionType::MultipleChoice
    } else if has_categorical_shape(group) {
        // Shape guarantees at least one choice.
        let column = group.primary_column().unwrap_or_default();
        let distinct = distinct_count(df, column)?;
        debug!(
            question_id = %group.question_id,
            distinct,
            cap = options.max_categorical_values,
            "checked answer cardinality"
        );
        if distinct <= options.max_categorical_values {
            QuestionType::Categorical
        } else {
            QuestionType::Other
        }
    } else {
        QuestionType::Other
    };
    debug!(
        question_id = %group.question_id,
        choices = group.len(),
        question_type = %kind,
        "classified question"
    );
    Ok(kind)
}

fn is_ranking(group: &QuestionGroup) -> bool {
    !group.is_empty()
        && group.choices.iter().all(|choice| {
            match (choice.choice_id.as_deref(), choice.choice_text.as_deref()) {
                (Some(id), Some(text)) => text
                    .strip_prefix(RANK_TEXT_PREFIX)
                    .is_some_and(|rank| rank == id),
                _ => false,
            }
        })
}

fn is_multiple_choice(group: &QuestionGroup) -> bool {
    (group.len() > 1 && !group.has_other()) || group.len() > CATEGORICAL_WITH_OTHER_CHOICES
}

fn has_categorical_shape(group: &QuestionGroup) -> bool {
    group.len() == 1 || (group.len() == CATEGORICAL_WITH_OTHER_CHOICES && group.has_other())
}

/// Checks that every grouped question sits in exactly one bucket and that no
/// bucket holds a question that was never grouped.
pub fn check_partition(
    grouped: &GroupedQuestions,
    classified: &ClassifiedQuestions,
) -> Result<()> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, group) in classified.iter() {
        *seen.entry(group.question_id.as_str()).or_default() += 1;
    }

    let violation = |detail: String| AnalysisError::ClassificationInvariant {
        grouped: grouped.len(),
        classified: classified.len(),
        detail,
    };

    if let Some((question_id, count)) = seen.iter().find(|(_, count)| **count > 1) {
        return Err(violation(format!(
            "question {question_id} is in {count} buckets"
        )));
    }
    if let Some(question_id) = grouped.question_ids().find(|id| !seen.contains_key(id)) {
        return Err(violation(format!("question {question_id} is in no bucket")));
    }
    if let Some(question_id) = seen.keys().find(|id| !grouped.contains(id)) {
        return Err(violation(format!("question {question_id} was never grouped")));
    }
    if classified.len() != grouped.len() {
        return Err(violation("bucket sizes do not add up".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use survey_common::test_frame;

    use super::*;
    use crate::grouping::group_columns;

    fn values(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("answer {i}")).collect()
    }

    #[test]
    fn single_column_respects_cardinality_cap() {
        let mut nine = values(9);
        nine.push(nine[0].clone());
        let ten = values(10);
        let nine: Vec<&str> = nine.iter().map(String::as_str).collect();
        let ten: Vec<&str> = ten.iter().map(String::as_str).collect();
        let df = test_frame(vec![("A|Nine", nine), ("B|Ten", ten)]).unwrap();
        let grouped = group_columns(&["A|Nine", "B|Ten"]).unwrap();

        let classified =
            classify_questions(&grouped, &df, &ClassificationOptions::default()).unwrap();
        assert_eq!(classified.type_of("A"), Some(QuestionType::Categorical));
        assert_eq!(classified.type_of("B"), Some(QuestionType::Other));
    }

    #[test]
    fn cap_is_configurable() {
        let ten = values(10);
        let ten: Vec<&str> = ten.iter().map(String::as_str).collect();
        let df = test_frame(vec![("B|Ten", ten)]).unwrap();
        let grouped = group_columns(&["B|Ten"]).unwrap();
        let options = ClassificationOptions::default().with_max_categorical_values(15);

        let classified = classify_questions(&grouped, &df, &options).unwrap();
        assert_eq!(classified.type_of("B"), Some(QuestionType::Categorical));
    }

    #[test]
    fn three_choices_are_multiple_choice_regardless_of_values() {
        let many = values(20);
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let columns = ["C[a]|Pick[A]", "C[b]|Pick[B]", "C[c]|Pick[C]"];
        let df = test_frame(columns.iter().map(|c| (*c, many.clone())).collect()).unwrap();
        let grouped = group_columns(&columns).unwrap();

        let classified =
            classify_questions(&grouped, &df, &ClassificationOptions::default()).unwrap();
        assert_eq!(classified.multiple_choice.len(), 1);
    }

    #[test]
    fn two_choices_with_other_are_categorical() {
        let columns = ["D|Editor", "D[other]|Editor[Other]"];
        let df = test_frame(vec![
            ("D|Editor", vec!["vim", "emacs", ""]),
            ("D[other]|Editor[Other]", vec!["", "", "kakoune"]),
        ])
        .unwrap();
        let grouped = group_columns(&columns).unwrap();

        let kind = classify_question(
            grouped.get("D").unwrap(),
            &df,
            &ClassificationOptions::default(),
        )
        .unwrap();
        assert_eq!(kind, QuestionType::Categorical);
    }

    #[test]
    fn two_choices_without_other_are_multiple_choice() {
        let columns = ["E[a]|Both[A]", "E[b]|Both[B]"];
        let df = test_frame(vec![(columns[0], vec!["Yes"]), (columns[1], vec!["No"])]).unwrap();
        let grouped = group_columns(&columns).unwrap();

        let kind = classify_question(
            grouped.get("E").unwrap(),
            &df,
            &ClassificationOptions::default(),
        )
        .unwrap();
        assert_eq!(kind, QuestionType::MultipleChoice);
    }

    #[test]
    fn rank_layout_wins_over_multiple_choice() {
        let columns = ["R[1]|Order these[Rank 1]", "R[2]|Order these[Rank 2]"];
        let df = test_frame(vec![(columns[0], vec!["x"]), (columns[1], vec!["y"])]).unwrap();
        let grouped = group_columns(&columns).unwrap();

        let classified =
            classify_questions(&grouped, &df, &ClassificationOptions::default()).unwrap();
        assert_eq!(classified.type_of("R"), Some(QuestionType::Ranking));
    }

    #[test]
    fn partial_rank_layout_is_not_ranking() {
        let columns = ["R[1]|Order these[Rank 1]", "R[2]|Order these[Second]"];
        let df = test_frame(vec![(columns[0], vec!["x"]), (columns[1], vec!["y"])]).unwrap();
        let grouped = group_columns(&columns).unwrap();

        let classified =
            classify_questions(&grouped, &df, &ClassificationOptions::default()).unwrap();
        assert_eq!(classified.type_of("R"), Some(QuestionType::MultipleChoice));
    }

    #[test]
    fn fully_excluded_question_is_other() {
        let df = test_frame(vec![("A|Color", vec!["red"])]).unwrap();
        let mut grouped = group_columns(&["A|Color"]).unwrap();
        grouped.get_mut("A").unwrap().choices.clear();

        let classified =
            classify_questions(&grouped, &df, &ClassificationOptions::default()).unwrap();
        assert_eq!(classified.type_of("A"), Some(QuestionType::Other));
    }

    #[test]
    fn partition_check_detects_duplicates_and_losses() {
        let grouped = group_columns(&["A|Color", "B|Size"]).unwrap();

        let mut duplicated = ClassifiedQuestions::default();
        duplicated.categorical.push(grouped.get("A").unwrap().clone());
        duplicated.other.push(grouped.get("A").unwrap().clone());
        duplicated.other.push(grouped.get("B").unwrap().clone());
        assert!(matches!(
            check_partition(&grouped, &duplicated),
            Err(AnalysisError::ClassificationInvariant { .. })
        ));

        let mut lost = ClassifiedQuestions::default();
        lost.categorical.push(grouped.get("A").unwrap().clone());
        assert!(matches!(
            check_partition(&grouped, &lost),
            Err(AnalysisError::ClassificationInvariant { .. })
        ));

        let mut complete = ClassifiedQuestions::default();
        complete.categorical.push(grouped.get("A").unwrap().clone());
        complete.other.push(grouped.get("B").unwrap().clone());
        assert!(check_partition(&grouped, &complete).is_ok());
    }
}
