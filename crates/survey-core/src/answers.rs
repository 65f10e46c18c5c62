//! Answer extraction for classified questions.
//!
//! Categorical and multiple-choice extraction are row-aligned: one value per
//! respondent. Free-text unfolding is not, and returns [`UnfoldedAnswers`] so
//! the two cannot be mixed up.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;

use survey_common::column_strings;
use survey_model::{NO, NOT_ANSWERED, NOT_APPLICABLE, OTHER_CHOICE_ID, QuestionGroup, YES};

use crate::error::{AnalysisError, Result};

/// Values a multiple-choice cell may hold.
pub const MULTIPLE_CHOICE_VALUES: [&str; 3] = [YES, NO, NOT_APPLICABLE];

fn label_or_not_answered(value: String) -> String {
    if value.is_empty() {
        NOT_ANSWERED.to_string()
    } else {
        value
    }
}

/// Per-respondent answer labels of a categorical question, in row order.
///
/// Reads the question's single non-"other" column; empty cells become
/// `"Not answered"`.
pub fn categorical_answers(group: &QuestionGroup, df: &DataFrame) -> Result<Vec<String>> {
    let mut candidates = group.choices.iter().filter(|choice| !choice.is_other());
    let (Some(choice), None) = (candidates.next(), candidates.next()) else {
        return Err(AnalysisError::AmbiguousCategoricalQuestion {
            question_id: group.question_id.clone(),
            found: group.choices.iter().filter(|choice| !choice.is_other()).count(),
        });
    };
    Ok(column_strings(df, &choice.column)?
        .into_iter()
        .map(label_or_not_answered)
        .collect())
}

/// Raw values of one multiple-choice column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceAnswers {
    pub choice_id: String,
    pub choice_text: String,
    pub values: Vec<String>,
}

/// Per-choice answer columns of a multiple-choice question, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceAnswers {
    pub question_id: String,
    pub choices: Vec<ChoiceAnswers>,
}

impl MultipleChoiceAnswers {
    pub fn get(&self, choice_id: &str) -> Option<&[String]> {
        self.choices
            .iter()
            .find(|choice| choice.choice_id == choice_id)
            .map(|choice| choice.values.as_slice())
    }

    pub fn choice_ids(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|choice| choice.choice_id.as_str())
    }

    /// Number of respondent rows.
    pub fn respondents(&self) -> usize {
        self.choices
            .first()
            .map(|choice| choice.values.len())
            .unwrap_or(0)
    }

    /// Checks that every cell is one of "Yes", "No" or "N/A".
    pub fn validate(&self) -> Result<()> {
        let observed: BTreeSet<&str> = self
            .choices
            .iter()
            .flat_map(|choice| choice.values.iter().map(String::as_str))
            .collect();
        let unexpected: Vec<&str> = observed
            .iter()
            .copied()
            .filter(|value| !MULTIPLE_CHOICE_VALUES.contains(value))
            .collect();
        if !unexpected.is_empty() {
            return Err(AnalysisError::not_multiple_choice(
                &self.question_id,
                format!("unexpected values {unexpected:?}"),
            ));
        }
        if observed.len() > MULTIPLE_CHOICE_VALUES.len() {
            return Err(AnalysisError::not_multiple_choice(
                &self.question_id,
                format!("{} distinct values", observed.len()),
            ));
        }
        Ok(())
    }
}

/// Extracts the per-choice columns of a multiple-choice question.
///
/// Every choice needs both an id and a text. The "other" column holds free
/// text, so it is rewritten to "Yes" (something written) or "No" (empty).
/// Cell vocabulary is not checked here; see [`aggregate_multiple_choice`].
pub fn multiple_choice_answers(
    group: &QuestionGroup,
    df: &DataFrame,
) -> Result<MultipleChoiceAnswers> {
    let mut choices = Vec::with_capacity(group.len());
    for choice in &group.choices {
        let (Some(choice_id), Some(choice_text)) = (&choice.choice_id, &choice.choice_text) else {
            return Err(AnalysisError::not_multiple_choice(
                &group.question_id,
                format!("column {:?} has no choice id or choice text", choice.column),
            ));
        };
        let mut values = column_strings(df, &choice.column)?;
        if choice_id == OTHER_CHOICE_ID {
            for value in &mut values {
                *value = if value.is_empty() { NO } else { YES }.to_string();
            }
        }
        choices.push(ChoiceAnswers {
            choice_id: choice_id.clone(),
            choice_text: choice_text.clone(),
            values,
        });
    }
    Ok(MultipleChoiceAnswers {
        question_id: group.question_id.clone(),
        choices,
    })
}

/// Extracts and validates a multiple-choice question.
pub fn aggregate_multiple_choice(
    group: &QuestionGroup,
    df: &DataFrame,
) -> Result<MultipleChoiceAnswers> {
    let answers = multiple_choice_answers(group, df)?;
    answers.validate()?;
    Ok(answers)
}

/// Flattened answers of a free-text question.
///
/// Not row-aligned: a respondent contributes one entry per non-empty column,
/// or a single `"Not answered"` when every column is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnfoldedAnswers {
    entries: Vec<String>,
}

impl UnfoldedAnswers {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

/// Unfolds every respondent's answers across all columns of a question.
pub fn unfold_answers(group: &QuestionGroup, df: &DataFrame) -> Result<UnfoldedAnswers> {
    let columns = group
        .choices
        .iter()
        .map(|choice| column_strings(df, &choice.column))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mut entries = Vec::new();
    for row in 0..df.height() {
        let before = entries.len();
        entries.extend(
            columns
                .iter()
                .map(|column| &column[row])
                .filter(|value| !value.is_empty())
                .cloned(),
        );
        if entries.len() == before {
            entries.push(NOT_ANSWERED.to_string());
        }
    }
    Ok(UnfoldedAnswers { entries })
}

#[cfg(test)]
mod tests {
    use survey_common::test_frame;

    use super::*;
    use crate::grouping::group_columns;

    fn pets_frame(dog: Vec<&str>, cat: Vec<&str>, other: Vec<&str>) -> (DataFrame, QuestionGroup) {
        let columns = ["B[1]|Pets[Dog]", "B[2]|Pets[Cat]", "B[other]|Pets[Other]"];
        let df = test_frame(vec![(columns[0], dog), (columns[1], cat), (columns[2], other)])
            .unwrap();
        let group = group_columns(&columns).unwrap().get("B").unwrap().clone();
        (df, group)
    }

    #[test]
    fn categorical_maps_empty_to_not_answered() {
        let df = test_frame(vec![("A|Color", vec!["red", "", "blue"])]).unwrap();
        let group = group_columns(&["A|Color"]).unwrap().get("A").unwrap().clone();

        let answers = categorical_answers(&group, &df).unwrap();
        assert_eq!(answers, vec!["red", "Not answered", "blue"]);
    }

    #[test]
    fn categorical_ignores_other_column() {
        let columns = ["D|Editor", "D[other]|Editor[Other]"];
        let df = test_frame(vec![
            (columns[0], vec!["vim", "Other"]),
            (columns[1], vec!["", "kakoune"]),
        ])
        .unwrap();
        let group = group_columns(&columns).unwrap().get("D").unwrap().clone();

        let answers = categorical_answers(&group, &df).unwrap();
        assert_eq!(answers, vec!["vim", "Other"]);
    }

    #[test]
    fn categorical_needs_exactly_one_primary_choice() {
        let (df, group) = pets_frame(vec!["Yes"], vec!["No"], vec![""]);
        let err = categorical_answers(&group, &df).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::AmbiguousCategoricalQuestion { found: 2, .. }
        ));
        assert!(err.is_question_scoped());

        let only_other = group_columns(&["B[other]|Pets[Other]"])
            .unwrap()
            .get("B")
            .unwrap()
            .clone();
        assert!(matches!(
            categorical_answers(&only_other, &df),
            Err(AnalysisError::AmbiguousCategoricalQuestion { found: 0, .. })
        ));
    }

    #[test]
    fn multiple_choice_rewrites_other_column() {
        let (df, group) = pets_frame(
            vec!["Yes", "No", "N/A"],
            vec!["No", "Yes", "No"],
            vec!["", "ferret", ""],
        );
        let answers = aggregate_multiple_choice(&group, &df).unwrap();

        assert_eq!(answers.choice_ids().collect::<Vec<_>>(), vec!["1", "2", "other"]);
        assert_eq!(answers.get("1").unwrap(), ["Yes", "No", "N/A"]);
        assert_eq!(answers.get("other").unwrap(), ["No", "Yes", "No"]);
        assert_eq!(answers.respondents(), 3);
    }

    #[test]
    fn multiple_choice_rejects_unknown_values() {
        let (df, group) = pets_frame(vec!["Yes", "Maybe"], vec!["No", "No"], vec!["", ""]);
        let err = aggregate_multiple_choice(&group, &df).unwrap_err();
        assert!(matches!(err, AnalysisError::NotMultipleChoiceQuestion { .. }));
        assert!(err.to_string().contains("Maybe"));
    }

    #[test]
    fn multiple_choice_rejects_empty_cells() {
        let (df, group) = pets_frame(vec!["Yes", ""], vec!["No", "No"], vec!["", ""]);
        assert!(aggregate_multiple_choice(&group, &df).is_err());
    }

    #[test]
    fn multiple_choice_requires_choice_metadata() {
        let df = test_frame(vec![("A|Color", vec!["Yes"])]).unwrap();
        let group = group_columns(&["A|Color"]).unwrap().get("A").unwrap().clone();
        assert!(matches!(
            multiple_choice_answers(&group, &df),
            Err(AnalysisError::NotMultipleChoiceQuestion { .. })
        ));
    }

    #[test]
    fn unfold_is_one_to_many() {
        let columns = ["F[1]|Comments[First]", "F[2]|Comments[Second]"];
        let df = test_frame(vec![
            (columns[0], vec!["", "great", "fine"]),
            (columns[1], vec!["", "thanks", ""]),
        ])
        .unwrap();
        let group = group_columns(&columns).unwrap().get("F").unwrap().clone();

        let unfolded = unfold_answers(&group, &df).unwrap();
        assert_eq!(
            unfolded.entries(),
            ["Not answered", "great", "thanks", "fine"]
        );
        assert_eq!(unfolded.len(), 4);
    }

    #[test]
    fn unfold_without_columns_is_not_answered() {
        let df = test_frame(vec![("A|Color", vec!["red"])]).unwrap();
        let group = QuestionGroup::new("A");
        let unfolded = unfold_answers(&group, &df).unwrap();
        assert_eq!(unfolded.entries(), ["Not answered"]);
    }
}
