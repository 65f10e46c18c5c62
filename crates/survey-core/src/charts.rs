//! Chart records built from aggregated answers.

use survey_model::{
    AnswerCount, CategoricalChart, ChoiceCount, MultipleChoiceChart, NO, NOT_ANSWERED,
    NOT_APPLICABLE, OTHER_CHOICE_ID, OTHER_LABEL, QuestionGroup, YES,
};

use crate::answers::MultipleChoiceAnswers;
use crate::error::{AnalysisError, Result};

/// Labels kept out of the count ordering and appended last, in this order.
pub const TRAILING_LABELS: [&str; 3] = [OTHER_LABEL, NOT_ANSWERED, NOT_APPLICABLE];

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Distinct labels with their counts, in order of first appearance.
fn tally(answers: &[String]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for answer in answers {
        match counts.iter_mut().find(|(label, _)| *label == answer.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((answer.as_str(), 1)),
        }
    }
    counts
}

/// Default display order: by count descending, then the trailing labels.
pub fn default_answer_order(answers: &[String]) -> Vec<String> {
    let mut counts = tally(answers);
    let trailing: Vec<&str> = TRAILING_LABELS
        .iter()
        .copied()
        .filter(|label| counts.iter().any(|(seen, _)| seen == label))
        .collect();
    counts.retain(|(label, _)| !TRAILING_LABELS.contains(label));
    // Stable sort keeps first appearance for ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(label, _)| label)
        .chain(trailing)
        .map(str::to_string)
        .collect()
}

/// Builds the bar records of a categorical question.
///
/// With a configured `order`, only the listed labels are shown and each of
/// them must occur in `answers`.
pub fn categorical_chart(
    group: &QuestionGroup,
    answers: &[String],
    order: Option<&[String]>,
) -> Result<CategoricalChart> {
    let counts = tally(answers);
    let labels = match order {
        Some(order) => {
            if let Some(label) = order
                .iter()
                .find(|label| !counts.iter().any(|(seen, _)| *seen == label.as_str()))
            {
                return Err(AnalysisError::UnknownAnswerLabel {
                    question_id: group.question_id.clone(),
                    label: label.clone(),
                });
            }
            order.to_vec()
        }
        None => default_answer_order(answers),
    };

    let total = answers.len();
    let answers = labels
        .into_iter()
        .map(|label| {
            let count = counts
                .iter()
                .find(|(seen, _)| *seen == label.as_str())
                .map(|(_, count)| *count)
                .unwrap_or(0);
            AnswerCount {
                label,
                count,
                percentage: share(count, total),
            }
        })
        .collect();

    Ok(CategoricalChart {
        question_id: group.question_id.clone(),
        question_text: group.question_text().to_string(),
        total,
        answers,
    })
}

/// Builds the stacked bar records of a multiple-choice question.
pub fn multiple_choice_chart(
    group: &QuestionGroup,
    answers: &MultipleChoiceAnswers,
) -> MultipleChoiceChart {
    let respondents = answers.respondents();
    let count = |values: &[String], wanted: &str| values.iter().filter(|v| *v == wanted).count();

    let mut choices: Vec<ChoiceCount> = answers
        .choices
        .iter()
        .map(|choice| {
            let yes = count(&choice.values, YES);
            ChoiceCount {
                choice_id: choice.choice_id.clone(),
                choice_text: choice.choice_text.clone(),
                yes,
                no: count(&choice.values, NO),
                not_applicable: count(&choice.values, NOT_APPLICABLE),
                yes_percentage: share(yes, respondents),
            }
        })
        .collect();
    choices.sort_by(|a, b| {
        (a.choice_id == OTHER_CHOICE_ID)
            .cmp(&(b.choice_id == OTHER_CHOICE_ID))
            .then(b.yes.cmp(&a.yes))
    });

    MultipleChoiceChart {
        question_id: group.question_id.clone(),
        question_text: group.question_text().to_string(),
        respondents,
        choices,
    }
}

#[cfg(test)]
mod tests {
    use survey_model::Choice;

    use super::*;
    use crate::answers::ChoiceAnswers;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn group(question_id: &str) -> QuestionGroup {
        let mut group = QuestionGroup::new(question_id);
        group.choices.push(Choice {
            column: format!("{question_id}|How old are you?"),
            question_id: question_id.to_string(),
            question_text: "How old are you?".to_string(),
            choice_id: None,
            choice_text: None,
        });
        group
    }

    #[test]
    fn default_order_pins_special_labels_last() {
        let answers = strings(&[
            "N/A",
            "15-24",
            "Not answered",
            "25-34",
            "Other",
            "25-34",
            "5-14",
            "25-34",
            "15-24",
        ]);
        assert_eq!(
            default_answer_order(&answers),
            vec!["25-34", "15-24", "5-14", "Other", "Not answered", "N/A"]
        );
    }

    #[test]
    fn ties_keep_first_appearance() {
        let answers = strings(&["b", "a", "c", "a", "b"]);
        assert_eq!(default_answer_order(&answers), vec!["b", "a", "c"]);
    }

    #[test]
    fn percentages_are_shares_of_all_respondents() {
        let answers = strings(&["red", "Not answered", "red", "blue"]);
        let chart = categorical_chart(&group("A"), &answers, None).unwrap();

        assert_eq!(chart.total, 4);
        assert_eq!(chart.question_text, "How old are you?");
        assert_eq!(
            chart.labels().collect::<Vec<_>>(),
            vec!["red", "blue", "Not answered"]
        );
        assert_eq!(chart.answers[0].count, 2);
        assert!((chart.answers[0].percentage - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn configured_order_is_used_verbatim() {
        let answers = strings(&["old", "young", "young", "Not answered"]);
        let order = strings(&["young", "old"]);
        let chart = categorical_chart(&group("age"), &answers, Some(&order)).unwrap();

        assert_eq!(chart.labels().collect::<Vec<_>>(), vec!["young", "old"]);
        assert_eq!(chart.count_of("old"), Some(1));
        assert_eq!(chart.count_of("Not answered"), None);
    }

    #[test]
    fn configured_order_must_name_observed_labels() {
        let answers = strings(&["old", "young"]);
        let order = strings(&["young", "ancient"]);
        let err = categorical_chart(&group("age"), &answers, Some(&order)).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnknownAnswerLabel { ref label, .. } if label == "ancient"
        ));
    }

    #[test]
    fn multiple_choice_orders_by_yes_with_other_last() {
        let choice = |id: &str, values: &[&str]| ChoiceAnswers {
            choice_id: id.to_string(),
            choice_text: id.to_uppercase(),
            values: strings(values),
        };
        let answers = MultipleChoiceAnswers {
            question_id: "B".to_string(),
            choices: vec![
                choice("cat", &["No", "Yes", "N/A", "No"]),
                choice("other", &["Yes", "Yes", "Yes", "Yes"]),
                choice("dog", &["Yes", "Yes", "No", "Yes"]),
                choice("fish", &["Yes", "No", "No", "No"]),
            ],
        };

        let chart = multiple_choice_chart(&group("B"), &answers);
        let order: Vec<&str> = chart.choices.iter().map(|c| c.choice_id.as_str()).collect();
        assert_eq!(order, vec!["dog", "cat", "fish", "other"]);
        assert_eq!(chart.respondents, 4);

        let cat = &chart.choices[1];
        assert_eq!((cat.yes, cat.no, cat.not_applicable), (1, 2, 1));
        assert!((chart.choices[0].yes_percentage - 0.75).abs() < f64::EPSILON);
    }
}
