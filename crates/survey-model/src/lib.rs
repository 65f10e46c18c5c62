pub mod chart;
pub mod choice;
pub mod config;
pub mod question;
pub mod report;

pub use chart::{
    AnswerCount, CategoricalChart, ChoiceCount, FreeTextAnswers, MultipleChoiceChart, NO,
    NOT_ANSWERED, NOT_APPLICABLE, OTHER_LABEL, YES,
};
pub use choice::{Choice, GroupedQuestions, OTHER_CHOICE_ID, QuestionGroup};
pub use config::{
    ClassificationOptions, DEFAULT_MAX_CATEGORICAL_VALUES, QuestionConfig, SurveyConfig,
};
pub use question::{ClassifiedQuestions, QuestionType};
pub use report::{FailureKind, InventoryRow, QuestionFailure, SurveyReport};

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(column: &str, question_id: &str, choice_id: Option<&str>) -> Choice {
        Choice {
            column: column.to_string(),
            question_id: question_id.to_string(),
            question_text: "Text".to_string(),
            choice_id: choice_id.map(str::to_string),
            choice_text: None,
        }
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let grouped: GroupedQuestions = vec![
            choice("b1", "B", Some("1")),
            choice("a", "A", None),
            choice("b2", "B", Some("2")),
        ]
        .into_iter()
        .collect();

        let ids: Vec<&str> = grouped.question_ids().collect();
        assert_eq!(ids, vec!["B", "A"]);
        let columns: Vec<&str> = grouped
            .get("B")
            .unwrap()
            .choices
            .iter()
            .map(|c| c.column.as_str())
            .collect();
        assert_eq!(columns, vec!["b1", "b2"]);
        assert_eq!(grouped.choice_count(), 3);
    }

    #[test]
    fn other_choice_detection() {
        let mut group = QuestionGroup::new("Q");
        group.choices.push(choice("q", "Q", None));
        assert!(!group.has_other());
        group.choices.push(choice("q_other", "Q", Some(OTHER_CHOICE_ID)));
        assert!(group.has_other());
    }

    #[test]
    fn classified_lookup_by_id() {
        let mut classified = ClassifiedQuestions::default();
        classified.categorical.push(QuestionGroup::new("age"));
        classified.other.push(QuestionGroup::new("comments"));

        assert_eq!(classified.len(), 2);
        assert_eq!(classified.type_of("age"), Some(QuestionType::Categorical));
        assert_eq!(classified.type_of("comments"), Some(QuestionType::Other));
        assert_eq!(classified.type_of("missing"), None);
    }

    #[test]
    fn config_defaults_use_named_threshold() {
        let config = SurveyConfig::default();
        assert_eq!(
            config.classification.max_categorical_values,
            DEFAULT_MAX_CATEGORICAL_VALUES
        );
        assert!(config.answer_order("age").is_none());
    }
}
