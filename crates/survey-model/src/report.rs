use serde::{Deserialize, Serialize};

use crate::chart::{CategoricalChart, FreeTextAnswers, MultipleChoiceChart};
use crate::question::QuestionType;

/// Why a single question could not be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    AmbiguousCategoricalQuestion,
    NotMultipleChoiceQuestion,
    UnknownAnswerLabel,
    Render,
}

/// A question skipped during a run. The rest of the run is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFailure {
    pub question_id: String,
    pub question_type: QuestionType,
    pub kind: FailureKind,
    pub message: String,
}

/// One line of the question inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub question_type: QuestionType,
    pub question_id: String,
    pub question_text: String,
    /// Distinct non-empty values across all of the question's columns.
    pub unique_answers: usize,
}

/// Everything produced by one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub respondents: usize,
    pub inventory: Vec<InventoryRow>,
    pub categorical: Vec<CategoricalChart>,
    pub multiple_choice: Vec<MultipleChoiceChart>,
    pub free_text: Vec<FreeTextAnswers>,
    pub failures: Vec<QuestionFailure>,
}

impl SurveyReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of inventoried questions of the given type.
    pub fn count_of(&self, question_type: QuestionType) -> usize {
        self.inventory
            .iter()
            .filter(|row| row.question_type == question_type)
            .count()
    }
}
