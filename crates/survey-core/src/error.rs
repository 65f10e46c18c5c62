//! Error types for survey analysis.

use polars::prelude::PolarsError;
use thiserror::Error;

use survey_model::FailureKind;

/// What is wrong with a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderDefect {
    #[error("missing '|' between question id and question text")]
    MissingSeparator,
    #[error("empty question id")]
    EmptyQuestionId,
    #[error("choice id is not closed by ']|'")]
    UnclosedChoiceId,
    #[error("empty choice id")]
    EmptyChoiceId,
    #[error("empty question text")]
    EmptyQuestionText,
    #[error("choice text is not closed by ']'")]
    UnclosedChoiceText,
    #[error("empty choice text")]
    EmptyChoiceText,
    #[error("unexpected text after choice text")]
    TrailingText,
}

/// Errors raised while parsing, classifying or aggregating a survey.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed column header. Aborts the run.
    #[error("invalid column name {column:?}: {defect}")]
    Parse { column: String, defect: HeaderDefect },

    /// Classification did not partition the questions. Aborts the run.
    #[error("classification is not a partition ({grouped} grouped, {classified} classified): {detail}")]
    ClassificationInvariant {
        grouped: usize,
        classified: usize,
        detail: String,
    },

    /// A categorical question without exactly one non-"other" choice.
    #[error("question {question_id} needs exactly one non-other choice, found {found}")]
    AmbiguousCategoricalQuestion { question_id: String, found: usize },

    /// A question routed to multiple-choice aggregation that has another shape.
    #[error("question {question_id} is not a multiple choice question: {reason}")]
    NotMultipleChoiceQuestion { question_id: String, reason: String },

    /// A configured answer order names a label nobody answered.
    #[error("question {question_id}: configured answer {label:?} does not occur in the data")]
    UnknownAnswerLabel { question_id: String, label: String },

    #[error("survey table error: {0}")]
    Polars(#[from] PolarsError),
}

impl AnalysisError {
    pub(crate) fn parse(column: &str, defect: HeaderDefect) -> Self {
        Self::Parse {
            column: column.to_string(),
            defect,
        }
    }

    pub(crate) fn not_multiple_choice(question_id: &str, reason: impl Into<String>) -> Self {
        Self::NotMultipleChoiceQuestion {
            question_id: question_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Failure kind for errors that only invalidate one question.
    ///
    /// Returns `None` for errors that must abort the whole run.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::AmbiguousCategoricalQuestion { .. } => {
                Some(FailureKind::AmbiguousCategoricalQuestion)
            }
            Self::NotMultipleChoiceQuestion { .. } => Some(FailureKind::NotMultipleChoiceQuestion),
            Self::UnknownAnswerLabel { .. } => Some(FailureKind::UnknownAnswerLabel),
            Self::Parse { .. } | Self::ClassificationInvariant { .. } | Self::Polars(_) => None,
        }
    }

    pub fn is_question_scoped(&self) -> bool {
        self.failure_kind().is_some()
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
