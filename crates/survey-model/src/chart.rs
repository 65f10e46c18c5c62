//! Renderer-ready chart records.
//!
//! These are the outputs of the aggregation core. Renderers only draw them;
//! all counting and ordering happens before a record is built.

use serde::{Deserialize, Serialize};

/// Label used for respondents that left a question empty.
pub const NOT_ANSWERED: &str = "Not answered";

/// Answer label for a free-text "other" entry in a categorical question.
pub const OTHER_LABEL: &str = "Other";

/// Not-applicable marker in multiple-choice exports.
pub const NOT_APPLICABLE: &str = "N/A";

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// One bar of a categorical chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCount {
    pub label: String,
    pub count: usize,
    /// Share of all respondents, in the range 0.0..=1.0.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalChart {
    pub question_id: String,
    pub question_text: String,
    /// Number of respondents, including those who did not answer.
    pub total: usize,
    /// Bars in display order.
    pub answers: Vec<AnswerCount>,
}

impl CategoricalChart {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().map(|answer| answer.label.as_str())
    }

    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.answers
            .iter()
            .find(|answer| answer.label == label)
            .map(|answer| answer.count)
    }
}

/// One stacked bar of a multiple-choice chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceCount {
    pub choice_id: String,
    pub choice_text: String,
    pub yes: usize,
    pub no: usize,
    pub not_applicable: usize,
    /// Share of respondents answering "Yes", in the range 0.0..=1.0.
    pub yes_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoiceChart {
    pub question_id: String,
    pub question_text: String,
    pub respondents: usize,
    /// Choices ordered by "Yes" count, with the "other" choice last.
    pub choices: Vec<ChoiceCount>,
}

/// Flattened free-text entries of an "other" question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextAnswers {
    pub question_id: String,
    pub question_text: String,
    pub entries: Vec<String>,
}
