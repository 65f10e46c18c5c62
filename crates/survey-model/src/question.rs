use std::fmt;

use serde::{Deserialize, Serialize};

use crate::choice::QuestionGroup;

/// Bucket a question is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Ranking,
    Categorical,
    #[serde(rename = "multiple_choices")]
    MultipleChoice,
    Other,
}

impl QuestionType {
    /// All buckets, in reporting order.
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Ranking,
        QuestionType::Categorical,
        QuestionType::MultipleChoice,
        QuestionType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Ranking => "ranking",
            QuestionType::Categorical => "categorical",
            QuestionType::MultipleChoice => "multiple_choices",
            QuestionType::Other => "other",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Questions partitioned by type. Each bucket keeps source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedQuestions {
    pub ranking: Vec<QuestionGroup>,
    pub categorical: Vec<QuestionGroup>,
    pub multiple_choice: Vec<QuestionGroup>,
    pub other: Vec<QuestionGroup>,
}

impl ClassifiedQuestions {
    pub fn bucket(&self, kind: QuestionType) -> &[QuestionGroup] {
        match kind {
            QuestionType::Ranking => &self.ranking,
            QuestionType::Categorical => &self.categorical,
            QuestionType::MultipleChoice => &self.multiple_choice,
            QuestionType::Other => &self.other,
        }
    }

    pub fn bucket_mut(&mut self, kind: QuestionType) -> &mut Vec<QuestionGroup> {
        match kind {
            QuestionType::Ranking => &mut self.ranking,
            QuestionType::Categorical => &mut self.categorical,
            QuestionType::MultipleChoice => &mut self.multiple_choice,
            QuestionType::Other => &mut self.other,
        }
    }

    /// Total number of classified questions across buckets.
    pub fn len(&self) -> usize {
        QuestionType::ALL
            .iter()
            .map(|kind| self.bucket(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket holding the given question, if any.
    pub fn type_of(&self, question_id: &str) -> Option<QuestionType> {
        QuestionType::ALL.into_iter().find(|kind| {
            self.bucket(*kind)
                .iter()
                .any(|group| group.question_id == question_id)
        })
    }

    /// Iterates every question together with its bucket, in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionType, &QuestionGroup)> {
        QuestionType::ALL
            .into_iter()
            .flat_map(move |kind| self.bucket(kind).iter().map(move |group| (kind, group)))
    }
}
