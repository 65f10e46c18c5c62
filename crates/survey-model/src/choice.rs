//! Parsed column headers and their grouping into logical questions.

use serde::{Deserialize, Serialize};

/// Choice id marking the free-text "other" column of a question.
pub const OTHER_CHOICE_ID: &str = "other";

/// One source column's contribution to a question.
///
/// Built once from a column header and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Original header string, used to read the column back from the table.
    pub column: String,
    /// Identifier shared by every column of the same question.
    pub question_id: String,
    /// Question prompt with trailing whitespace removed.
    pub question_text: String,
    /// Option key within a multi-column question.
    pub choice_id: Option<String>,
    /// Label of the option within a multi-column question.
    pub choice_text: Option<String>,
}

impl Choice {
    /// True when this is the question's free-text "other" column.
    pub fn is_other(&self) -> bool {
        self.choice_id.as_deref() == Some(OTHER_CHOICE_ID)
    }
}

/// All choices of one question, in source column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub question_id: String,
    pub choices: Vec<Choice>,
}

impl QuestionGroup {
    pub fn new(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            choices: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Question text of the first choice; empty when every choice was excluded.
    pub fn question_text(&self) -> &str {
        self.choices
            .first()
            .map(|choice| choice.question_text.as_str())
            .unwrap_or("")
    }

    pub fn has_other(&self) -> bool {
        self.choices.iter().any(Choice::is_other)
    }

    /// Column that the cardinality rule looks at.
    pub fn primary_column(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.column.as_str())
    }
}

/// Questions keyed by id, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedQuestions {
    groups: Vec<QuestionGroup>,
}

impl GroupedQuestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a choice to its question, creating the question on first sight.
    pub fn push(&mut self, choice: Choice) {
        match self
            .groups
            .iter_mut()
            .find(|group| group.question_id == choice.question_id)
        {
            Some(group) => group.choices.push(choice),
            None => {
                let mut group = QuestionGroup::new(choice.question_id.clone());
                group.choices.push(choice);
                self.groups.push(group);
            }
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionGroup> {
        self.groups
            .iter()
            .find(|group| group.question_id == question_id)
    }

    pub fn get_mut(&mut self, question_id: &str) -> Option<&mut QuestionGroup> {
        self.groups
            .iter_mut()
            .find(|group| group.question_id == question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.get(question_id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionGroup> {
        self.groups.iter()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.question_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of choices across all questions.
    pub fn choice_count(&self) -> usize {
        self.groups.iter().map(QuestionGroup::len).sum()
    }
}

impl<'a> IntoIterator for &'a GroupedQuestions {
    type Item = &'a QuestionGroup;
    type IntoIter = std::slice::Iter<'a, QuestionGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl IntoIterator for GroupedQuestions {
    type Item = QuestionGroup;
    type IntoIter = std::vec::IntoIter<QuestionGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl FromIterator<Choice> for GroupedQuestions {
    fn from_iter<I: IntoIterator<Item = Choice>>(iter: I) -> Self {
        let mut grouped = Self::new();
        for choice in iter {
            grouped.push(choice);
        }
        grouped
    }
}
