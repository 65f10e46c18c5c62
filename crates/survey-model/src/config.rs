//! Per-survey configuration: answer ordering, exclusions and thresholds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Largest number of distinct values a one-column question may have and
/// still be treated as categorical.
///
/// Tuned on the 2023 export, where every bounded-option question had at most
/// nine answers. Other vintages may need a different cap.
pub const DEFAULT_MAX_CATEGORICAL_VALUES: usize = 9;

/// Thresholds used by the question classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationOptions {
    /// Distinct-value cap separating categorical from free-text questions.
    pub max_categorical_values: usize,
}

impl Default for ClassificationOptions {
    fn default() -> Self {
        Self {
            max_categorical_values: DEFAULT_MAX_CATEGORICAL_VALUES,
        }
    }
}

impl ClassificationOptions {
    #[must_use]
    pub fn with_max_categorical_values(mut self, max: usize) -> Self {
        self.max_categorical_values = max;
        self
    }
}

/// Overrides for a single question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuestionConfig {
    /// Explicit display order of answer labels.
    pub order: Option<Vec<String>>,
    /// Choice ids removed from the question before classification.
    pub exclude: Option<Vec<String>>,
}

/// Whole-survey configuration, passed explicitly through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurveyConfig {
    pub classification: ClassificationOptions,
    pub questions: BTreeMap<String, QuestionConfig>,
}

impl SurveyConfig {
    pub fn question(&self, question_id: &str) -> Option<&QuestionConfig> {
        self.questions.get(question_id)
    }

    /// Configured answer order for a question.
    pub fn answer_order(&self, question_id: &str) -> Option<&[String]> {
        self.question(question_id)
            .and_then(|config| config.order.as_deref())
    }

    /// Configured excluded choice ids for a question.
    pub fn excluded_choices(&self, question_id: &str) -> Option<&[String]> {
        self.question(question_id)
            .and_then(|config| config.exclude.as_deref())
    }
}
