//! YAML survey configuration loading.

use std::path::Path;

use tracing::debug;

use survey_model::SurveyConfig;

use crate::error::{IngestError, Result};

/// Parses a YAML configuration document.
///
/// An empty document yields the default configuration.
pub fn parse_survey_config(source: &str) -> std::result::Result<SurveyConfig, serde_yaml::Error> {
    if source.trim().is_empty() {
        return Ok(SurveyConfig::default());
    }
    serde_yaml::from_str(source)
}

/// Loads the per-survey configuration file.
pub fn load_survey_config(path: &Path) -> Result<SurveyConfig> {
    let source = std::fs::read_to_string(path).map_err(|e| IngestError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_survey_config(&source).map_err(|e| IngestError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(
        path = %path.display(),
        questions = config.questions.len(),
        max_categorical_values = config.classification.max_categorical_values,
        "loaded survey config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_survey_config("\n").unwrap(), SurveyConfig::default());
    }

    #[test]
    fn test_partial_question_config() {
        let config = parse_survey_config("questions:\n  editor:\n    exclude: [other]\n").unwrap();
        assert_eq!(config.excluded_choices("editor").unwrap(), ["other"]);
        assert!(config.answer_order("editor").is_none());
        assert_eq!(config.classification.max_categorical_values, 9);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(parse_survey_config("questions:\n  age:\n    sort: [a]\n").is_err());
        assert!(parse_survey_config("colors: {}\n").is_err());
    }
}
