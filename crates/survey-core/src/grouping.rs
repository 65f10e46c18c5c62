//! Grouping of parsed columns into logical questions.

use tracing::{debug, warn};

use survey_model::{Choice, GroupedQuestions, SurveyConfig};

use crate::column::parse_column;
use crate::error::Result;

/// Question ids of export metadata columns, never analysed.
///
/// Response id, submission timestamp, last page reached, start language and
/// randomization seed.
pub const RESERVED_QUESTION_IDS: [&str; 5] =
    ["id", "submitdate", "lastpage", "startlanguage", "seed"];

pub fn is_reserved_question_id(question_id: &str) -> bool {
    RESERVED_QUESTION_IDS.contains(&question_id)
}

/// Parses every column header and drops metadata columns.
///
/// Fails on the first header that does not parse.
pub fn ungrouped_choices<S: AsRef<str>>(columns: &[S]) -> Result<Vec<Choice>> {
    let mut choices = Vec::with_capacity(columns.len());
    for column in columns {
        let choice = parse_column(column.as_ref())?;
        if is_reserved_question_id(&choice.question_id) {
            debug!(column = %choice.column, "skipping metadata column");
            continue;
        }
        choices.push(choice);
    }
    Ok(choices)
}

/// Groups choices by question id, keeping first-seen order.
pub fn group_choices_by_question_id(choices: Vec<Choice>) -> GroupedQuestions {
    choices.into_iter().collect()
}

/// Parses and groups a header row in one step.
pub fn group_columns<S: AsRef<str>>(columns: &[S]) -> Result<GroupedQuestions> {
    let grouped = group_choices_by_question_id(ungrouped_choices(columns)?);
    debug!(
        columns = columns.len(),
        questions = grouped.len(),
        choices = grouped.choice_count(),
        "grouped columns into questions"
    );
    Ok(grouped)
}

/// Removes the configured excluded choices from their questions.
///
/// Questions stay in place even when every choice is excluded.
pub fn apply_exclusions(mut grouped: GroupedQuestions, config: &SurveyConfig) -> GroupedQuestions {
    for question_id in config.questions.keys() {
        let Some(excluded) = config.excluded_choices(question_id) else {
            continue;
        };
        let Some(group) = grouped.get_mut(question_id) else {
            warn!(question_id = %question_id, "exclusions configured for unknown question");
            continue;
        };
        let before = group.choices.len();
        group.choices.retain(|choice| {
            choice
                .choice_id
                .as_ref()
                .is_none_or(|choice_id| !excluded.contains(choice_id))
        });
        debug!(
            question_id = %question_id,
            removed = before - group.choices.len(),
            "applied choice exclusions"
        );
    }
    grouped
}
