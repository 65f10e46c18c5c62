//! Column header parsing.
//!
//! Survey exports name every column
//! `<question_id>[<choice_id>]|<question_text>[<choice_text>]`, where both
//! bracketed parts are optional:
//!
//! - `question_id` runs up to the first `[` or `|`
//! - `choice_id` sits between `[` and the `]|` that closes the id part
//! - `question_text` runs from `|` up to the next `[` and is right-trimmed
//! - `choice_text` sits between that `[` and the final `]`

use survey_model::Choice;

use crate::error::{AnalysisError, HeaderDefect, Result};

/// Parses one column header into a [`Choice`].
///
/// # Examples
///
/// ```
/// use survey_core::parse_column;
///
/// let choice = parse_column("Q2[opt1]|Pick one[Option One]").unwrap();
/// assert_eq!(choice.question_id, "Q2");
/// assert_eq!(choice.choice_id.as_deref(), Some("opt1"));
/// assert_eq!(choice.question_text, "Pick one");
/// assert_eq!(choice.choice_text.as_deref(), Some("Option One"));
/// ```
pub fn parse_column(column: &str) -> Result<Choice> {
    let fail = |defect| AnalysisError::parse(column, defect);

    let id_end = column
        .find(['[', '|'])
        .ok_or_else(|| fail(HeaderDefect::MissingSeparator))?;
    let question_id = &column[..id_end];
    if question_id.is_empty() {
        return Err(fail(HeaderDefect::EmptyQuestionId));
    }

    let rest = &column[id_end..];
    let (choice_id, text_part) = match rest.strip_prefix('[') {
        Some(bracketed) => {
            let close = bracketed
                .find("]|")
                .ok_or_else(|| fail(HeaderDefect::UnclosedChoiceId))?;
            let choice_id = &bracketed[..close];
            if choice_id.is_empty() {
                return Err(fail(HeaderDefect::EmptyChoiceId));
            }
            (Some(choice_id), &bracketed[close + 2..])
        }
        None => {
            let text = rest
                .strip_prefix('|')
                .ok_or_else(|| fail(HeaderDefect::MissingSeparator))?;
            (None, text)
        }
    };

    let text_end = text_part.find('[').unwrap_or(text_part.len());
    let question_text = &text_part[..text_end];
    if question_text.is_empty() {
        return Err(fail(HeaderDefect::EmptyQuestionText));
    }

    let choice_text = match text_part[text_end..].strip_prefix('[') {
        Some(bracketed) => {
            let close = bracketed
                .rfind(']')
                .ok_or_else(|| fail(HeaderDefect::UnclosedChoiceText))?;
            if close + 1 != bracketed.len() {
                return Err(fail(HeaderDefect::TrailingText));
            }
            let text = &bracketed[..close];
            if text.is_empty() {
                return Err(fail(HeaderDefect::EmptyChoiceText));
            }
            Some(text)
        }
        None => None,
    };

    Ok(Choice {
        column: column.to_string(),
        question_id: question_id.to_string(),
        question_text: question_text.trim_end().to_string(),
        choice_id: choice_id.map(str::to_string),
        choice_text: choice_text.map(str::to_string),
    })
}
