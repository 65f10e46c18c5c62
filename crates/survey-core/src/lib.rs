//! Survey column parsing, question classification and answer aggregation.
//!
//! The entry point is [`analyze_table`], which turns a survey export loaded
//! as a Polars [`DataFrame`](polars::prelude::DataFrame) into chart records.
//! The individual stages are public so callers can stop after grouping or
//! classification.

pub mod answers;
pub mod charts;
pub mod classify;
pub mod column;
pub mod error;
pub mod grouping;
pub mod inventory;
pub mod pipeline;

pub use answers::{
    ChoiceAnswers, MULTIPLE_CHOICE_VALUES, MultipleChoiceAnswers, UnfoldedAnswers,
    aggregate_multiple_choice, categorical_answers, multiple_choice_answers, unfold_answers,
};
pub use charts::{TRAILING_LABELS, categorical_chart, default_answer_order, multiple_choice_chart};
pub use classify::{RANK_TEXT_PREFIX, check_partition, classify_question, classify_questions};
pub use column::parse_column;
pub use error::{AnalysisError, HeaderDefect, Result};
pub use grouping::{
    RESERVED_QUESTION_IDS, apply_exclusions, group_choices_by_question_id, group_columns,
    is_reserved_question_id, ungrouped_choices,
};
pub use inventory::{question_inventory, unique_answer_count};
pub use pipeline::{Analysis, analyze_table, classify_table};
