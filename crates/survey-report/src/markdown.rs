//! Markdown rendering of the question inventory.

use std::fmt::Write;

use survey_model::InventoryRow;

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Renders the inventory as a Markdown table, one row per question.
pub fn inventory_markdown(rows: &[InventoryRow]) -> String {
    let mut out = String::from("| Type | ID | Question | Unique answers |\n");
    out.push_str("| --- | --- | --- | ---: |\n");
    for row in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            row.question_type,
            escape_cell(&row.question_id),
            escape_cell(&row.question_text),
            row.unique_answers
        );
    }
    out
}
