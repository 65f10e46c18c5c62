use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use survey_cli::types::AnalyzeResult;
use survey_model::{FailureKind, InventoryRow, QuestionType};

pub fn print_summary(result: &AnalyzeResult) {
    let report = &result.report;
    println!("Survey: {}", result.csv.display());
    println!("Respondents: {}", report.respondents);
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Questions"),
        header_cell("Charts"),
        header_cell("Failures"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for question_type in QuestionType::ALL {
        let charts = match question_type {
            QuestionType::Categorical => Some(charted(result, QuestionType::Categorical)),
            QuestionType::MultipleChoice => Some(charted(result, QuestionType::MultipleChoice)),
            QuestionType::Ranking | QuestionType::Other => None,
        };
        let failures = report
            .failures
            .iter()
            .filter(|failure| failure.question_type == question_type)
            .count();
        table.add_row(vec![
            type_cell(question_type),
            Cell::new(report.count_of(question_type)),
            count_cell(charts, Color::Green),
            count_cell(Some(failures), Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.inventory.len()).add_attribute(Attribute::Bold),
        count_cell(Some(result.written.charts.len()), Color::Green).add_attribute(Attribute::Bold),
        count_cell(Some(report.failures.len()), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_failure_table(result);
}

/// Charts written for one question type.
fn charted(result: &AnalyzeResult, question_type: QuestionType) -> usize {
    let built = match question_type {
        QuestionType::Categorical => result.report.categorical.len(),
        QuestionType::MultipleChoice => result.report.multiple_choice.len(),
        QuestionType::Ranking | QuestionType::Other => 0,
    };
    if result.written.charts.is_empty() {
        return 0;
    }
    let render_failures = result
        .report
        .failures
        .iter()
        .filter(|f| f.question_type == question_type && f.kind == FailureKind::Render)
        .count();
    built.saturating_sub(render_failures)
}

fn print_failure_table(result: &AnalyzeResult) {
    let failures = &result.report.failures;
    if failures.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Question"),
        header_cell("Type"),
        header_cell("Failure"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for failure in failures {
        table.add_row(vec![
            Cell::new(&failure.question_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            type_cell(failure.question_type),
            Cell::new(failure_label(failure.kind)).fg(Color::Red),
            Cell::new(&failure.message),
        ]);
    }
    println!();
    println!("Skipped questions:");
    println!("{table}");
}

pub fn print_inventory(rows: &[InventoryRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("ID"),
        header_cell("Question"),
        header_cell("Unique answers"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            type_cell(row.question_type),
            Cell::new(&row.question_id),
            Cell::new(&row.question_text),
            Cell::new(row.unique_answers),
        ]);
    }
    println!("{table}");
}

fn failure_label(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::AmbiguousCategoricalQuestion => "ambiguous categorical",
        FailureKind::NotMultipleChoiceQuestion => "not multiple choice",
        FailureKind::UnknownAnswerLabel => "unknown answer label",
        FailureKind::Render => "render",
    }
}

fn type_cell(question_type: QuestionType) -> Cell {
    let color = match question_type {
        QuestionType::Ranking => Color::Magenta,
        QuestionType::Categorical => Color::Blue,
        QuestionType::MultipleChoice => Color::Green,
        QuestionType::Other => Color::DarkGrey,
    };
    Cell::new(question_type).fg(color)
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
