//! SVG bar charts for categorical and multiple-choice questions.
//!
//! Charts are laid out in pixel space on a [`SVGBackend`] so the output does
//! not depend on system fonts. Bars are horizontal with the first record on
//! top, matching the order of the chart records.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

use survey_model::{CategoricalChart, MultipleChoiceChart, NO, NOT_APPLICABLE, YES};

/// Errors that can occur during chart rendering.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("failed to save chart to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("invalid chart data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

type Area<'a> = DrawingArea<SVGBackend<'a>, plotters::coord::Shift>;

const WIDTH: u32 = 1000;
const MARGIN: i32 = 20;
const ROW_HEIGHT: i32 = 32;
const BAR_PADDING: i32 = 5;
const LABEL_WIDTH: i32 = 320;
const VALUE_WIDTH: i32 = 80;
const TITLE_HEIGHT: i32 = 48;
const MAX_LABEL_CHARS: usize = 42;
const MAX_TITLE_CHARS: usize = 90;
const FONT: &str = "sans-serif";

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const YES_COLOR: RGBColor = RGBColor(44, 160, 44);
const NO_COLOR: RGBColor = RGBColor(214, 39, 40);
const NOT_APPLICABLE_COLOR: RGBColor = RGBColor(170, 170, 170);
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);

fn drawing<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars - 1).collect();
    short.push('…');
    short
}

/// Shortens long labels so they fit in the label column.
fn shorten(label: &str) -> String {
    truncate(label, MAX_LABEL_CHARS)
}

fn format_percentage(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn canvas_height(rows: usize, extra_rows: usize) -> u32 {
    let rows = i32::try_from(rows + extra_rows).unwrap_or(i32::MAX / ROW_HEIGHT);
    (TITLE_HEIGHT + 2 * MARGIN + rows * ROW_HEIGHT).unsigned_abs()
}

fn bar_left() -> i32 {
    MARGIN + LABEL_WIDTH
}

fn bar_span() -> i32 {
    WIDTH as i32 - bar_left() - VALUE_WIDTH - MARGIN
}

/// Pixel width of `part` out of `whole` on the bar span.
fn scaled(part: usize, whole: usize) -> i32 {
    if whole == 0 {
        return 0;
    }
    (bar_span() as f64 * part as f64 / whole as f64).round() as i32
}

fn row_top(row: usize, first_row_top: i32) -> i32 {
    first_row_top + i32::try_from(row).unwrap_or(0) * ROW_HEIGHT
}

fn text_style(anchor: HPos) -> TextStyle<'static> {
    TextStyle::from((FONT, 15).into_font()).pos(Pos::new(anchor, VPos::Center))
}

/// Renders the SVG document of one chart into a string.
fn render(height: u32, title: &str, draw: impl FnOnce(&Area<'_>) -> Result<()>) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
        let area = root
            .titled(&truncate(title, MAX_TITLE_CHARS), (FONT, 22))
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
        draw(&area)?;
        root.present().map_err(drawing)?;
    }
    Ok(svg)
}

/// Vertical grid lines at quarters of the bar span.
fn draw_grid(area: &Area<'_>, top: i32, bottom: i32) -> Result<()> {
    for quarter in 0..=4 {
        let x = bar_left() + bar_span() * quarter / 4;
        area.draw(&PathElement::new(
            vec![(x, top), (x, bottom)],
            GRID_COLOR.stroke_width(1),
        ))
        .map_err(drawing)?;
    }
    Ok(())
}

fn draw_row_label(area: &Area<'_>, label: &str, top: i32) -> Result<()> {
    area.draw(&Text::new(
        shorten(label),
        (bar_left() - 8, top + ROW_HEIGHT / 2),
        text_style(HPos::Right),
    ))
    .map_err(drawing)
}

fn draw_value(area: &Area<'_>, value: String, x: i32, top: i32) -> Result<()> {
    area.draw(&Text::new(
        value,
        (x + 6, top + ROW_HEIGHT / 2),
        text_style(HPos::Left),
    ))
    .map_err(drawing)
}

fn draw_segment(area: &Area<'_>, left: i32, width: i32, top: i32, color: RGBColor) -> Result<()> {
    if width <= 0 {
        return Ok(());
    }
    area.draw(&Rectangle::new(
        [
            (left, top + BAR_PADDING),
            (left + width, top + ROW_HEIGHT - BAR_PADDING),
        ],
        color.filled(),
    ))
    .map_err(drawing)
}

/// Renders a categorical chart as a horizontal bar chart.
///
/// Bars are scaled to the largest count; the label next to each bar is the
/// share of all respondents.
pub fn categorical_chart_svg(chart: &CategoricalChart) -> Result<String> {
    if chart.answers.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "question {} has no answers to plot",
            chart.question_id
        )));
    }
    let max_count = chart
        .answers
        .iter()
        .map(|answer| answer.count)
        .max()
        .unwrap_or(0);
    let rows = chart.answers.len();

    render(canvas_height(rows, 0), &chart.question_text, |area| {
        let first_row_top = MARGIN;
        draw_grid(area, first_row_top, row_top(rows, first_row_top))?;
        for (row, answer) in chart.answers.iter().enumerate() {
            let top = row_top(row, first_row_top);
            let width = scaled(answer.count, max_count);
            draw_row_label(area, &answer.label, top)?;
            draw_segment(area, bar_left(), width, top, BAR_COLOR)?;
            draw_value(
                area,
                format_percentage(answer.percentage),
                bar_left() + width,
                top,
            )?;
        }
        Ok(())
    })
}

fn draw_legend(area: &Area<'_>) -> Result<()> {
    let mut left = bar_left();
    for (label, color) in [
        (YES, YES_COLOR),
        (NO, NO_COLOR),
        (NOT_APPLICABLE, NOT_APPLICABLE_COLOR),
    ] {
        area.draw(&Rectangle::new(
            [(left, MARGIN + 8), (left + 14, MARGIN + 22)],
            color.filled(),
        ))
        .map_err(drawing)?;
        area.draw(&Text::new(
            label.to_string(),
            (left + 20, MARGIN + 15),
            text_style(HPos::Left),
        ))
        .map_err(drawing)?;
        left += 90;
    }
    Ok(())
}

/// Renders a multiple-choice chart as stacked Yes / No / N/A bars.
///
/// Every bar spans all respondents; the label next to each bar is the share
/// answering "Yes".
pub fn multiple_choice_chart_svg(chart: &MultipleChoiceChart) -> Result<String> {
    if chart.choices.is_empty() || chart.respondents == 0 {
        return Err(PlotError::InvalidData(format!(
            "question {} has no choices or no respondents",
            chart.question_id
        )));
    }
    let rows = chart.choices.len();
    let respondents = chart.respondents;

    render(canvas_height(rows, 1), &chart.question_text, |area| {
        draw_legend(area)?;
        let first_row_top = MARGIN + ROW_HEIGHT;
        draw_grid(area, first_row_top, row_top(rows, first_row_top))?;
        for (row, choice) in chart.choices.iter().enumerate() {
            let top = row_top(row, first_row_top);
            draw_row_label(area, &choice.choice_text, top)?;

            let mut left = bar_left();
            for (count, color) in [
                (choice.yes, YES_COLOR),
                (choice.no, NO_COLOR),
                (choice.not_applicable, NOT_APPLICABLE_COLOR),
            ] {
                let width = scaled(count, respondents);
                draw_segment(area, left, width, top, color)?;
                left += width;
            }
            draw_value(area, format_percentage(choice.yes_percentage), left, top)?;
        }
        Ok(())
    })
}

/// Writes a rendered SVG document, creating parent directories.
pub fn write_svg(svg: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, svg)?;
    Ok(())
}
