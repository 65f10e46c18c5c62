//! Survey report output.
//!
//! - **SVG charts**: one horizontal bar chart per categorical question and one
//!   stacked Yes / No / N/A chart per multiple-choice question
//! - **questions.md**: Markdown table of the question inventory
//! - **report.json**: the serialized survey report

mod markdown;
mod plots;
mod writer;

pub use markdown::inventory_markdown;
pub use plots::{PlotError, categorical_chart_svg, multiple_choice_chart_svg, write_svg};
pub use writer::{
    CATEGORICAL_DIR, INVENTORY_FILE, MULTIPLE_CHOICE_DIR, REPORT_FILE, ReportOptions,
    WrittenReport, chart_path, write_charts, write_report,
};
