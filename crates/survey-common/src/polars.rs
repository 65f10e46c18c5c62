//! Polars `DataFrame` access helpers.

use std::collections::HashSet;

use polars::prelude::*;

/// Converts a Polars `AnyValue` to the string seen by the survey pipeline.
///
/// `Null` becomes the empty string; numbers are printed without trailing
/// zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use survey_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("Yes")), "Yes");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::Boolean(b) => if b { "Yes" } else { "No" }.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// ```
/// use survey_common::format_numeric;
///
/// assert_eq!(format_numeric(2.0), "2");
/// assert_eq!(format_numeric(2.50), "2.5");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Reads every cell of a column as a string, in row order.
pub fn column_strings(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let column = df.column(name)?;
    (0..df.height())
        .map(|idx| column.get(idx).map(any_to_string))
        .collect()
}

/// Number of distinct values in a column, counting the empty string as one.
pub fn distinct_count(df: &DataFrame, name: &str) -> PolarsResult<usize> {
    let values = column_strings(df, name)?;
    Ok(values.iter().collect::<HashSet<_>>().len())
}

/// Builds an all-string frame from `(name, values)` pairs.
///
/// Used by tests across the workspace.
pub fn test_frame(columns: Vec<(&str, Vec<&str>)>) -> PolarsResult<DataFrame> {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols)
}
