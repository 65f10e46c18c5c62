//! Survey export loading.

use std::path::Path;

use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Exports wider than this are logged.
const WIDE_EXPORT_COLUMNS: usize = 1000;

fn check_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Rejects exports without responses and blank header cells.
pub fn validate_survey_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.width() == 0 || df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    if df.width() > WIDE_EXPORT_COLUMNS {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "survey export is unusually wide"
        );
    }

    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Reads a survey export into a DataFrame.
///
/// The first row holds the column headers. Every column is read as a string
/// so answers such as `"01"` survive untouched; empty cells come back as
/// nulls, which the analysis reads as empty strings.
pub fn read_survey_csv(path: &Path) -> Result<DataFrame> {
    check_file(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_survey_shape(&df, path)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded survey export"
    );
    Ok(df)
}
