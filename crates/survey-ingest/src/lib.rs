//! Survey data ingestion.
//!
//! Loads a survey export CSV into a Polars DataFrame and the optional YAML
//! configuration that tunes ordering, exclusions and classification.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use survey_ingest::{load_survey_config, read_survey_csv};
//!
//! let df = read_survey_csv(Path::new("results-survey2023.csv"))?;
//! let config = load_survey_config(Path::new("survey.yaml"))?;
//! ```

mod config;
mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_survey_csv, validate_survey_shape};

// === Configuration ===
pub use config::{load_survey_config, parse_survey_config};
