//! Shared utilities for the survey crates.
//!
//! Survey answers are read as plain strings: null cells become the empty
//! string, which is the "no response" sentinel everywhere downstream.

pub mod polars;

pub use polars::{any_to_string, column_strings, distinct_count, format_numeric, test_frame};
