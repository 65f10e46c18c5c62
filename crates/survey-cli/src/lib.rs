//! CLI library components for survey analysis.

pub mod commands;
pub mod logging;
pub mod types;
