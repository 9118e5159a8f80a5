//! Error types for the GDP dashboard pipeline.
//!
//! The hierarchy mirrors the pipeline stages:
//!
//! - [`CsvError`] - reading the raw table (lives in [`crate::parser`])
//! - [`SchemaError`] - the table does not have the expected wide layout
//! - [`ConfigError`] - dashboard configuration is unusable
//! - [`PipelineError`] - top-level orchestration errors
//! - [`ServerError`] - HTTP surface errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Missing cell values are never errors: they travel through the charts as
//! `None`.

use thiserror::Error;

pub use crate::parser::CsvError;

// =============================================================================
// Input Schema Errors
// =============================================================================

/// The wide input table is not shaped the way the cleaner expects.
///
/// Always fatal: no partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A required column is absent.
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    /// A column that should be a year has an unparseable label.
    #[error("Column '{0}' is not a valid year")]
    InvalidYearColumn(String),

    /// Two column labels resolve to the same year.
    #[error("Year {year} appears in more than one column ('{first}' and '{second}')")]
    DuplicateYearColumn {
        year: i32,
        first: String,
        second: String,
    },

    /// A year inside the configured range has no column.
    #[error("Missing year column: {0}")]
    MissingYearColumn(i32),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors loading or checking a [`crate::config::DashboardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    /// Config file is not valid JSON for the expected shape.
    #[error("Invalid config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Config parsed but its values are inconsistent.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::build_dashboard`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Input schema error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Emitted charts failed the figure schema.
    #[error("Output validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Whether the failure is caused by the caller's input rather than by us.
    pub fn is_input_error(&self) -> bool {
        matches!(self, PipelineError::Csv(_) | PipelineError::Schema(_))
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Failed to bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A background task failed or its output could not be encoded.
    #[error("Internal error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for cleaning operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // SchemaError -> PipelineError
        let schema_err = SchemaError::MissingColumn("Country".into());
        let pipeline_err: PipelineError = schema_err.into();
        assert!(pipeline_err.to_string().contains("Country"));
        assert!(pipeline_err.is_input_error());

        // CsvError -> PipelineError
        let csv_err = CsvError::new(1, "Empty CSV file");
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("Empty"));
        assert!(pipeline_err.is_input_error());
    }

    #[test]
    fn test_duplicate_year_format() {
        let err = SchemaError::DuplicateYearColumn {
            year: 1990,
            first: "1990".into(),
            second: "1990 [YR1990]".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1990"));
        assert!(msg.contains("[YR1990]"));
    }

    #[test]
    fn test_validation_error_joins_messages() {
        let err = PipelineError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Output validation failed: a; b");
        assert!(!err.is_input_error());
    }
}
