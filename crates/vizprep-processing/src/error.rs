//! Custom error types for the preprocessing core.
//!
//! This module provides the error hierarchy using `thiserror`. Errors are
//! serializable so a UI shell can forward them over IPC and render them as
//! `{code, message}` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the preprocessing core.
#[derive(Error, Debug)]
pub enum PrepError {
    /// The uploaded bytes could not be parsed into a table.
    #[error("Failed to load table: {0}")]
    LoadFailure(String),

    /// A referenced column is absent from the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// A numeric-only operation was requested on a non-numeric column.
    #[error("Column '{column}' is not numeric (declared type: {kind})")]
    InvalidColumnType { column: String, kind: String },

    /// An operation ran before any table was loaded.
    #[error("No table loaded")]
    NoTableLoaded,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An outlier report no longer matches the table it was computed for.
    #[error("Outlier report is stale: computed against {report_rows} rows, table now has {table_rows}")]
    StaleReport {
        report_rows: usize,
        table_rows: usize,
    },

    /// Null handling or outlier removal failed.
    #[error("Failed to clean table: {0}")]
    CleaningFailed(String),

    /// Summarizing the table failed.
    #[error("Failed to inspect table: {0}")]
    InspectionFailed(String),

    /// Internal error (e.g., thread join failure in a host shell).
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PrepError>,
    },
}

impl PrepError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PrepError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    ///
    /// These codes let the UI shell treat specific failures differently
    /// (e.g., a column-selection mistake vs. an unreadable upload).
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::LoadFailure(_) => "LOAD_FAILURE",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidColumnType { .. } => "INVALID_COLUMN_TYPE",
            Self::NoTableLoaded => "NO_TABLE_LOADED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::StaleReport { .. } => "STALE_REPORT",
            Self::CleaningFailed(_) => "CLEANING_FAILED",
            Self::InspectionFailed(_) => "INSPECTION_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable by fixing the request
    /// (as opposed to a fundamental failure of the core).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ColumnNotFound(_)
                | Self::InvalidColumnType { .. }
                | Self::NoTableLoaded
                | Self::InvalidConfig(_)
                | Self::StaleReport { .. }
        )
    }
}

/// Serialize implementation for IPC compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields,
/// making them easy to handle in a frontend.
impl Serialize for PrepError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PrepError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PrepError::Polars(e).with_context(context))
    }
}
