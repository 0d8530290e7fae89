//! Configuration types for a preprocessing session.
//!
//! Widget state that the UI shell persists between interactions is passed
//! into the core as explicit, session-scoped configuration. The builder
//! pattern mirrors how shells assemble it field by field.

use serde::{Deserialize, Serialize};

/// Policy for handling null cells in the selected columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Leave the table unchanged
    #[default]
    None,
    /// Drop every row with a null in any selected column
    Remove,
    /// Replace nulls with the mean of the column's non-null values
    FillWithMean,
    /// Replace nulls with the median of the column's non-null values
    FillWithMedian,
}

/// Configuration for a preprocessing session.
///
/// Use [`SessionConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use vizprep_processing::SessionConfig;
///
/// let config = SessionConfig::builder()
///     .infer_schema_rows(500)
///     .recognize_missing_markers(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of leading rows the CSV reader inspects to sniff column types.
    /// Default: 10_000
    pub infer_schema_rows: usize,

    /// Whether textual markers ("NA", "null", ...) parse as missing cells
    /// in addition to empty fields.
    /// Default: true
    pub recognize_missing_markers: bool,

    /// Maximum number of sample values collected per column in summaries.
    /// Default: 5
    pub max_sample_values: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            infer_schema_rows: 10_000,
            recognize_missing_markers: true,
            max_sample_values: 5,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.infer_schema_rows == 0 {
            return Err(ConfigValidationError::InvalidInferSchemaRows(
                self.infer_schema_rows,
            ));
        }

        if self.max_sample_values == 0 {
            return Err(ConfigValidationError::InvalidMaxSampleValues(
                self.max_sample_values,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid schema inference window: {0} (must be at least 1 row)")]
    InvalidInferSchemaRows(usize),

    #[error("Invalid sample value limit: {0} (must be at least 1)")]
    InvalidMaxSampleValues(usize),
}

/// Builder for [`SessionConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    infer_schema_rows: Option<usize>,
    recognize_missing_markers: Option<bool>,
    max_sample_values: Option<usize>,
}

impl SessionConfigBuilder {
    /// Set the number of rows used for CSV schema inference.
    pub fn infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = Some(rows);
        self
    }

    /// Enable or disable textual missing-marker recognition.
    ///
    /// When disabled, only empty fields parse as missing cells.
    pub fn recognize_missing_markers(mut self, recognize: bool) -> Self {
        self.recognize_missing_markers = Some(recognize);
        self
    }

    /// Set the per-column sample value limit for summaries.
    pub fn max_sample_values(mut self, max: usize) -> Self {
        self.max_sample_values = Some(max);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `SessionConfig` or an error if validation fails.
    pub fn build(self) -> Result<SessionConfig, ConfigValidationError> {
        let config = SessionConfig {
            infer_schema_rows: self.infer_schema_rows.unwrap_or(10_000),
            recognize_missing_markers: self.recognize_missing_markers.unwrap_or(true),
            max_sample_values: self.max_sample_values.unwrap_or(5),
        };

        config.validate()?;
        Ok(config)
    }
}
