//! Shared utilities for the preprocessing core.
//!
//! Dtype-to-kind dispatch, the textual missing-marker list recognized by the
//! loader, and the null-fill primitive used by the imputers.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Column Kind Dispatch
// =============================================================================

/// Declared type of a column, derived from its polars dtype.
///
/// Everything the cleaner and visualizer do dispatches on this tag rather
/// than re-inspecting dtypes at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point numbers
    Numeric,
    /// Everything else (strings, booleans, dates read as text)
    Text,
}

impl ColumnKind {
    /// Stable lowercase name, used in summaries and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Get the declared kind of a DataType.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

/// Get the declared kind of a Series.
pub fn series_kind(series: &Series) -> ColumnKind {
    column_kind(series.dtype())
}

// =============================================================================
// Missing-Value Markers
// =============================================================================

/// Textual markers treated as missing cells by the loader (in addition to
/// empty fields) when marker recognition is enabled.
pub const MISSING_MARKERS: [&str; 11] = [
    "", "NA", "na", "N/A", "n/a", "null", "NULL", "None", "none", "missing", "MISSING",
];

/// Check if a string is a recognized missing-value marker.
pub fn is_missing_marker(s: &str) -> bool {
    let trimmed = s.trim();
    MISSING_MARKERS.iter().any(|&marker| trimmed == marker)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always Float64, so integer columns widen when the fill
/// value is fractional.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Render a non-null cell for display (sample values, text chart data).
pub fn format_cell(value: &AnyValue) -> String {
    format!("{}", value).trim_matches('"').to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_column_kind() {
        assert_eq!(column_kind(&DataType::Int32), ColumnKind::Numeric);
        assert_eq!(column_kind(&DataType::Float64), ColumnKind::Numeric);
        assert_eq!(column_kind(&DataType::String), ColumnKind::Text);
        assert_eq!(column_kind(&DataType::Boolean), ColumnKind::Text);
    }

    #[test]
    fn test_column_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ColumnKind::Numeric).unwrap(),
            "\"numeric\""
        );
        assert_eq!(serde_json::to_string(&ColumnKind::Text).unwrap(), "\"text\"");
    }

    #[test]
    fn test_is_missing_marker() {
        assert!(is_missing_marker(""));
        assert!(is_missing_marker("NA"));
        assert!(is_missing_marker("n/a"));
        assert!(is_missing_marker("  null  "));
        assert!(!is_missing_marker("42"));
        assert!(!is_missing_marker("Navarra")); // no prefix matching
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("test".into(), &[Some(1.0), None, Some(3.0)]);
        let filled = fill_numeric_nulls(&series, 0.0).unwrap();

        assert_eq!(filled.get(0).unwrap().try_extract::<f64>().unwrap(), 1.0);
        assert_eq!(filled.get(1).unwrap().try_extract::<f64>().unwrap(), 0.0);
        assert_eq!(filled.get(2).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_fill_numeric_nulls_widens_integers() {
        let series = Series::new("test".into(), &[Some(1i64), None, Some(3)]);
        let filled = fill_numeric_nulls(&series, 2.5).unwrap();

        assert!(matches!(filled.dtype(), DataType::Float64));
        assert_eq!(filled.get(1).unwrap().try_extract::<f64>().unwrap(), 2.5);
    }

    #[test]
    fn test_format_cell_strips_quotes() {
        let series = Series::new("test".into(), &["hello"]);
        let val = series.get(0).unwrap();
        assert_eq!(format_cell(&val), "hello");
    }
}
