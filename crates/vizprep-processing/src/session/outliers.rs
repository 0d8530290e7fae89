//! IQR outlier detection and removal.
//!
//! Detection is read-only and hands the UI a report it can show before the
//! user decides to remove; removal deletes exactly the reported rows and
//! refuses a report that no longer matches the table.

use polars::prelude::*;
use tracing::debug;

use crate::error::{PrepError, Result, ResultExt};
use crate::profiler::statistics::percentile;
use crate::types::OutlierReport;
use crate::utils::{ColumnKind, series_kind};

/// Fence multiplier over the interquartile range.
const IQR_FENCE: f64 = 1.5;

/// Detects and removes IQR outliers in a numeric column.
pub struct OutlierDetector;

impl OutlierDetector {
    /// Flag every row whose value in `column` falls outside
    /// `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`, with interpolated quartiles over the
    /// column's usable (non-null, finite) values.
    ///
    /// Pure: the table is not touched, and calling it twice on an unchanged
    /// table returns the same index set. Fewer than two usable values yield
    /// an empty report with NaN fences, since no fences can be drawn.
    pub fn detect(df: &DataFrame, column: &str) -> Result<OutlierReport> {
        let col = df
            .column(column)
            .map_err(|_| PrepError::ColumnNotFound(column.to_string()))?;
        let series = col.as_materialized_series();

        let kind = series_kind(series);
        if kind != ColumnKind::Numeric {
            return Err(PrepError::InvalidColumnType {
                column: column.to_string(),
                kind: kind.as_str().to_string(),
            });
        }

        let float = series.cast(&DataType::Float64)?;
        let ca = float.f64()?;

        let mut sorted: Vec<f64> = ca.into_iter().flatten().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        if sorted.len() < 2 {
            debug!(
                "Column '{}' has {} usable values, no fences drawn",
                column,
                sorted.len()
            );
            return Ok(OutlierReport {
                column: column.to_string(),
                q1: f64::NAN,
                q3: f64::NAN,
                lower_fence: f64::NAN,
                upper_fence: f64::NAN,
                indices: Vec::new(),
                rows: df.clear(),
                table_rows: df.height(),
            });
        }

        let q1 = percentile(&sorted, 25.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - IQR_FENCE * iqr;
        let upper_fence = q3 + IQR_FENCE * iqr;

        let mut indices = Vec::new();
        let mut mask_values = vec![false; df.height()];
        for (i, opt_val) in ca.into_iter().enumerate() {
            if let Some(val) = opt_val
                && (val < lower_fence || val > upper_fence)
            {
                indices.push(i);
                mask_values[i] = true;
            }
        }

        let mask = BooleanChunked::from_slice("outliers".into(), &mask_values);
        let rows = df
            .filter(&mask)
            .context("While collecting flagged rows")?;

        debug!(
            "Column '{}': fences [{:.3}, {:.3}], {} outlier rows",
            column,
            lower_fence,
            upper_fence,
            indices.len()
        );

        Ok(OutlierReport {
            column: column.to_string(),
            q1,
            q3,
            lower_fence,
            upper_fence,
            indices,
            rows,
            table_rows: df.height(),
        })
    }

    /// Delete exactly the rows the report flagged, preserving alignment
    /// across every column.
    ///
    /// Returns the number of rows removed. A report computed against a
    /// table of a different height is rejected with
    /// [`PrepError::StaleReport`].
    pub fn remove(
        df: &mut DataFrame,
        report: &OutlierReport,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        if report.table_rows != df.height() {
            return Err(PrepError::StaleReport {
                report_rows: report.table_rows,
                table_rows: df.height(),
            });
        }

        if report.is_empty() {
            return Ok(0);
        }

        let mut keep = vec![true; df.height()];
        for &idx in &report.indices {
            keep[idx] = false;
        }

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        *df = df
            .filter(&mask)
            .context("While removing flagged rows")?;

        let removed = report.indices.len();
        processing_steps.push(format!(
            "Removed {} outlier rows from '{}' (fences [{:.2}, {:.2}])",
            removed, report.column, report.lower_fence, report.upper_fence
        ));
        debug!("Removed {} outlier rows", removed);

        Ok(removed)
    }
}
