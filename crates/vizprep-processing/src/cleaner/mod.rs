//! Null handling over selected columns.
//!
//! The one stage that mutates the table. Every call validates the whole
//! selection before touching anything, so a failed call leaves the table
//! exactly as it was.

use polars::prelude::*;
use tracing::debug;

use crate::config::NullPolicy;
use crate::error::{PrepError, Result};
use crate::imputers::StatisticalImputer;
use crate::utils::{ColumnKind, series_kind};

/// Applies a [`NullPolicy`] to the selected columns of a table.
pub struct DataCleaner;

impl DataCleaner {
    /// Apply `policy` to the selected columns.
    ///
    /// - `Remove` drops every row holding a null in any selected column, one
    ///   synchronized filter across all columns; an empty selection is a
    ///   no-op.
    /// - `FillWithMean` / `FillWithMedian` replace nulls per selected column
    ///   with that column's own statistic, computed from the pre-fill
    ///   snapshot. Columns with zero usable values fill with NaN.
    /// - `None` leaves the table unchanged.
    ///
    /// Fails with [`PrepError::ColumnNotFound`] for an unknown selection and
    /// [`PrepError::InvalidColumnType`] when a fill policy targets a
    /// non-numeric column. Validation runs before any mutation.
    pub fn handle_nulls(
        df: &mut DataFrame,
        columns: &[String],
        policy: NullPolicy,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        Self::validate_selection(df, columns, policy)?;

        match policy {
            NullPolicy::None => {
                debug!("Null policy is None, table unchanged");
                Ok(())
            }
            NullPolicy::Remove => Self::remove_null_rows(df, columns, processing_steps),
            NullPolicy::FillWithMean | NullPolicy::FillWithMedian => {
                Self::fill_nulls(df, columns, policy, processing_steps)
            }
        }
    }

    fn validate_selection(df: &DataFrame, columns: &[String], policy: NullPolicy) -> Result<()> {
        let fill_policy = matches!(
            policy,
            NullPolicy::FillWithMean | NullPolicy::FillWithMedian
        );

        for col_name in columns {
            let col = df
                .column(col_name)
                .map_err(|_| PrepError::ColumnNotFound(col_name.clone()))?;

            let kind = series_kind(col.as_materialized_series());
            if fill_policy && kind != ColumnKind::Numeric {
                return Err(PrepError::InvalidColumnType {
                    column: col_name.clone(),
                    kind: kind.as_str().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Drop every row with a null in any selected column. Row removal is
    /// synchronized: the same indices disappear from every column.
    fn remove_null_rows(
        df: &mut DataFrame,
        columns: &[String],
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        if columns.is_empty() {
            debug!("Empty selection, nothing to remove");
            return Ok(());
        }

        let before_rows = df.height();
        let mut keep = vec![true; before_rows];

        for col_name in columns {
            let null_mask = df.column(col_name)?.as_materialized_series().is_null();
            for (i, is_null) in null_mask.into_iter().enumerate() {
                if is_null.unwrap_or(false) {
                    keep[i] = false;
                }
            }
        }

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        *df = df.filter(&mask)?;

        let rows_removed = before_rows - df.height();
        if rows_removed > 0 {
            processing_steps.push(format!(
                "Removed {} rows with missing values in {:?}",
                rows_removed, columns
            ));
            debug!("Removed {} rows with missing values", rows_removed);
        }

        Ok(())
    }

    /// Fill nulls per selected column from the pre-fill snapshot.
    fn fill_nulls(
        df: &mut DataFrame,
        columns: &[String],
        policy: NullPolicy,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        // Snapshot: every fill value is computed before the first mutation
        let mut fills = Vec::with_capacity(columns.len());
        for col_name in columns {
            let series = df.column(col_name)?.as_materialized_series();
            let value = match policy {
                NullPolicy::FillWithMean => StatisticalImputer::mean_fill_value(series),
                NullPolicy::FillWithMedian => StatisticalImputer::median_fill_value(series),
                _ => unreachable!("fill_nulls called with a non-fill policy"),
            }
            .map_err(|e| PrepError::CleaningFailed(e.to_string()))?;
            fills.push((col_name.clone(), value));
        }

        let method = match policy {
            NullPolicy::FillWithMean => "mean",
            _ => "median",
        };

        for (col_name, value) in fills {
            StatisticalImputer::fill_with_value(df, &col_name, value, processing_steps, method)
                .map_err(|e| PrepError::CleaningFailed(e.to_string()))?;
        }

        Ok(())
    }
}
