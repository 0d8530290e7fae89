//! Table inspection: shape, per-column declared types, null stats, and
//! preview samples for the data-overview panel.

pub mod statistics;

use anyhow::Result;
use polars::prelude::*;
use rand::prelude::*;

use crate::types::{ColumnSummary, TableSummary};
use crate::utils::{format_cell, series_kind};

/// Computes [`TableSummary`] reports. Pure: never mutates the table, and
/// always reflects the table as passed in, so calling it again after
/// cleaning shows the cleaned shape.
pub struct TableInspector;

impl TableInspector {
    /// Summarize the table: row/column counts plus per-column details.
    pub fn describe(df: &DataFrame, max_samples: usize) -> Result<TableSummary> {
        let mut columns = Vec::with_capacity(df.width());

        for col_name in df.get_column_names() {
            columns.push(Self::summarize_column(df, col_name, max_samples)?);
        }

        Ok(TableSummary {
            row_count: df.height(),
            column_count: df.width(),
            columns,
        })
    }

    fn summarize_column(
        df: &DataFrame,
        col_name: &str,
        max_samples: usize,
    ) -> Result<ColumnSummary> {
        let col = df.column(col_name)?;
        let series = col.as_materialized_series();
        let null_count = series.null_count();
        let null_percentage = if df.height() > 0 {
            (null_count as f64 / df.height() as f64) * 100.0
        } else {
            0.0
        };

        // Deterministic sample of non-null values for preview panels
        let mut sample_values = Vec::new();
        let non_null_series = series.drop_nulls();
        if !non_null_series.is_empty() {
            let sample_size = std::cmp::min(max_samples, non_null_series.len());
            let mut rng = StdRng::seed_from_u64(42);
            let indices: Vec<usize> = (0..non_null_series.len()).collect();
            let mut sampled_indices: Vec<usize> = indices
                .choose_multiple(&mut rng, sample_size)
                .copied()
                .collect();
            sampled_indices.sort_unstable();

            for idx in sampled_indices {
                if let Ok(val) = non_null_series.get(idx) {
                    sample_values.push(format_cell(&val));
                }
            }
        }

        Ok(ColumnSummary {
            name: col_name.to_string(),
            dtype: format!("{:?}", series.dtype()),
            kind: series_kind(series),
            null_count,
            null_percentage,
            sample_values,
        })
    }
}
