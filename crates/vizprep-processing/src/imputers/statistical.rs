//! Statistical fill primitives for numeric columns.
//!
//! Fill values are computed by the caller from a pre-fill snapshot and
//! applied here, so filling several columns in one call never lets one
//! column observe another's freshly-imputed values. A column with zero
//! usable values fills with NaN rather than erroring.

use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

use crate::profiler::statistics::{mean, median, numeric_values};
use crate::utils::fill_numeric_nulls;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Mean of the column's usable values. NaN when there are none.
    pub fn mean_fill_value(series: &Series) -> Result<f64> {
        Ok(mean(&numeric_values(series)?))
    }

    /// Median of the column's usable values. NaN when there are none.
    pub fn median_fill_value(series: &Series) -> Result<f64> {
        Ok(median(&numeric_values(series)?))
    }

    /// Replace every null in `col_name` with `fill_value`.
    ///
    /// Never changes the row count. `method` labels the audit-trail entry.
    pub fn fill_with_value(
        df: &mut DataFrame,
        col_name: &str,
        fill_value: f64,
        processing_steps: &mut Vec<String>,
        method: &str,
    ) -> Result<()> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let null_count = series.null_count();
        if null_count == 0 {
            debug!("No nulls in '{}', column unchanged", col_name);
            return Ok(());
        }

        let filled = fill_numeric_nulls(&series, fill_value)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled {} missing cells in '{}' with {}: {:.2}",
            null_count, col_name, method, fill_value
        ));
        debug!(
            "Filled {} nulls in '{}' with {} {:.2}",
            null_count, col_name, method, fill_value
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // fill value tests
    // ========================================================================

    #[test]
    fn test_mean_fill_value_ignores_nulls() {
        let series = Series::new("score".into(), &[Some(5.0), None, Some(7.0)]);
        assert_eq!(StatisticalImputer::mean_fill_value(&series).unwrap(), 6.0);
    }

    #[test]
    fn test_median_fill_value_interpolates() {
        let series = Series::new("score".into(), &[Some(1.0), None, Some(3.0), Some(10.0)]);
        assert_eq!(StatisticalImputer::median_fill_value(&series).unwrap(), 3.0);
    }

    #[test]
    fn test_fill_values_all_null_column_are_nan() {
        // Zero usable values: the statistic is undefined, the value-level
        // NaN marker propagates instead of an error
        let series = Series::new("score".into(), &[Option::<f64>::None, None]);
        assert!(
            StatisticalImputer::mean_fill_value(&series)
                .unwrap()
                .is_nan()
        );
        assert!(
            StatisticalImputer::median_fill_value(&series)
                .unwrap()
                .is_nan()
        );
    }

    // ========================================================================
    // fill_with_value tests
    // ========================================================================

    #[test]
    fn test_fill_with_value_basic() {
        let mut df = df![
            "values" => [Some(1.0), None, Some(5.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::fill_with_value(&mut df, "values", 3.0, &mut steps, "mean").unwrap();

        let values = df.column("values").unwrap();
        assert_eq!(values.null_count(), 0);
        assert_eq!(values.get(1).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_fill_with_value_preserves_row_count_and_values() {
        let mut df = df![
            "values" => [Some(10.0), None, Some(20.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::fill_with_value(&mut df, "values", 15.0, &mut steps, "mean").unwrap();

        assert_eq!(df.height(), 3);
        let values = df.column("values").unwrap();
        assert_eq!(values.get(0).unwrap().try_extract::<f64>().unwrap(), 10.0);
        assert_eq!(values.get(2).unwrap().try_extract::<f64>().unwrap(), 20.0);
    }

    #[test]
    fn test_fill_with_value_logs_step() {
        let mut df = df![
            "values" => [Some(1.0), None, Some(3.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::fill_with_value(&mut df, "values", 2.0, &mut steps, "median").unwrap();

        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("values"));
        assert!(steps[0].contains("median"));
        assert!(steps[0].contains("2.00"));
    }

    #[test]
    fn test_fill_with_value_result_is_float() {
        let mut df = df![
            "values" => [Some(10i64), None, Some(20)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::fill_with_value(&mut df, "values", 15.0, &mut steps, "mean").unwrap();

        let values = df.column("values").unwrap();
        assert!(matches!(values.dtype(), DataType::Float64));
    }

    #[test]
    fn test_fill_without_nulls_is_identity() {
        let mut df = df![
            "values" => [Some(10i64), Some(15), Some(20)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::fill_with_value(&mut df, "values", 15.0, &mut steps, "mean").unwrap();

        // Untouched: same dtype, same values, no audit entry
        let values = df.column("values").unwrap();
        assert!(matches!(values.dtype(), DataType::Int64));
        assert_eq!(values.get(1).unwrap().try_extract::<i64>().unwrap(), 15);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_fill_with_nan_keeps_cells_present() {
        // NaN fill writes a value into every null cell
        let mut df = df![
            "values" => [Option::<f64>::None, None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::fill_with_value(&mut df, "values", f64::NAN, &mut steps, "mean")
            .unwrap();

        let values = df.column("values").unwrap();
        assert_eq!(values.null_count(), 0);
        assert!(
            values
                .get(0)
                .unwrap()
                .try_extract::<f64>()
                .unwrap()
                .is_nan()
        );
    }
}
