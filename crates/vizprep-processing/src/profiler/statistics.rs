//! Descriptive statistics over numeric columns.
//!
//! Percentiles use linear interpolation over rank `p/100 * (n - 1)`
//! (NumPy-compatible), which is what the outlier fences are defined
//! against. The empty-input convention throughout is NaN, never an error.

use polars::prelude::*;

/// Collect the usable numeric values of a series: non-null and finite.
///
/// Literal NaN/inf cells count as missing for statistics, matching the
/// floating-point convention used by the fill policies.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float = series.cast(&DataType::Float64)?;
    let ca = float.f64()?;
    Ok(ca.into_iter().flatten().filter(|v| v.is_finite()).collect())
}

/// Arithmetic mean. NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median (50th percentile). NaN for empty input.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile(&sorted, 50.0)
}

/// Calculate a percentile using linear interpolation (NumPy compatible).
///
/// `sorted_values` must be sorted ascending. NaN for empty input.
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}
