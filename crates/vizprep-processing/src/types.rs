//! Report and boundary types exchanged with the UI shell.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::charts::{ChartSpec, RenderableChart};
use crate::config::NullPolicy;
use crate::utils::ColumnKind;

/// Summary of one column for the data-overview panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Raw polars dtype, for debugging displays.
    pub dtype: String,
    /// Declared type the rest of the core dispatches on.
    pub kind: ColumnKind,
    pub null_count: usize,
    pub null_percentage: f64,
    /// Deterministic handful of non-null values for preview panels.
    pub sample_values: Vec<String>,
}

/// Shape-and-types report for the current table.
///
/// Always reflects the table as it stands when the summary is computed, so
/// a re-run after cleaning shows the cleaned shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub row_count: usize,
    pub column_count: usize,
    /// Columns in table order.
    pub columns: Vec<ColumnSummary>,
}

impl TableSummary {
    /// Look up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.clone())
            .collect()
    }
}

/// Read-only view of the rows flagged by IQR outlier detection.
///
/// Fences are `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` with interpolated percentiles.
/// The report records the height of the table it was computed against;
/// removal refuses a report whose table has since changed shape.
#[derive(Debug, Clone)]
pub struct OutlierReport {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Indices of the offending rows, ascending. Always a subset of the
    /// current table's row indices at detection time.
    pub indices: Vec<usize>,
    /// The offending rows themselves, for display before removal.
    pub rows: DataFrame,
    /// Height of the table the report was computed against.
    pub table_rows: usize,
}

impl OutlierReport {
    /// Number of outlier rows found.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when detection found nothing (or had too few values to fence).
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// One full bundle of UI inputs, driving a single fixed-order re-run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Columns scoped by the null-handling policy.
    #[serde(default)]
    pub selected_columns: Vec<String>,
    #[serde(default)]
    pub null_policy: NullPolicy,
    /// Target column for outlier detection, if the box is ticked.
    #[serde(default)]
    pub detect_outliers_in: Option<String>,
    /// Whether detected outliers are also removed.
    #[serde(default)]
    pub remove_outliers: bool,
    /// Chart to describe over the cleaned table.
    #[serde(default)]
    pub chart: Option<ChartSpec>,
}

/// Everything one re-run hands back to the UI shell.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// Inspector overview of the freshly loaded table, before cleaning.
    /// Call [`crate::PrepSession::describe`] afterwards for the cleaned shape.
    pub summary: TableSummary,
    /// Detection result, when outlier detection was requested.
    pub outliers: Option<OutlierReport>,
    /// Chart description, when a chart was requested.
    pub chart: Option<RenderableChart>,
    /// Human-readable audit trail of every mutation this run performed.
    pub processing_steps: Vec<String>,
    pub rows_before: usize,
    pub rows_after: usize,
    /// RFC 3339 completion timestamp.
    pub completed_at: String,
}
