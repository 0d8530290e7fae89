//! Chart descriptions for the rendering collaborator.
//!
//! The core never draws: it validates the request against the table,
//! extracts the referenced column data, and hands back a description the
//! presentation layer turns into pixels. Binning, axis scaling, and the
//! categorical-axis decision for text columns all belong to the renderer.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};
use crate::utils::{ColumnKind, format_cell, series_kind};

/// Chart requested by the UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Scatter { x: String, y: String },
    Histogram { column: String },
    BoxPlot { column: String },
}

impl ChartSpec {
    /// Columns the spec references, in declaration order.
    pub fn referenced_columns(&self) -> Vec<&str> {
        match self {
            ChartSpec::Scatter { x, y } => vec![x, y],
            ChartSpec::Histogram { column } | ChartSpec::BoxPlot { column } => vec![column],
        }
    }
}

/// Per-cell data of one referenced column, tagged by declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ready-to-draw chart description: labels plus raw column data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum RenderableChart {
    Scatter {
        x_label: String,
        y_label: String,
        x: ColumnData,
        y: ColumnData,
    },
    Histogram {
        label: String,
        values: ColumnData,
    },
    BoxPlot {
        label: String,
        values: ColumnData,
    },
}

/// Builds [`RenderableChart`] descriptions from a table and a spec.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Validate the spec against the table and extract its column data.
    ///
    /// Every referenced column must exist ([`PrepError::ColumnNotFound`]);
    /// any declared kind is permitted. The table is never mutated.
    pub fn build(df: &DataFrame, spec: &ChartSpec) -> Result<RenderableChart> {
        for name in spec.referenced_columns() {
            if df.column(name).is_err() {
                return Err(PrepError::ColumnNotFound(name.to_string()));
            }
        }

        match spec {
            ChartSpec::Scatter { x, y } => Ok(RenderableChart::Scatter {
                x_label: x.clone(),
                y_label: y.clone(),
                x: Self::column_data(df, x)?,
                y: Self::column_data(df, y)?,
            }),
            ChartSpec::Histogram { column } => Ok(RenderableChart::Histogram {
                label: column.clone(),
                values: Self::column_data(df, column)?,
            }),
            ChartSpec::BoxPlot { column } => Ok(RenderableChart::BoxPlot {
                label: column.clone(),
                values: Self::column_data(df, column)?,
            }),
        }
    }

    fn column_data(df: &DataFrame, name: &str) -> Result<ColumnData> {
        let series = df.column(name)?.as_materialized_series();

        match series_kind(series) {
            ColumnKind::Numeric => {
                let float = series.cast(&DataType::Float64)?;
                let values: Vec<Option<f64>> = float.f64()?.into_iter().collect();
                Ok(ColumnData::Numeric(values))
            }
            ColumnKind::Text => {
                let mut values = Vec::with_capacity(series.len());
                for i in 0..series.len() {
                    let val = series.get(i)?;
                    if val.is_null() {
                        values.push(None);
                    } else {
                        values.push(Some(format_cell(&val)));
                    }
                }
                Ok(ColumnData::Text(values))
            }
        }
    }
}
