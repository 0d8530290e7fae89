//! Data Preprocessing & Visualization Core
//!
//! The non-visual half of an interactive data-preparation tool, built with
//! Rust and Polars.
//!
//! # Overview
//!
//! This library provides the table-side logic behind a UI shell:
//!
//! - **Loading**: CSV uploads parsed into typed tables, with per-column
//!   type sniffing and missing-marker recognition
//! - **Inspection**: shape, declared column types, null statistics, and
//!   preview samples
//! - **Cleaning**: null handling (remove / fill with mean / fill with
//!   median) scoped to selected columns, plus IQR outlier detection and
//!   removal
//! - **Visualization**: scatter, histogram, and box-plot descriptions the
//!   rendering collaborator turns into pixels
//!
//! Stages run in a fixed order over one session-owned table; nothing here
//! draws, persists, or talks to the network.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vizprep_processing::{
//!     ChartSpec, NullPolicy, PrepSession, SessionConfig, SessionRequest,
//! };
//!
//! // One session per user, owning its table exclusively
//! let mut session = PrepSession::builder()
//!     .config(SessionConfig::builder().infer_schema_rows(1000).build()?)
//!     .build()?;
//!
//! // Upload bytes come from the UI shell
//! session.load(Some(&upload_bytes))?;
//!
//! // Option 1: drive the stages one widget at a time
//! let overview = session.describe()?;
//! session.handle_nulls(&selection, NullPolicy::FillWithMedian)?;
//! let report = session.detect_outliers("age")?;
//! session.remove_outliers(&report)?;
//! let chart = session.build_chart(&ChartSpec::Histogram { column: "age".into() })?;
//!
//! // Option 2: one full re-run per interaction
//! let outcome = session.run(&SessionRequest {
//!     selected_columns: vec!["age".into()],
//!     null_policy: NullPolicy::Remove,
//!     detect_outliers_in: Some("age".into()),
//!     remove_outliers: true,
//!     chart: Some(ChartSpec::BoxPlot { column: "age".into() }),
//! })?;
//!
//! println!("{} -> {} rows", outcome.rows_before, outcome.rows_after);
//! for step in &outcome.processing_steps {
//!     println!("  {}", step);
//! }
//! ```
//!
//! # Error Handling
//!
//! Every failure is a [`PrepError`] with a stable [`PrepError::error_code`]
//! and a `{code, message}` `Serialize` impl, so shells can forward errors
//! over IPC and render them directly. Load failures short-circuit the whole
//! run; cleaning and chart errors are per-operation and never discard
//! already-cleaned table state. Undefined statistics (mean of an all-null
//! column) are NaN values, not errors.

// Core modules
pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod profiler;
pub mod session;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::{ChartBuilder, ChartSpec, ColumnData, RenderableChart};
pub use cleaner::DataCleaner;
pub use config::{ConfigValidationError, NullPolicy, SessionConfig, SessionConfigBuilder};
pub use error::{PrepError, Result as PrepResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use loader::{load_csv_bytes, load_csv_file};
pub use profiler::TableInspector;
pub use session::{OutlierDetector, PrepSession, PrepSessionBuilder};
pub use types::{
    ColumnSummary, OutlierReport, SessionOutcome, SessionRequest, TableSummary,
};
pub use utils::{ColumnKind, column_kind, is_missing_marker, is_numeric_dtype, series_kind};
