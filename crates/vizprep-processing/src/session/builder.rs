//! The per-session driver behind the UI shell.
//!
//! A [`PrepSession`] owns its table exclusively for the lifetime of one
//! user session; no other stage ever aliases it, so in-place mutation by
//! the cleaner is safe without synchronization. Every interaction triggers
//! one full re-run of the fixed stage order over the session's upload:
//! Loader -> Inspector -> Cleaner -> Visualizer.

use chrono::Utc;
use polars::prelude::*;
use tracing::{debug, error, info};

use crate::charts::{ChartBuilder, ChartSpec, RenderableChart};
use crate::cleaner::DataCleaner;
use crate::config::{NullPolicy, SessionConfig};
use crate::error::{PrepError, Result};
use crate::loader;
use crate::profiler::TableInspector;
use crate::session::outliers::OutlierDetector;
use crate::types::{OutlierReport, SessionOutcome, SessionRequest, TableSummary};

/// One user's preprocessing session.
///
/// Use [`PrepSession::builder()`] to create a session with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use vizprep_processing::{NullPolicy, PrepSession};
///
/// let mut session = PrepSession::builder().build()?;
/// session.load(Some(&upload_bytes))?;
///
/// let overview = session.describe()?;
/// session.handle_nulls(&selection, NullPolicy::FillWithMean)?;
///
/// let report = session.detect_outliers("age")?;
/// session.remove_outliers(&report)?;
/// ```
pub struct PrepSession {
    config: SessionConfig,
    /// The upload as loaded, untouched by cleaning. `run()` re-runs from here.
    raw: Option<DataFrame>,
    /// The working table the stages read and mutate.
    table: Option<DataFrame>,
    processing_steps: Vec<String>,
}

// A GUI shell moves the session to a background thread for large uploads
static_assertions::assert_impl_all!(PrepSession: Send);

impl PrepSession {
    /// Create a new session builder.
    pub fn builder() -> PrepSessionBuilder {
        PrepSessionBuilder::default()
    }

    /// The session's configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Accept an upload, or the no-file case.
    ///
    /// `None` is the sentinel for "no file chosen yet": the session simply
    /// holds no table, which is distinct from a load failure. A failed
    /// parse discards any previously loaded table so no later stage can run
    /// against stale data, and the error is surfaced verbatim.
    ///
    /// Returns whether the session now holds a table.
    pub fn load(&mut self, upload: Option<&[u8]>) -> Result<bool> {
        self.processing_steps.clear();

        let Some(bytes) = upload else {
            self.raw = None;
            self.table = None;
            debug!("No upload, session holds no table");
            return Ok(false);
        };

        match loader::load_csv_bytes(bytes, &self.config) {
            Ok(df) => {
                self.raw = Some(df.clone());
                self.table = Some(df);
                Ok(true)
            }
            Err(e) => {
                self.raw = None;
                self.table = None;
                error!("Load failed: {}", e);
                Err(e)
            }
        }
    }

    /// Whether the session currently holds a table.
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    /// The current working table.
    pub fn table(&self) -> Result<&DataFrame> {
        self.table.as_ref().ok_or(PrepError::NoTableLoaded)
    }

    /// Inspector report over the current table.
    pub fn describe(&self) -> Result<TableSummary> {
        TableInspector::describe(self.table()?, self.config.max_sample_values)
            .map_err(|e| PrepError::InspectionFailed(e.to_string()))
    }

    /// Apply a null policy to the selected columns of the current table.
    pub fn handle_nulls(&mut self, columns: &[String], policy: NullPolicy) -> Result<()> {
        let table = self.table.as_mut().ok_or(PrepError::NoTableLoaded)?;
        DataCleaner::handle_nulls(table, columns, policy, &mut self.processing_steps)
    }

    /// Flag IQR outliers in a numeric column of the current table.
    pub fn detect_outliers(&self, column: &str) -> Result<OutlierReport> {
        OutlierDetector::detect(self.table()?, column)
    }

    /// Remove the rows a detection report flagged. Returns rows removed.
    pub fn remove_outliers(&mut self, report: &OutlierReport) -> Result<usize> {
        let table = self.table.as_mut().ok_or(PrepError::NoTableLoaded)?;
        OutlierDetector::remove(table, report, &mut self.processing_steps)
    }

    /// Describe a chart over the current table.
    pub fn build_chart(&self, spec: &ChartSpec) -> Result<RenderableChart> {
        ChartBuilder::build(self.table()?, spec)
    }

    /// Audit trail of every mutation since the last load or `run()`.
    pub fn processing_steps(&self) -> &[String] {
        &self.processing_steps
    }

    /// One full fixed-order re-run driven by one bundle of UI inputs.
    ///
    /// Resets the working table to the raw upload, then runs
    /// Inspector -> Cleaner (nulls, then outliers) -> Visualizer. Requires
    /// a prior successful [`load`](Self::load); a session without a table
    /// fails with [`PrepError::NoTableLoaded`] before any stage runs.
    pub fn run(&mut self, request: &SessionRequest) -> Result<SessionOutcome> {
        let raw = self.raw.as_ref().ok_or(PrepError::NoTableLoaded)?;
        let rows_before = raw.height();
        self.table = Some(raw.clone());
        self.processing_steps.clear();

        info!("Re-running stages over {} rows", rows_before);

        // Inspector: overview of the table as uploaded
        let summary = self.describe()?;

        // Cleaner: null handling over the selection
        self.handle_nulls(&request.selected_columns, request.null_policy)?;

        // Cleaner: outlier detection, optionally followed by removal
        let outliers = match &request.detect_outliers_in {
            Some(column) => {
                let report = self.detect_outliers(column)?;
                if request.remove_outliers {
                    self.remove_outliers(&report)?;
                }
                Some(report)
            }
            None => None,
        };

        // Visualizer: chart over the cleaned table
        let chart = match &request.chart {
            Some(spec) => Some(self.build_chart(spec)?),
            None => None,
        };

        let rows_after = self.table()?.height();
        info!("Re-run complete: {} -> {} rows", rows_before, rows_after);

        Ok(SessionOutcome {
            summary,
            outliers,
            chart,
            processing_steps: self.processing_steps.clone(),
            rows_before,
            rows_after,
            completed_at: Utc::now().to_rfc3339(),
        })
    }
}

/// Builder for [`PrepSession`] with fluent API.
#[derive(Debug, Default)]
pub struct PrepSessionBuilder {
    config: Option<SessionConfig>,
}

impl PrepSessionBuilder {
    /// Set the session configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the session.
    pub fn build(self) -> Result<PrepSession> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| PrepError::InvalidConfig(e.to_string()))?;

        Ok(PrepSession {
            config,
            raw: None,
            table: None,
            processing_steps: Vec::new(),
        })
    }
}
