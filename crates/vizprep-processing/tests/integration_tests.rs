//! Integration tests for the preprocessing core.
//!
//! These tests verify end-to-end behavior of a session using fixture CSVs,
//! exercising the fixed stage order the UI shell drives.

use std::path::PathBuf;

use polars::prelude::*;
use vizprep_processing::{
    ChartSpec, ColumnData, ColumnKind, NullPolicy, PrepError, PrepSession, RenderableChart,
    SessionConfig, SessionRequest,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Initialize tracing once so `RUST_LOG=debug cargo test` shows stage logs.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_bytes(filename: &str) -> Vec<u8> {
    std::fs::read(fixtures_path().join(filename)).expect("Failed to read fixture")
}

fn session_with(filename: &str) -> PrepSession {
    init_tracing();
    let mut session = PrepSession::builder().build().expect("Failed to build session");
    session
        .load(Some(&fixture_bytes(filename)))
        .expect("Failed to load fixture");
    session
}

// ============================================================================
// Load + Inspect
// ============================================================================

#[test]
fn test_load_and_describe_fixture() {
    let session = session_with("people.csv");
    let summary = session.describe().unwrap();

    assert_eq!(summary.row_count, 6);
    assert_eq!(summary.column_count, 3);
    assert_eq!(summary.column("age").unwrap().kind, ColumnKind::Numeric);
    assert_eq!(summary.column("score").unwrap().kind, ColumnKind::Numeric);
    assert_eq!(summary.column("city").unwrap().kind, ColumnKind::Text);
    assert_eq!(summary.column("age").unwrap().null_count, 1);
    assert_eq!(summary.column("score").unwrap().null_count, 1);
}

#[test]
fn test_textual_markers_parse_as_nulls() {
    let session = session_with("markers.csv");
    let summary = session.describe().unwrap();

    // "NA" and "null" cells are missing, so the column sniffs as numeric
    let value = summary.column("value").unwrap();
    assert_eq!(value.kind, ColumnKind::Numeric);
    assert_eq!(value.null_count, 2);
}

#[test]
fn test_malformed_upload_short_circuits() {
    let mut session = PrepSession::builder().build().unwrap();

    let result = session.load(Some(b"a,b\n1,2\n3,4,5,6\n"));
    assert!(matches!(result, Err(PrepError::LoadFailure(_))));

    // No table was produced; later stages never see data
    assert!(matches!(session.describe(), Err(PrepError::NoTableLoaded)));
    assert!(matches!(
        session.detect_outliers("a"),
        Err(PrepError::NoTableLoaded)
    ));
}

// ============================================================================
// Null Handling Properties
// ============================================================================

#[test]
fn test_remove_policy_clears_selection_and_shrinks_all_columns() {
    let mut session = session_with("people.csv");
    let selection = vec!["age".to_string(), "score".to_string()];

    session
        .handle_nulls(&selection, NullPolicy::Remove)
        .unwrap();

    let df = session.table().unwrap();
    // No missing cells remain in the selected columns
    assert_eq!(df.column("age").unwrap().null_count(), 0);
    assert_eq!(df.column("score").unwrap().null_count(), 0);
    // Every column shrank by the same count
    for col in df.get_columns() {
        assert_eq!(col.len(), 4);
    }
}

#[test]
fn test_fill_is_identity_on_fully_populated_table() {
    let mut session = session_with("no_nulls.csv");
    let before = session.table().unwrap().clone();

    session
        .handle_nulls(
            &["x".to_string(), "y".to_string()],
            NullPolicy::FillWithMean,
        )
        .unwrap();

    let after = session.table().unwrap();
    assert_eq!(after.height(), before.height());
    for name in ["x", "y"] {
        let before_col = before.column(name).unwrap().f64().unwrap();
        let after_col = after.column(name).unwrap().f64().unwrap();
        for (b, a) in before_col.into_iter().zip(after_col.into_iter()) {
            assert_eq!(b, a);
        }
    }
}

#[test]
fn test_fill_with_mean_never_changes_row_count() {
    let mut session = session_with("people.csv");

    session
        .handle_nulls(&["score".to_string()], NullPolicy::FillWithMean)
        .unwrap();

    let df = session.table().unwrap();
    assert_eq!(df.height(), 6);
    assert_eq!(df.column("score").unwrap().null_count(), 0);
    // Mean of [5.0, 6.0, 7.0, 8.0, 6.5] = 6.5
    let filled = df
        .column("score")
        .unwrap()
        .get(1)
        .unwrap()
        .try_extract::<f64>()
        .unwrap();
    assert!((filled - 6.5).abs() < 1e-9);
}

// ============================================================================
// Outlier Properties
// ============================================================================

#[test]
fn test_detect_is_idempotent_over_unchanged_table() {
    let session = session_with("people.csv");

    let first = session.detect_outliers("age").unwrap();
    let second = session.detect_outliers("age").unwrap();

    assert_eq!(first.indices, second.indices);
    assert_eq!(first.lower_fence, second.lower_fence);
    assert_eq!(first.upper_fence, second.upper_fence);
}

#[test]
fn test_remove_leaves_no_row_satisfying_outlier_predicate() {
    let mut session = session_with("people.csv");

    let report = session.detect_outliers("age").unwrap();
    // Q1=11, Q3=13, IQR=2 -> fences [8, 16] -> the age-90 row
    assert_eq!(report.lower_fence, 8.0);
    assert_eq!(report.upper_fence, 16.0);
    assert_eq!(report.len(), 1);

    session.remove_outliers(&report).unwrap();

    let ages = session
        .table()
        .unwrap()
        .column("age")
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap();
    let ages = ages.f64().unwrap();
    for val in ages.into_iter().flatten() {
        assert!(val >= report.lower_fence && val <= report.upper_fence);
    }
}

// ============================================================================
// Chart Properties
// ============================================================================

#[test]
fn test_scatter_on_missing_column_leaves_table_unchanged() {
    let session = session_with("people.csv");
    let before_height = session.table().unwrap().height();

    let result = session.build_chart(&ChartSpec::Scatter {
        x: "age".to_string(),
        y: "weight".to_string(),
    });

    assert!(matches!(result, Err(PrepError::ColumnNotFound(c)) if c == "weight"));
    assert_eq!(session.table().unwrap().height(), before_height);
}

#[test]
fn test_chart_carries_cleaned_data() {
    let mut session = session_with("people.csv");
    session
        .handle_nulls(&["score".to_string()], NullPolicy::Remove)
        .unwrap();

    let chart = session
        .build_chart(&ChartSpec::Histogram {
            column: "score".to_string(),
        })
        .unwrap();

    match chart {
        RenderableChart::Histogram { label, values } => {
            assert_eq!(label, "score");
            match values {
                ColumnData::Numeric(v) => {
                    assert_eq!(v.len(), 5);
                    assert!(v.iter().all(|x| x.is_some()));
                }
                other => panic!("expected numeric data, got {:?}", other),
            }
        }
        other => panic!("expected histogram, got {:?}", other),
    }
}

// ============================================================================
// Full Interaction Re-Runs
// ============================================================================

#[test]
fn test_full_interaction_from_json_request() {
    // The UI shell serializes widget state; the core replays it
    let request: SessionRequest = serde_json::from_str(
        r#"{
            "selected_columns": ["score"],
            "null_policy": "fill_with_median",
            "detect_outliers_in": "age",
            "remove_outliers": true,
            "chart": {"kind": "box_plot", "column": "age"}
        }"#,
    )
    .unwrap();

    let mut session = session_with("people.csv");
    let outcome = session.run(&request).unwrap();

    assert_eq!(outcome.rows_before, 6);
    // The age-90 outlier row is removed; the null-age row stays
    assert_eq!(outcome.rows_after, 5);
    assert_eq!(outcome.outliers.as_ref().unwrap().len(), 1);
    assert!(matches!(
        outcome.chart,
        Some(RenderableChart::BoxPlot { .. })
    ));
    assert!(!outcome.processing_steps.is_empty());
}

#[test]
fn test_interactions_are_independent_rerun() {
    let mut session = session_with("people.csv");

    // Aggressive first interaction
    session
        .run(&SessionRequest {
            selected_columns: vec!["age".to_string(), "score".to_string()],
            null_policy: NullPolicy::Remove,
            detect_outliers_in: Some("age".to_string()),
            remove_outliers: true,
            chart: None,
        })
        .unwrap();

    // Second interaction with no cleaning starts from the upload again
    let outcome = session.run(&SessionRequest::default()).unwrap();
    assert_eq!(outcome.rows_after, 6);
}

#[test]
fn test_custom_config_disables_markers() {
    let config = SessionConfig::builder()
        .recognize_missing_markers(false)
        .build()
        .unwrap();
    let mut session = PrepSession::builder().config(config).build().unwrap();
    session.load(Some(&fixture_bytes("markers.csv"))).unwrap();

    // "NA"/"null" stay values, so the column is text now
    let summary = session.describe().unwrap();
    let value = summary.column("value").unwrap();
    assert_eq!(value.kind, ColumnKind::Text);
    assert_eq!(value.null_count, 0);
}
