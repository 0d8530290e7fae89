//! CSV loading for uploaded tables.
//!
//! Uploads arrive as raw bytes from the UI shell: UTF-8 comma-separated
//! text with a header row. Column types are sniffed by the polars reader
//! over a configurable window of leading rows; empty fields (and, when
//! enabled, common textual markers) parse as missing cells.

use std::io::Cursor;
use std::path::Path;

use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{PrepError, Result};
use crate::utils::MISSING_MARKERS;

/// Parse uploaded CSV bytes into a table.
///
/// Every parse problem — malformed rows, bad encoding, empty input, a
/// header with no data rows — surfaces as [`PrepError::LoadFailure`] with a
/// user-facing message. Nothing panics past this boundary. The no-upload
/// case is not a failure and is handled by the session, which holds the
/// distinct no-table-loaded state.
pub fn load_csv_bytes(bytes: &[u8], config: &SessionConfig) -> Result<DataFrame> {
    if bytes.is_empty() {
        return Err(PrepError::LoadFailure("uploaded file is empty".to_string()));
    }

    let mut parse_options = CsvParseOptions::default();
    if config.recognize_missing_markers {
        let markers = MISSING_MARKERS.iter().map(|m| (*m).into()).collect();
        parse_options = parse_options.with_null_values(Some(NullValues::AllColumns(markers)));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(config.infer_schema_rows))
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| PrepError::LoadFailure(e.to_string()))?;

    if df.width() == 0 {
        return Err(PrepError::LoadFailure(
            "no columns found in uploaded file".to_string(),
        ));
    }
    if df.height() == 0 {
        return Err(PrepError::LoadFailure(
            "uploaded file has a header but no data rows".to_string(),
        ));
    }

    info!(
        "Loaded table: {} rows x {} columns",
        df.height(),
        df.width()
    );
    debug!("Schema: {:?}", df.schema());

    Ok(df)
}

/// Read a CSV file from disk and parse it like an upload.
///
/// Convenience for shells that hand the core a path instead of bytes.
pub fn load_csv_file(path: impl AsRef<Path>, config: &SessionConfig) -> Result<DataFrame> {
    let bytes = std::fs::read(path.as_ref())?;
    load_csv_bytes(&bytes, config)
}
