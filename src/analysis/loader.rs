//! Trace file loading and client label normalization.
//!
//! The trace is a headerless delimiter-separated file with three positional
//! columns: timestamp in seconds, a `Client-<id>` label, and a byte count.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use super::types::TraceRecord;

/// Client labels in the trace carry this prefix before the numeric ID.
pub const CLIENT_LABEL_PREFIX: &str = "Client-";

/// Errors raised while loading a trace file. Row numbers are 1-based.
#[derive(Debug, Error)]
pub enum TraceLoadError {
    #[error("failed to open trace file {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read trace row {row}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("trace row {row}: expected 3 columns, found {found}")]
    ColumnCount { row: usize, found: usize },

    #[error("trace row {row}: invalid timestamp {value:?}")]
    Timestamp { row: usize, value: String },

    #[error("trace row {row}: client label {value:?} lacks the Client- prefix")]
    ClientLabel { row: usize, value: String },

    #[error("trace row {row}: invalid byte count {value:?}")]
    Bytes { row: usize, value: String },

    #[error("trace file {path} contains no records")]
    Empty { path: String },
}

/// Strip the `Client-` prefix from a label and parse the remaining ID.
///
/// Returns None for labels without the prefix or with a non-numeric suffix.
pub fn parse_client_label(label: &str) -> Option<u32> {
    label.strip_prefix(CLIENT_LABEL_PREFIX)?.parse().ok()
}

/// Load all records from a trace file, in file order.
///
/// The file must be headerless; fields are trimmed before conversion. An
/// empty file is an error, since nothing downstream is meaningful without
/// samples.
pub fn load_trace(path: &Path) -> Result<Vec<TraceRecord>, TraceLoadError> {
    let file = File::open(path).map_err(|source| TraceLoadError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(file);

    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|source| TraceLoadError::Csv { row, source })?;

        if record.len() != 3 {
            return Err(TraceLoadError::ColumnCount {
                row,
                found: record.len(),
            });
        }

        let timestamp: f64 = record[0].parse().map_err(|_| TraceLoadError::Timestamp {
            row,
            value: record[0].to_string(),
        })?;

        let client_id = parse_client_label(&record[1]).ok_or_else(|| TraceLoadError::ClientLabel {
            row,
            value: record[1].to_string(),
        })?;

        let bytes: u64 = record[2].parse().map_err(|_| TraceLoadError::Bytes {
            row,
            value: record[2].to_string(),
        })?;

        records.push(TraceRecord {
            timestamp,
            client_id,
            bytes,
        });
    }

    if records.is_empty() {
        return Err(TraceLoadError::Empty {
            path: path.display().to_string(),
        });
    }

    log::debug!("Loaded {} trace records from {}", records.len(), path.display());

    Ok(records)
}
