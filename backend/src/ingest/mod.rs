//! Turning uploaded or fetched bytes into a data-source payload.
//!
//! CSV/TSV files become an array of row objects whose keys follow the header
//! order; JSON files are stored as they are once they are known to contain
//! rows. Either way the payload is profiled so the source's metadata lists
//! its columns and their inferred types.

pub mod delimited;
pub mod json;
pub mod profile;

use common::model::datasource::{DataSourceMetadata, FileFormat};
use common::model::Row;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("the file is empty")]
    Empty,
    #[error("header cell {0} is empty")]
    EmptyHeaderCell(usize),
    #[error("header cell {0:?} may only contain letters, digits, spaces and - _ . ( ) % / #")]
    InvalidHeaderCell(String),
    #[error("header cell {0:?} appears more than once")]
    DuplicateHeaderCell(String),
    #[error("the file is not valid UTF-8")]
    NotUtf8,
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("the JSON document holds no row objects")]
    NotTabular,
    #[error("{0:?} files are not supported; upload CSV, TSV or JSON")]
    UnsupportedFormat(FileFormat),
}

/// A payload ready to store, with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub payload: Value,
    pub metadata: DataSourceMetadata,
}

/// Parses `bytes` in the given format.
pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Parsed, IngestError> {
    let payload = match format {
        FileFormat::Csv => delimited::parse(bytes, None)?,
        FileFormat::Tsv => delimited::parse(bytes, Some(b'\t'))?,
        FileFormat::Json => json::parse(bytes)?,
        other => return Err(IngestError::UnsupportedFormat(other)),
    };
    let metadata = metadata_for(&payload);
    Ok(Parsed { payload, metadata })
}

/// Every row of a payload, uncapped: an array's objects, the first array
/// nested in an object, or the object itself as a single row.
pub fn all_rows(payload: &Value) -> Vec<Row> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.values().find_map(Value::as_array) {
            Some(items) => items,
            None => return vec![map.clone()],
        },
        _ => return Vec::new(),
    };
    items.iter().filter_map(|item| item.as_object().cloned()).collect()
}

/// Row and column counts plus a per-column profile.
pub fn metadata_for(payload: &Value) -> DataSourceMetadata {
    let rows = all_rows(payload);
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();
    DataSourceMetadata {
        row_count: rows.len(),
        column_count: columns.len(),
        profile: profile::profile_columns(&columns, &rows),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_counts_every_row() {
        let rows: Vec<Value> = (0..150).map(|i| json!({"n": i, "label": "x"})).collect();
        let metadata = metadata_for(&Value::Array(rows));
        assert_eq!(metadata.row_count, 150);
        assert_eq!(metadata.columns, vec!["n", "label"]);
        assert_eq!(metadata.column_count, 2);
    }

    #[test]
    fn nested_arrays_and_single_objects_count_as_rows() {
        assert_eq!(all_rows(&json!({"meta": 1, "items": [{"a": 1}, {"a": 2}]})).len(), 2);
        assert_eq!(all_rows(&json!({"a": 1})).len(), 1);
        assert!(all_rows(&json!("text")).is_empty());
    }

    #[test]
    fn spreadsheets_are_rejected() {
        assert!(matches!(
            parse(b"PK", FileFormat::Xlsx),
            Err(IngestError::UnsupportedFormat(FileFormat::Xlsx))
        ));
    }
}
