//! Picks the concrete rows a widget renders.
//!
//! Order of precedence:
//!
//! 1. Non-empty inline `config.data`, returned verbatim.
//! 2. The data source named by `data_source_id`, if it is among the
//!    supplied sources and usable. An array payload yields its first
//!    [`DISPLAY_ROW_CAP`] rows. An object payload yields the first
//!    array-valued member (capped the same way), or the object itself as a
//!    single row when no member is an array.
//! 3. Nothing: an empty row-set, which the dispatcher renders as the
//!    "No data available" placeholder.

use crate::model::datasource::DataSource;
use crate::model::widget_config::WidgetConfig;
use crate::model::Row;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of rows taken from a data source for display.
pub const DISPLAY_ROW_CAP: usize = 100;

/// Where resolved rows came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum RowOrigin {
    Inline,
    DataSource(String),
    None,
}

/// Result of resolving a widget's rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub rows: Vec<Row>,
    pub origin: RowOrigin,
    /// The source held more rows than [`DISPLAY_ROW_CAP`].
    pub truncated: bool,
}

impl Resolution {
    fn empty() -> Self {
        Self {
            rows: Vec::new(),
            origin: RowOrigin::None,
            truncated: false,
        }
    }
}

/// Rows for a widget. Shorthand for `resolve(..).rows`.
pub fn resolve_rows(
    config: &WidgetConfig,
    data_source_id: Option<&str>,
    sources: &[DataSource],
) -> Vec<Row> {
    resolve(config, data_source_id, sources).rows
}

/// Resolves rows and reports their origin and whether the cap cut them.
pub fn resolve(
    config: &WidgetConfig,
    data_source_id: Option<&str>,
    sources: &[DataSource],
) -> Resolution {
    if let Some(rows) = config.inline_rows() {
        return Resolution {
            rows: rows.to_vec(),
            origin: RowOrigin::Inline,
            truncated: false,
        };
    }

    let Some(id) = data_source_id else {
        return Resolution::empty();
    };
    let Some(source) = sources.iter().find(|s| s.id == id) else {
        debug!("data source {} not among the {} supplied", id, sources.len());
        return Resolution::empty();
    };
    if !source.is_usable() {
        debug!("data source {} is {} without usable payload", id, source.status.as_str());
        return Resolution::empty();
    }

    match source.raw_payload.as_ref().map(rows_from_payload) {
        Some(Some((rows, truncated))) => {
            if truncated {
                debug!("data source {} truncated to {} rows", id, DISPLAY_ROW_CAP);
            }
            Resolution {
                rows,
                origin: RowOrigin::DataSource(id.to_string()),
                truncated,
            }
        }
        _ => Resolution::empty(),
    }
}

/// Extracts capped rows from a raw payload, or `None` when the payload has
/// no row shape at all.
pub fn rows_from_payload(payload: &Value) -> Option<(Vec<Row>, bool)> {
    match payload {
        Value::Array(items) => Some(capped(items)),
        Value::Object(map) => {
            let nested = map.values().find_map(|v| match v {
                Value::Array(items) => Some(items),
                _ => None,
            });
            match nested {
                Some(items) => Some(capped(items)),
                None => Some((vec![map.clone()], false)),
            }
        }
        _ => None,
    }
}

/// First [`DISPLAY_ROW_CAP`] entries; entries that are not objects are
/// skipped since they cannot be keyed by column.
fn capped(items: &[Value]) -> (Vec<Row>, bool) {
    let rows = items
        .iter()
        .take(DISPLAY_ROW_CAP)
        .filter_map(|item| item.as_object().cloned())
        .collect();
    (rows, items.len() > DISPLAY_ROW_CAP)
}
