//! Column type inference and summary statistics.
//!
//! Columns are profiled independently, so the work is spread over the rayon
//! pool one column per task.

use chrono::{DateTime, NaiveDate};
use common::chart::value::{as_number, display, parse_number};
use common::model::column::{ColumnProfile, ColumnType};
use common::model::Row;
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

pub fn profile_columns(columns: &[String], rows: &[Row]) -> Vec<ColumnProfile> {
    columns
        .par_iter()
        .map(|column| profile_column(column, rows))
        .collect()
}

fn profile_column(name: &str, rows: &[Row]) -> ColumnProfile {
    let cells: Vec<&Value> = rows
        .iter()
        .filter_map(|row| row.get(name))
        .filter(|value| !is_blank(value))
        .collect();

    let column_type = infer_type(&cells);
    let numbers: Vec<f64> = if column_type.is_numeric() {
        cells.iter().filter_map(|value| as_number(value)).collect()
    } else {
        Vec::new()
    };
    let mean = (!numbers.is_empty()).then(|| numbers.iter().sum::<f64>() / numbers.len() as f64);

    ColumnProfile {
        name: name.to_string(),
        column_type,
        non_empty: cells.len(),
        sample: cells.first().map(|value| display(value)),
        min: numbers.iter().copied().reduce(f64::min),
        max: numbers.iter().copied().reduce(f64::max),
        mean,
    }
}

/// The narrowest type every non-empty cell satisfies.
pub fn infer_type(cells: &[&Value]) -> ColumnType {
    if cells.is_empty() {
        return ColumnType::Text;
    }
    let texts: Vec<String> = cells.iter().map(|value| display(value)).collect();
    if cells.iter().all(|value| value.is_number()) {
        return ColumnType::Number;
    }
    if texts.iter().all(|t| EMAIL.is_match(t)) {
        return ColumnType::Email;
    }
    if texts.iter().all(|t| parse_number(t).is_some()) {
        if texts.iter().any(|t| t.contains(CURRENCY_SYMBOLS)) {
            return ColumnType::Currency;
        }
        return ColumnType::Number;
    }
    if texts.iter().all(|t| is_date(t)) {
        return ColumnType::Date;
    }
    ColumnType::Text
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_date(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(text, format).is_ok())
}
