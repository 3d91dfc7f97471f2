//! CSV and TSV parsing.

use crate::ingest::IngestError;
use common::model::Row;
use csv::{ReaderBuilder, Trim};
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::HashSet;
use std::sync::LazyLock;

static HEADER_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{N}\s\-_.()%/#]+$").expect("header pattern compiles")
});

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// The candidate delimiter occurring most often in the header line.
pub fn detect_delimiter(header_line: &str) -> u8 {
    CANDIDATE_DELIMITERS
        .iter()
        .copied()
        .max_by_key(|&d| header_line.bytes().filter(|&b| b == d).count())
        .filter(|&d| header_line.as_bytes().contains(&d))
        .unwrap_or(b',')
}

/// Checks header cells: non-empty, readable names, no repeats.
pub fn validate_header(cells: &[String]) -> Result<(), IngestError> {
    let mut seen = HashSet::new();
    for (index, cell) in cells.iter().enumerate() {
        if cell.is_empty() {
            return Err(IngestError::EmptyHeaderCell(index + 1));
        }
        if !HEADER_CELL.is_match(cell) {
            return Err(IngestError::InvalidHeaderCell(cell.clone()));
        }
        if !seen.insert(cell.as_str()) {
            return Err(IngestError::DuplicateHeaderCell(cell.clone()));
        }
    }
    Ok(())
}

/// Parses a delimited file into a JSON array of row objects. The delimiter
/// is detected from the header unless given.
pub fn parse(bytes: &[u8], delimiter: Option<u8>) -> Result<Value, IngestError> {
    let text = std::str::from_utf8(bytes).map_err(|_| IngestError::NotUtf8)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text.lines().next().unwrap_or_default();
    if header_line.trim().is_empty() {
        return Err(IngestError::Empty);
    }
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(header_line));

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.replace('\u{00A0}', " ").trim().to_string())
        .collect();
    validate_header(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let mut row = Row::new();
        for (index, header) in headers.iter().enumerate() {
            row.insert(header.clone(), typed_cell(record.get(index).unwrap_or_default()));
        }
        rows.push(Value::Object(row));
    }
    Ok(Value::Array(rows))
}

/// Plain numbers become JSON numbers, empty cells null, everything else
/// stays text. Formatted amounts such as `$1,200` stay text.
pub fn typed_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Some(n) = cell
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .and_then(Number::from_f64)
    {
        return Value::Number(n);
    }
    Value::String(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_rows_in_header_order_with_typed_cells() {
        let payload = parse(b"month,sales,note\nJan,100,\nFeb,150.5,\"late, again\"\n", None)
            .unwrap();
        assert_eq!(
            payload,
            json!([
                {"month": "Jan", "sales": 100, "note": null},
                {"month": "Feb", "sales": 150.5, "note": "late, again"}
            ])
        );
        let first = payload[0].as_object().unwrap();
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["month", "sales", "note"]);
    }

    #[test]
    fn detects_semicolons_and_tabs() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a\tb"), b'\t');
        assert_eq!(detect_delimiter("single"), b',');
        let payload = parse(b"city;visits\nOslo;3\n", None).unwrap();
        assert_eq!(payload, json!([{"city": "Oslo", "visits": 3}]));
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(matches!(
            parse(b"a,,c\n1,2,3\n", None),
            Err(IngestError::EmptyHeaderCell(2))
        ));
        assert!(matches!(
            parse(b"a,b=c\n1,2\n", None),
            Err(IngestError::InvalidHeaderCell(_))
        ));
        assert!(matches!(
            parse(b"a,a\n1,2\n", None),
            Err(IngestError::DuplicateHeaderCell(_))
        ));
        assert!(matches!(parse(b"", None), Err(IngestError::Empty)));
        assert!(matches!(parse(&[0xff, 0xfe], None), Err(IngestError::NotUtf8)));
    }

    #[test]
    fn short_records_and_blank_lines_are_tolerated() {
        let payload = parse(b"a,b\n1\n,\n2,3\n", None).unwrap();
        assert_eq!(payload, json!([{"a": 1, "b": null}, {"a": 2, "b": 3}]));
    }

    #[test]
    fn formatted_amounts_stay_text() {
        assert_eq!(typed_cell("$1,200"), json!("$1,200"));
        assert_eq!(typed_cell("-4"), json!(-4));
        assert_eq!(typed_cell("NaN"), json!("NaN"));
    }
}
