use crate::chart::value::display;
use crate::model::Row;

pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Serializes rows as CSV.
///
/// The header is the first row's keys in declaration order; later rows are
/// read by those keys, so extra keys are dropped and missing ones export as
/// empty cells. A cell is quoted only when it contains a comma. Lines are
/// joined with `\n` and there is no trailing newline. No rows gives an empty
/// string.
pub fn rows_to_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let columns: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| escape(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| row.get(c.as_str()).map(display).unwrap_or_default())
            .map(|cell| escape(&cell))
            .collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

/// `<title>.csv` with anything but letters, digits, `-` and `_` replaced.
pub fn export_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "widget.csv".to_string()
    } else {
        format!("{}.csv", stem)
    }
}

fn escape(cell: &str) -> String {
    if cell.contains(',') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
