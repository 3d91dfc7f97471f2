//! Client-side exports of a widget's resolved rows.

pub mod csv;

pub use csv::{export_file_name, rows_to_csv, CSV_MIME};
