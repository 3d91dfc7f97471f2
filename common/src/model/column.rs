use serde::{Deserialize, Serialize};

/// The data type inferred for a column of an imported data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Currency,
    Email,
    Date,
}

impl ColumnType {
    /// Whether values of this column can be plotted on a numeric axis.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Currency)
    }
}

/// Summary of one column, computed when a data source is ingested or
/// re-analyzed.
///
/// Profiles are stored inside [`DataSourceMetadata`](super::datasource::DataSourceMetadata)
/// and feed both the column picker of the widget builder and the
/// suggestion service that proposes chart types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    /// Column name as it appears in the first row.
    pub name: String,
    /// Type inferred from the majority of non-empty cells.
    pub column_type: ColumnType,
    /// Number of rows where the cell is present and not empty.
    pub non_empty: usize,
    /// First non-empty value, shown to the user as an example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}
