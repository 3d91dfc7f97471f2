use crate::model::column::ColumnProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, parsed payload the user imported.
///
/// `raw_payload` is either an array of row objects or a single object whose
/// values may contain such an array. Only sources in the
/// [`DataSourceStatus::Ready`] state with a non-empty payload are used when
/// widgets resolve their rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: String, // UUID
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    pub name: String,
    pub kind: DataSourceKind,
    pub format: FileFormat,
    #[serde(default)]
    pub raw_payload: Option<Value>,
    #[serde(default)]
    pub metadata: DataSourceMetadata,
    pub status: DataSourceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl DataSource {
    /// Whether the payload can feed a widget: ready and carrying data.
    pub fn is_usable(&self) -> bool {
        if self.status != DataSourceStatus::Ready {
            return false;
        }
        match &self.raw_payload {
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            _ => false,
        }
    }
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSourceKind {
    File,
    Url,
    GoogleDrive,
    Onedrive,
    Notion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Tsv,
    Json,
    Xlsx,
    #[serde(other)]
    Other,
}

impl FileFormat {
    /// Guesses the format from a file name or URL path.
    pub fn from_name(name: &str) -> FileFormat {
        let lower = name.to_ascii_lowercase();
        let stem = lower.split(['?', '#']).next().unwrap_or_default();
        if stem.ends_with(".csv") {
            FileFormat::Csv
        } else if stem.ends_with(".tsv") {
            FileFormat::Tsv
        } else if stem.ends_with(".json") {
            FileFormat::Json
        } else if stem.ends_with(".xlsx") {
            FileFormat::Xlsx
        } else {
            FileFormat::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceStatus {
    Pending,
    Processing,
    Ready,
    Error,
}

impl DataSourceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSourceStatus::Pending => "pending",
            DataSourceStatus::Processing => "processing",
            DataSourceStatus::Ready => "ready",
            DataSourceStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceMetadata {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profile: Vec<ColumnProfile>,
}
