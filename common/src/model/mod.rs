pub mod analysis;
pub mod column;
pub mod dashboard;
pub mod datasource;
pub mod organization;
pub mod widget;
pub mod widget_config;

/// A single record of tabular data. Key order is the order in which the
/// keys were declared in the source, which the chart defaults rely on.
pub type Row = serde_json::Map<String, serde_json::Value>;
