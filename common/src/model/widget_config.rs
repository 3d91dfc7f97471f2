//! Persisted widget configuration.
//!
//! `WidgetConfig` is the JSON blob stored with every widget. All fields are
//! optional so that partial layer overrides use the same type; unknown keys
//! are kept in `extra` so a config written by a newer client survives a
//! round-trip through this one.

use crate::model::Row;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Chart type tag of a widget or layer.
///
/// Unrecognized tags are preserved in [`ChartType::Other`] so they
/// round-trip and render as an "Unsupported chart type" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartType {
    Bar,
    Line,
    Area,
    Pie,
    Donut,
    Gauge,
    Funnel,
    Radar,
    Scatter,
    Stat,
    Table,
    Other(String),
}

impl ChartType {
    /// Every supported tag, in builder menu order.
    pub const SUPPORTED: [ChartType; 11] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Area,
        ChartType::Pie,
        ChartType::Donut,
        ChartType::Gauge,
        ChartType::Funnel,
        ChartType::Radar,
        ChartType::Scatter,
        ChartType::Stat,
        ChartType::Table,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::Pie => "pie",
            ChartType::Donut => "donut",
            ChartType::Gauge => "gauge",
            ChartType::Funnel => "funnel",
            ChartType::Radar => "radar",
            ChartType::Scatter => "scatter",
            ChartType::Stat => "stat",
            ChartType::Table => "table",
            ChartType::Other(tag) => tag,
        }
    }

    /// Tag with its first letter upper-cased, used as a default layer label.
    pub fn display_name(&self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for ChartType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "bar" => ChartType::Bar,
            "line" => ChartType::Line,
            "area" => ChartType::Area,
            "pie" => ChartType::Pie,
            "donut" => ChartType::Donut,
            "gauge" => ChartType::Gauge,
            "funnel" => ChartType::Funnel,
            "radar" => ChartType::Radar,
            "scatter" => ChartType::Scatter,
            "stat" => ChartType::Stat,
            "table" => ChartType::Table,
            _ => ChartType::Other(tag),
        }
    }
}

impl From<&str> for ChartType {
    fn from(tag: &str) -> Self {
        ChartType::from(tag.to_string())
    }
}

impl From<ChartType> for String {
    fn from(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    /// Number or preformatted string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_label: Option<String>,
    /// Kept as written so `0` stays `0`; read through [`WidgetConfig::gauge_min`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gauge_min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gauge_max: Option<Number>,
    /// Opaque to the renderer; kept for the builder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<Value>,
    /// Field name to expected value. Only scalar equality is evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    /// Inline rows. When non-empty these always win over a data source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WidgetConfig {
    /// Inline rows, if present and non-empty.
    pub fn inline_rows(&self) -> Option<&[Row]> {
        match &self.data {
            Some(rows) if !rows.is_empty() => Some(rows),
            _ => None,
        }
    }

    pub fn gauge_min(&self) -> Option<f64> {
        self.gauge_min.as_ref().and_then(Number::as_f64)
    }

    pub fn gauge_max(&self) -> Option<f64> {
        self.gauge_max.as_ref().and_then(Number::as_f64)
    }

    /// Shallow merge: every field set in `overlay` replaces the one in
    /// `self`. `data` is never taken from the overlay; layers share the
    /// widget's rows.
    pub fn merged_with(&self, overlay: &WidgetConfig) -> WidgetConfig {
        let mut extra = self.extra.clone();
        for (key, value) in &overlay.extra {
            extra.insert(key.clone(), value.clone());
        }
        WidgetConfig {
            x_axis: overlay.x_axis.clone().or_else(|| self.x_axis.clone()),
            y_axis: overlay.y_axis.clone().or_else(|| self.y_axis.clone()),
            group_by: overlay.group_by.clone().or_else(|| self.group_by.clone()),
            aggregation: overlay.aggregation.or(self.aggregation),
            colors: overlay.colors.clone().or_else(|| self.colors.clone()),
            show_legend: overlay.show_legend.or(self.show_legend),
            show_grid: overlay.show_grid.or(self.show_grid),
            stat_value: overlay.stat_value.clone().or_else(|| self.stat_value.clone()),
            stat_label: overlay.stat_label.clone().or_else(|| self.stat_label.clone()),
            gauge_min: overlay.gauge_min.clone().or_else(|| self.gauge_min.clone()),
            gauge_max: overlay.gauge_max.clone().or_else(|| self.gauge_max.clone()),
            date_range: overlay.date_range.clone().or_else(|| self.date_range.clone()),
            filters: overlay.filters.clone().or_else(|| self.filters.clone()),
            text_content: overlay
                .text_content
                .clone()
                .or_else(|| self.text_content.clone()),
            data: self.data.clone(),
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_chart_tags_round_trip() {
        let parsed: ChartType = serde_json::from_value(json!("heatmap")).unwrap();
        assert_eq!(parsed, ChartType::Other("heatmap".into()));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!("heatmap"));
        assert_eq!(ChartType::from("donut"), ChartType::Donut);
    }

    #[test]
    fn display_name_capitalizes_the_tag() {
        assert_eq!(ChartType::Bar.display_name(), "Bar");
        assert_eq!(ChartType::Other("".into()).display_name(), "");
    }

    #[test]
    fn overlay_keys_win_and_data_stays() {
        let base: WidgetConfig = serde_json::from_value(json!({
            "xAxis": "month",
            "yAxis": "sales",
            "showGrid": true,
            "data": [{"month": "Jan", "sales": 1}],
            "theme": "dark"
        }))
        .unwrap();
        let overlay: WidgetConfig = serde_json::from_value(json!({
            "yAxis": "profit",
            "showGrid": false,
            "data": [{"other": 1}],
            "theme": "light"
        }))
        .unwrap();

        let merged = base.merged_with(&overlay);
        assert_eq!(merged.x_axis.as_deref(), Some("month"));
        assert_eq!(merged.y_axis.as_deref(), Some("profit"));
        assert_eq!(merged.show_grid, Some(false));
        assert_eq!(merged.data, base.data);
        assert_eq!(merged.extra.get("theme"), Some(&json!("light")));
    }

    #[test]
    fn empty_inline_data_does_not_count() {
        let config = WidgetConfig {
            data: Some(Vec::new()),
            ..WidgetConfig::default()
        };
        assert!(config.inline_rows().is_none());
    }
}
