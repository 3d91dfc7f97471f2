use crate::model::widget_config::{ChartType, WidgetConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One visual element on a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub dashboard_id: String,
    /// `None` when the widget carries its rows inline or its source was deleted.
    #[serde(default)]
    pub data_source_id: Option<String>,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    #[serde(default)]
    pub config: WidgetConfig,
    #[serde(default)]
    pub position: WidgetPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<WidgetLayer>>,
    /// Last layer the user selected. May be stale after layers are removed.
    #[serde(default)]
    pub active_layer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_lines: Option<Vec<ReferenceLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Grid placement in dashboard units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Default for WidgetPosition {
    fn default() -> Self {
        Self { x: 0, y: 0, w: 4, h: 3 }
    }
}

/// An alternate chart type over the widget's rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLayer {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Partial override merged on top of the widget's own config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<WidgetConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceAxis {
    X,
    #[default]
    Y,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLine {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub axis: ReferenceAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Category or x value the note is attached to.
    pub x: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub text: String,
}
