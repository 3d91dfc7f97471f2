//! Render descriptions produced by the dispatcher.
//!
//! These are data, not pixels: a drawing backend (the SVG renderer in the
//! frontend, or any API client) turns them into a picture. They serialize
//! with a `kind` tag so non-Rust clients can switch on it.

use crate::chart::palette::TooltipMode;
use crate::model::widget::{Annotation, ReferenceLine};
use serde::{Deserialize, Serialize};

pub const NO_DATA_MESSAGE: &str = "No data available";
pub const UNSUPPORTED_MESSAGE: &str = "Unsupported chart type";

/// Fill opacity of area charts.
pub const AREA_FILL_OPACITY: f32 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChartRender {
    /// No rows to draw.
    Empty { message: String },
    /// The chart type tag is not one the dispatcher knows.
    Unsupported { chart_type: String, message: String },
    Cartesian(CartesianRender),
    Pie(PieRender),
    Gauge(GaugeRender),
    Funnel(FunnelRender),
    Radar(RadarRender),
    Stat(StatRender),
    Table(TableRender),
}

impl ChartRender {
    pub fn empty() -> Self {
        ChartRender::Empty {
            message: NO_DATA_MESSAGE.to_string(),
        }
    }

    pub fn unsupported(chart_type: &str) -> Self {
        ChartRender::Unsupported {
            chart_type: chart_type.to_string(),
            message: UNSUPPORTED_MESSAGE.to_string(),
        }
    }

    /// Whether this is one of the two placeholder states.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartRender::Empty { .. } | ChartRender::Unsupported { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartesianKind {
    Bar,
    Line,
    Area,
    Scatter,
}

/// A single category/value pair on an x/y chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartesianPoint {
    pub category: String,
    /// `None` when the cell is missing or not numeric; drawn as a gap.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartesianRender {
    pub chart: CartesianKind,
    pub x_key: String,
    pub y_key: String,
    pub points: Vec<CartesianPoint>,
    pub color: String,
    /// Value range covering the points and zero.
    pub y_min: f64,
    pub y_max: f64,
    pub show_grid: bool,
    pub show_legend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f32>,
    pub reference_lines: Vec<ReferenceLine>,
    pub annotations: Vec<Annotation>,
    pub tooltip: TooltipMode,
}

/// One colored item of a pie, donut or funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieRender {
    pub donut: bool,
    pub name_key: String,
    pub value_key: String,
    pub slices: Vec<Slice>,
    /// Radii as fractions of half the drawing area's smaller side.
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub corner_radius: f32,
    pub show_legend: bool,
    pub tooltip: TooltipMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeBand {
    Red,
    Amber,
    Green,
}

/// A half-donut from `min` to `max`, filled to `percent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeRender {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Clamped to `0..=100`.
    pub percent: f64,
    pub band: GaugeBand,
    pub color: String,
    pub track_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelRender {
    pub name_key: String,
    pub value_key: String,
    /// In input order; the caller sorts stages.
    pub stages: Vec<Slice>,
    pub tooltip: TooltipMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarAxis {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarRender {
    pub label_key: String,
    pub value_key: String,
    pub axes: Vec<RadarAxis>,
    pub max: f64,
    pub color: String,
    pub show_legend: bool,
    pub tooltip: TooltipMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRender {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRender {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows available before the table cap.
    pub total_rows: usize,
}
