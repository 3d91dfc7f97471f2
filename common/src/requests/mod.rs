//! Request and response bodies of the HTTP API.
//!
//! Create requests carry every field the server needs; update requests are
//! partial patches where `None` means "leave unchanged".

use crate::chart::{LayerDescriptor, LayerRender};
use crate::model::dashboard::{Dashboard, DashboardPreferences};
use crate::model::datasource::FileFormat;
use crate::model::organization::MemberRole;
use crate::model::widget::{Annotation, ReferenceLine, Widget, WidgetLayer, WidgetPosition};
use crate::model::widget_config::{ChartType, WidgetConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDashboardRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub preferences: DashboardPreferences,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDashboardRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub preferences: Option<DashboardPreferences>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWidgetRequest {
    pub dashboard_id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    #[serde(default)]
    pub config: WidgetConfig,
    #[serde(default)]
    pub position: WidgetPosition,
    #[serde(default)]
    pub data_source_id: Option<String>,
    #[serde(default)]
    pub layers: Option<Vec<WidgetLayer>>,
    #[serde(default)]
    pub reference_lines: Option<Vec<ReferenceLine>>,
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWidgetRequest {
    #[serde(default, rename = "type")]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub config: Option<WidgetConfig>,
    #[serde(default)]
    pub position: Option<WidgetPosition>,
    #[serde(default)]
    pub layers: Option<Vec<WidgetLayer>>,
    #[serde(default)]
    pub active_layer: Option<usize>,
    #[serde(default)]
    pub reference_lines: Option<Vec<ReferenceLine>>,
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(default)]
    pub ai_insights: Option<String>,
}

/// Response of `POST /api/widgets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWidget {
    pub widget: Widget,
    /// Set when the snapshot dropped rows beyond the display cap.
    pub truncated: bool,
}

/// JSON part of a multipart data-source upload. Must precede the file part.
/// Server-side render of one widget layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRender {
    pub layers: Vec<LayerDescriptor>,
    pub active: LayerRender,
    /// The rows came from a source holding more than the display cap.
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDataSourceMeta {
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportUrlRequest {
    pub name: String,
    pub url: String,
    /// Overrides the format guessed from the URL or content type.
    #[serde(default)]
    pub format: Option<FileFormat>,
    #[serde(default)]
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStarted {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDashboard {
    pub dashboard: Dashboard,
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: String,
    pub role: MemberRole,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
}
