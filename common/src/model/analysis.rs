use crate::model::widget_config::ChartType;
use serde::{Deserialize, Serialize};

/// Cached result of analyzing one data source. Never updated after it is
/// written; removed only together with its data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub id: String,
    pub data_source_id: String,
    pub summary: String,
    pub insights: Vec<String>,
    pub suggested_chart_types: Vec<ChartType>,
    pub data_quality_notes: Vec<String>,
    pub created_at: String,
}
