use serde::{Deserialize, Serialize};

/// A named collection of widgets owned by one user.
///
/// `share_token` is set exactly when the dashboard has been published with
/// `is_public = true`; once minted it is kept so shared links stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    #[serde(default)]
    pub preferences: DashboardPreferences,
    pub created_at: String,
    pub updated_at: String,
}

/// Layout and theme choices that travel with the dashboard instead of
/// living in global UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPreferences {
    /// Number of grid columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Palette used by widgets that do not set their own `colors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_preset: Option<Vec<String>>,
}
