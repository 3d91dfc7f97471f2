//! Calls to the backend API.
//!
//! Requests made on behalf of a user carry the `X-User-Id` header. Failures
//! come back as display strings; the server's error body is used when it
//! sends one.

use common::model::dashboard::Dashboard;
use common::model::datasource::DataSource;
use common::model::widget::Widget;
use common::requests::{ApiErrorBody, PublicDashboard, UpdateWidgetRequest};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

const USER_HEADER: &str = "X-User-Id";

/// Everything a dashboard page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDashboard {
    pub dashboard: Dashboard,
    pub widgets: Vec<Widget>,
    /// Sources referenced by widgets without inline rows.
    pub sources: Vec<DataSource>,
}

fn as_user(request: RequestBuilder, user: &str) -> RequestBuilder {
    request.header(USER_HEADER, user)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response.json::<T>().await.map_err(|e| e.to_string());
    }
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => Err(body.message),
        Err(_) => Err(format!("request failed with status {}", status)),
    }
}

async fn get_json<T: DeserializeOwned>(url: &str, user: Option<&str>) -> Result<T, String> {
    let mut request = Request::get(url);
    if let Some(user) = user {
        request = as_user(request, user);
    }
    let response = request.send().await.map_err(|e| e.to_string())?;
    read_json(response).await
}

pub async fn load_dashboard(id: &str, user: &str) -> Result<LoadedDashboard, String> {
    let dashboard: Dashboard = get_json(&format!("/api/dashboards/{}", id), Some(user)).await?;
    let widgets: Vec<Widget> =
        get_json(&format!("/api/dashboards/{}/widgets", id), Some(user)).await?;

    let mut ids: Vec<&str> = widgets
        .iter()
        .filter(|w| w.config.inline_rows().is_none())
        .filter_map(|w| w.data_source_id.as_deref())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let mut sources = Vec::with_capacity(ids.len());
    for source_id in ids {
        // A source the user cannot read leaves its widgets on the placeholder.
        match get_json::<DataSource>(&format!("/api/data_sources/{}", source_id), Some(user)).await
        {
            Ok(source) => sources.push(source),
            Err(e) => gloo_console::warn!(format!("data source {}: {}", source_id, e)),
        }
    }

    Ok(LoadedDashboard {
        dashboard,
        widgets,
        sources,
    })
}

/// Public dashboards arrive with their rows embedded, so no sources.
pub async fn load_shared(token: &str) -> Result<LoadedDashboard, String> {
    let shared: PublicDashboard = get_json(&format!("/api/public/{}", token), None).await?;
    Ok(LoadedDashboard {
        dashboard: shared.dashboard,
        widgets: shared.widgets,
        sources: Vec::new(),
    })
}

/// Remembers the selected layer so the widget reopens on it.
pub async fn save_active_layer(widget_id: &str, user: &str, index: usize) -> Result<Widget, String> {
    let body = UpdateWidgetRequest {
        active_layer: Some(index),
        ..Default::default()
    };
    let request = as_user(Request::patch(&format!("/api/widgets/{}", widget_id)), user)
        .json(&body)
        .map_err(|e| e.to_string())?;
    let response = request.send().await.map_err(|e| e.to_string())?;
    read_json(response).await
}
