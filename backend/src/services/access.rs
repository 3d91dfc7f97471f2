//! Loading records together with the caller's right to use them.

use crate::auth::{ensure_edit, ensure_view, AuthUser, Owned};
use crate::db::{dashboards, data_sources, widgets};
use crate::error::ApiError;
use common::model::dashboard::Dashboard;
use common::model::datasource::DataSource;
use common::model::widget::Widget;
use rusqlite::Connection;

fn owned_dashboard(dashboard: &Dashboard) -> Owned<'_> {
    Owned {
        kind: "dashboard",
        id: &dashboard.id,
        user_id: &dashboard.user_id,
        organization_id: dashboard.organization_id.as_deref(),
    }
}

fn owned_source(source: &DataSource) -> Owned<'_> {
    Owned {
        kind: "data source",
        id: &source.id,
        user_id: &source.user_id,
        organization_id: source.organization_id.as_deref(),
    }
}

fn dashboard(conn: &Connection, id: &str) -> Result<Dashboard, ApiError> {
    dashboards::get(conn, id)?.ok_or_else(|| ApiError::NotFound(format!("dashboard {}", id)))
}

pub fn dashboard_for_view(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
) -> Result<Dashboard, ApiError> {
    let dashboard = dashboard(conn, id)?;
    ensure_view(conn, user, owned_dashboard(&dashboard))?;
    Ok(dashboard)
}

pub fn dashboard_for_edit(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
) -> Result<Dashboard, ApiError> {
    let dashboard = dashboard(conn, id)?;
    ensure_edit(conn, user, owned_dashboard(&dashboard))?;
    Ok(dashboard)
}

fn data_source(conn: &Connection, id: &str) -> Result<DataSource, ApiError> {
    data_sources::get(conn, id)?.ok_or_else(|| ApiError::NotFound(format!("data source {}", id)))
}

pub fn data_source_for_view(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
) -> Result<DataSource, ApiError> {
    let source = data_source(conn, id)?;
    ensure_view(conn, user, owned_source(&source))?;
    Ok(source)
}

pub fn data_source_for_edit(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
) -> Result<DataSource, ApiError> {
    let source = data_source(conn, id)?;
    ensure_edit(conn, user, owned_source(&source))?;
    Ok(source)
}

fn widget(conn: &Connection, id: &str) -> Result<Widget, ApiError> {
    widgets::get(conn, id)?.ok_or_else(|| ApiError::NotFound(format!("widget {}", id)))
}

/// A widget is visible through its dashboard.
pub fn widget_for_view(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
) -> Result<(Widget, Dashboard), ApiError> {
    let widget = widget(conn, id)?;
    let dashboard = dashboard_for_view(conn, user, &widget.dashboard_id)?;
    Ok((widget, dashboard))
}

pub fn widget_for_edit(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
) -> Result<(Widget, Dashboard), ApiError> {
    let widget = widget(conn, id)?;
    let dashboard = dashboard_for_edit(conn, user, &widget.dashboard_id)?;
    Ok((widget, dashboard))
}

/// The sources a widget's rows may come from. A widget's rows are shown to
/// whoever can see its dashboard, so the source itself is not access checked.
pub fn sources_for(conn: &Connection, widget: &Widget) -> Result<Vec<DataSource>, ApiError> {
    match &widget.data_source_id {
        Some(id) if widget.config.inline_rows().is_none() => {
            Ok(data_sources::get_many(conn, std::slice::from_ref(id))?)
        }
        _ => Ok(Vec::new()),
    }
}
