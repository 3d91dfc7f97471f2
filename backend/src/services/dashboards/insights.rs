use crate::auth::AuthUser;
use crate::db::{now, widgets, Database};
use crate::error::ApiError;
use crate::services::access::{dashboard_for_edit, sources_for};
use crate::suggestions::SuggestionService;
use actix_web::{web, HttpResponse};
use common::chart::resolve;
use common::model::widget::Widget;
use log::info;
use rusqlite::Connection;

/// `POST /api/dashboards/{id}/insights`: rewrites every widget's insight
/// text from its current rows and returns the widgets.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    suggestions: web::Data<dyn SuggestionService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let updated = refresh_insights(&conn, &user, &id, suggestions.get_ref())?;
    info!("refreshed insights for {} widgets of dashboard {}", updated.len(), id);
    Ok(HttpResponse::Ok().json(updated))
}

pub fn refresh_insights(
    conn: &Connection,
    user: &AuthUser,
    dashboard_id: &str,
    suggestions: &dyn SuggestionService,
) -> Result<Vec<Widget>, ApiError> {
    let dashboard = dashboard_for_edit(conn, user, dashboard_id)?;
    let mut list = widgets::list_for_dashboard(conn, &dashboard.id)?;
    for widget in &mut list {
        let sources = sources_for(conn, widget)?;
        let rows = resolve(&widget.config, widget.data_source_id.as_deref(), &sources).rows;
        widget.ai_insights = suggestions.widget_insight(widget, &rows);
        widget.updated_at = now();
        widgets::update(conn, widget)?;
    }
    Ok(list)
}
