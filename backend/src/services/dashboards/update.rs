use crate::auth::AuthUser;
use crate::db::{dashboards, now, Database};
use crate::error::ApiError;
use crate::services::access::dashboard_for_edit;
use crate::services::mint_share_token;
use actix_web::{web, HttpResponse};
use common::model::dashboard::Dashboard;
use common::requests::UpdateDashboardRequest;
use rusqlite::Connection;

/// `PATCH /api/dashboards/{id}`: updates the fields present in the body.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<UpdateDashboardRequest>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let dashboard = update_dashboard(&conn, &user, &id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Making a dashboard public mints a share token only when it has none, so
/// links handed out earlier keep working after it is toggled back.
pub fn update_dashboard(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
    req: UpdateDashboardRequest,
) -> Result<Dashboard, ApiError> {
    let mut dashboard = dashboard_for_edit(conn, user, id)?;

    if let Some(title) = req.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::BadRequest("dashboard title must not be empty".into()));
        }
        dashboard.title = title.to_string();
    }
    if let Some(description) = req.description {
        dashboard.description = Some(description).filter(|d| !d.trim().is_empty());
    }
    if let Some(preferences) = req.preferences {
        dashboard.preferences = preferences;
    }
    if let Some(is_public) = req.is_public {
        dashboard.is_public = is_public;
        if is_public && dashboard.share_token.is_none() {
            dashboard.share_token = Some(mint_share_token());
        }
    }
    dashboard.updated_at = now();
    dashboards::update(conn, &dashboard)?;
    Ok(dashboard)
}
