use crate::auth::{ensure_member, AuthUser};
use crate::db::{dashboards, now, Database};
use crate::error::ApiError;
use crate::services::mint_share_token;
use actix_web::{web, HttpResponse};
use common::model::dashboard::Dashboard;
use common::requests::CreateDashboardRequest;
use log::info;
use rusqlite::Connection;
use uuid::Uuid;

/// `POST /api/dashboards`: creates a dashboard owned by the caller.
///
/// A dashboard created public gets its share token right away.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    payload: web::Json<CreateDashboardRequest>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let dashboard = create_dashboard(&conn, &user, payload.into_inner())?;
    info!("dashboard {} created by {}", dashboard.id, user.id());
    Ok(HttpResponse::Created().json(dashboard))
}

pub fn create_dashboard(
    conn: &Connection,
    user: &AuthUser,
    req: CreateDashboardRequest,
) -> Result<Dashboard, ApiError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("dashboard title must not be empty".into()));
    }
    ensure_member(conn, user, req.organization_id.as_deref())?;

    let created_at = now();
    let dashboard = Dashboard {
        id: Uuid::new_v4().to_string(),
        user_id: user.id().to_string(),
        organization_id: req.organization_id,
        title: title.to_string(),
        description: req.description,
        is_public: req.is_public,
        share_token: req.is_public.then(mint_share_token),
        preferences: req.preferences,
        created_at: created_at.clone(),
        updated_at: created_at,
    };
    dashboards::insert(conn, &dashboard)?;
    Ok(dashboard)
}
