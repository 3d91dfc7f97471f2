use crate::auth::AuthUser;
use crate::db::{dashboards, Database};
use crate::error::ApiError;
use crate::services::access::dashboard_for_edit;
use actix_web::{web, HttpResponse};
use log::info;

/// `DELETE /api/dashboards/{id}`: removes the dashboard and its widgets.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let dashboard = dashboard_for_edit(&conn, &user, &id)?;
    dashboards::delete(&conn, &dashboard.id)?;
    info!("dashboard {} deleted by {}", dashboard.id, user.id());
    Ok(HttpResponse::NoContent().finish())
}
