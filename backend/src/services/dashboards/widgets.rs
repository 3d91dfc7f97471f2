use crate::auth::AuthUser;
use crate::db::{widgets, Database};
use crate::error::ApiError;
use crate::services::access::dashboard_for_view;
use actix_web::{web, HttpResponse};

/// `GET /api/dashboards/{id}/widgets`: widgets in grid reading order.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let dashboard = dashboard_for_view(&conn, &user, &id)?;
    Ok(HttpResponse::Ok().json(widgets::list_for_dashboard(&conn, &dashboard.id)?))
}
