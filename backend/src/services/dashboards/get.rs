use crate::auth::AuthUser;
use crate::db::Database;
use crate::error::ApiError;
use crate::services::access::dashboard_for_view;
use actix_web::{web, HttpResponse};

/// `GET /api/dashboards/{id}`
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(dashboard_for_view(&conn, &user, &id)?))
}
