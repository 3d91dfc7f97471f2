use crate::auth::AuthUser;
use crate::db::Database;
use crate::error::ApiError;
use crate::services::access::data_source_for_view;
use actix_web::{web, HttpResponse};

/// `GET /api/data_sources/{id}`: the source including its payload.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(data_source_for_view(&conn, &user, &id)?))
}
