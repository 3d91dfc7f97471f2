use crate::auth::AuthUser;
use crate::db::{analyses, Database};
use crate::error::ApiError;
use crate::services::access::data_source_for_view;
use actix_web::{web, HttpResponse};

/// `GET /api/data_sources/{id}/analyses`: newest first.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let source = data_source_for_view(&conn, &user, &id)?;
    Ok(HttpResponse::Ok().json(analyses::list_for_source(&conn, &source.id)?))
}
