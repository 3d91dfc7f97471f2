use crate::auth::AuthUser;
use crate::db::{data_sources, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};

/// `GET /api/data_sources`: visible sources without their payloads.
pub async fn process(user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(data_sources::list_visible(&conn, user.id())?))
}
