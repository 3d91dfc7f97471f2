use crate::auth::AuthUser;
use crate::db::{organizations, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};

/// `GET /api/organizations`: organizations the caller belongs to.
pub async fn process(user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(organizations::list_for_user(&conn, user.id())?))
}
