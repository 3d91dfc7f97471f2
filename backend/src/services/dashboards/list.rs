use crate::auth::AuthUser;
use crate::db::{dashboards, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};

/// `GET /api/dashboards`: dashboards the caller owns or shares through an
/// organization, most recently updated first.
pub async fn process(user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(dashboards::list_visible(&conn, user.id())?))
}
