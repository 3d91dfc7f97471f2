use crate::auth::AuthUser;
use crate::db::Database;
use crate::error::ApiError;
use crate::services::access::widget_for_view;
use actix_web::{web, HttpResponse};

/// `GET /api/widgets/{id}`
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let (widget, _) = widget_for_view(&conn, &user, &id)?;
    Ok(HttpResponse::Ok().json(widget))
}
